//! Single-line format used to export and import consumers in bulk.
//!
//! Fields are separated by `|`, map entries by `;`, and keys from values by `:`:
//!
//! ```text
//! Jane Doe|Residential|SolarEnergy|Fridge:5;TV:1.5|Fridge:120;TV:300|1|Sunday:6.5|Week 42:6.5|October:6.5
//! ```
//!
//! The three trailing usage fields are optional.

use std::{fmt::Display, str::FromStr};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    core::{consumer::Consumer, usage::UsageTable},
    error::BillingError,
    prelude::*,
    quantity::energy::KilowattHours,
};

const FIELD_SEPARATOR: char = '|';
const ENTRY_SEPARATOR: char = ';';
const KEY_SEPARATOR: char = ':';

const N_MANDATORY_FIELDS: usize = 6;
const N_FIELDS: usize = 9;

pub fn encode(consumer: &Consumer) -> Result<String, BillingError> {
    ensure_free_of(&consumer.full_name, &[FIELD_SEPARATOR, '\n'])?;
    let usage = &consumer.usage;
    let fields = [
        consumer.full_name.clone(),
        consumer.account_type.to_string(),
        consumer.energy_source.discriminator().to_string(),
        encode_entries(
            consumer.appliances.iter().map(|(name, consumption)| (name.as_str(), consumption.0)),
        )?,
        encode_entries(consumer.appliance_prices.iter().map(|(name, price)| (name.as_str(), price.0)))?,
        consumer.usage_update_count.to_string(),
        encode_entries(usage.daily.iter().map(|(label, usage)| (label, usage.0)))?,
        encode_entries(usage.weekly.iter().map(|(label, usage)| (label, usage.0)))?,
        encode_entries(usage.monthly.iter().map(|(label, usage)| (label, usage.0)))?,
    ];
    Ok(fields.iter().join(&FIELD_SEPARATOR.to_string()))
}

pub fn decode(line: &str) -> Result<Consumer, BillingError> {
    let fields = line.trim_end_matches(['\r', '\n']).split(FIELD_SEPARATOR).collect_vec();
    if fields.len() != N_MANDATORY_FIELDS && fields.len() != N_FIELDS {
        return Err(BillingError::MalformedRecord(format!(
            "expected {N_MANDATORY_FIELDS} or {N_FIELDS} fields, got {}",
            fields.len(),
        )));
    }
    let full_name = fields[0].trim();
    if full_name.is_empty() {
        return Err(BillingError::MalformedRecord("empty full name".to_string()));
    }
    let table = |index: usize| -> Result<UsageTable, BillingError> {
        match fields.get(index) {
            Some(field) => Ok(decode_entries::<KilowattHours>(field)?.into_iter().collect()),
            None => Ok(UsageTable::default()),
        }
    };

    let mut consumer = Consumer::builder()
        .full_name(full_name)
        .account_type(fields[1].parse()?)
        .energy_source(fields[2].parse()?)
        .appliances(decode_entries(fields[3])?)
        .appliance_prices(decode_entries(fields[4])?)
        .usage_update_count(parse_value(fields[5])?)
        .build();
    consumer.appliance_prices.retain(|name, _| {
        let is_known = consumer.appliances.contains_key(name);
        if !is_known {
            warn!(full_name, name, "dropping the price of an unknown appliance");
        }
        is_known
    });
    consumer.usage.daily = table(6)?;
    consumer.usage.weekly = table(7)?;
    consumer.usage.monthly = table(8)?;
    Ok(consumer)
}

fn ensure_free_of(text: &str, separators: &[char]) -> Result<(), BillingError> {
    if text.contains(separators) {
        Err(BillingError::MalformedRecord(format!("`{text}` contains a reserved separator")))
    } else {
        Ok(())
    }
}

fn encode_entries<'a, V: Display>(
    entries: impl Iterator<Item = (&'a str, V)>,
) -> Result<String, BillingError> {
    let mut encoded = Vec::new();
    for (key, value) in entries {
        ensure_free_of(key, &[FIELD_SEPARATOR, ENTRY_SEPARATOR, KEY_SEPARATOR, '\n'])?;
        encoded.push(format!("{key}{KEY_SEPARATOR}{value}"));
    }
    Ok(encoded.iter().join(&ENTRY_SEPARATOR.to_string()))
}

fn decode_entries<V: FromStr>(field: &str) -> Result<IndexMap<String, V>, BillingError> {
    field
        .split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| -> Result<_, BillingError> {
            let (key, value) = entry.split_once(KEY_SEPARATOR).ok_or_else(|| {
                BillingError::MalformedRecord(format!("entry `{entry}` has no value"))
            })?;
            Ok((key.to_string(), parse_value(value)?))
        })
        .collect()
}

fn parse_value<T: FromStr>(value: &str) -> Result<T, BillingError> {
    value
        .trim()
        .parse()
        .map_err(|_| BillingError::MalformedRecord(format!("invalid value: `{value}`")))
}
