//! Labeled-line format of a single consumer file.
//!
//! ```text
//! Full Name: Jane Doe
//! Account Type: Residential
//! Energy Source: SolarEnergy
//! Device: Fridge
//! Consumption: 5
//! Price: 120
//! Daily Usage: Sunday = 5
//! Weekly Usage: Week 42 = 5
//! Monthly Usage: October = 5
//! Usage Update Count: 1
//! ```

use std::{iter::Peekable, str::FromStr};

use itertools::Itertools;

use crate::{
    core::{
        consumer::Consumer,
        usage::{Period, UsageTable},
    },
    error::BillingError,
    quantity::{cost::Cost, energy::KilowattHours},
};

const FULL_NAME: &str = "Full Name";
const ACCOUNT_TYPE: &str = "Account Type";
const ENERGY_SOURCE: &str = "Energy Source";
const DEVICE: &str = "Device";
const CONSUMPTION: &str = "Consumption";
const PRICE: &str = "Price";
const DAILY_USAGE: &str = "Daily Usage";
const WEEKLY_USAGE: &str = "Weekly Usage";
const MONTHLY_USAGE: &str = "Monthly Usage";
const USAGE_UPDATE_COUNT: &str = "Usage Update Count";

const fn usage_key(period: Period) -> &'static str {
    match period {
        Period::Daily => DAILY_USAGE,
        Period::Weekly => WEEKLY_USAGE,
        Period::Monthly => MONTHLY_USAGE,
    }
}

pub fn encode(consumer: &Consumer) -> String {
    let mut lines = vec![
        format!("{FULL_NAME}: {}", consumer.full_name),
        format!("{ACCOUNT_TYPE}: {}", consumer.account_type),
        format!("{ENERGY_SOURCE}: {}", consumer.energy_source.discriminator()),
    ];
    for appliance in consumer.appliances() {
        lines.push(format!("{DEVICE}: {}", appliance.name));
        lines.push(format!("{CONSUMPTION}: {}", appliance.consumption.0));
        lines.push(format!("{PRICE}: {}", appliance.price.0));
    }
    for period in Period::ALL {
        let entries = consumer
            .usage
            .table(period)
            .iter()
            .map(|(label, usage)| format!("{label} = {}", usage.0))
            .join(",");
        lines.push(format!("{}: {entries}", usage_key(period)));
    }
    lines.push(format!("{USAGE_UPDATE_COUNT}: {}", consumer.usage_update_count));
    lines.push(String::new());
    lines.join("\n")
}

pub fn decode(text: &str) -> Result<Consumer, BillingError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();

    let full_name = expect_field(lines.next(), FULL_NAME)?;
    if full_name.is_empty() {
        return Err(BillingError::MalformedRecord("empty full name".to_string()));
    }
    let mut consumer = Consumer::builder()
        .full_name(full_name)
        .account_type(expect_field(lines.next(), ACCOUNT_TYPE)?.parse()?)
        .energy_source(expect_field(lines.next(), ENERGY_SOURCE)?.parse()?)
        .build();

    while let Some(line) = lines.next() {
        let Some((key, value)) = split_field(line) else {
            continue;
        };
        match key {
            DEVICE => {
                let consumption: KilowattHours = take_field(&mut lines, CONSUMPTION)?;
                let price: Cost = take_field(&mut lines, PRICE)?;
                consumer.add_appliance(value, consumption, price);
            }
            DAILY_USAGE => consumer.usage.daily = parse_table(value)?,
            WEEKLY_USAGE => consumer.usage.weekly = parse_table(value)?,
            MONTHLY_USAGE => consumer.usage.monthly = parse_table(value)?,
            USAGE_UPDATE_COUNT => consumer.usage_update_count = parse_value(key, value)?,
            _ => {}
        }
    }

    Ok(consumer)
}

/// Split `Key: value` at the first colon.
fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(key, value)| (key.trim(), value.trim()))
}

fn expect_field<'a>(line: Option<&'a str>, expected_key: &str) -> Result<&'a str, BillingError> {
    match line.and_then(split_field) {
        Some((key, value)) if key == expected_key => Ok(value),
        _ => Err(BillingError::MalformedRecord(format!("expected `{expected_key}` line"))),
    }
}

/// Consume the next line if it carries the key, falling back to zero otherwise.
fn take_field<'a, T>(
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
    expected_key: &str,
) -> Result<T, BillingError>
where
    T: FromStr + Default,
{
    let Some((key, value)) = lines
        .next_if(|line| split_field(line).is_some_and(|(key, _)| key == expected_key))
        .and_then(split_field)
    else {
        return Ok(T::default());
    };
    parse_value(key, value)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, BillingError> {
    value
        .parse()
        .map_err(|_| BillingError::MalformedRecord(format!("invalid `{key}` value: `{value}`")))
}

fn parse_table(value: &str) -> Result<UsageTable, BillingError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<_, BillingError> {
            let (label, usage) = entry.split_once('=').ok_or_else(|| {
                BillingError::MalformedRecord(format!("usage entry `{entry}` has no value"))
            })?;
            let label = label.trim();
            Ok((label, parse_value::<KilowattHours>(label, usage.trim())?))
        })
        .collect()
}
