use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{
    core::{account::AccountType, tariff::EnergySource, usage::UsageLog},
    error::BillingError,
    quantity::{cost::Cost, emission::Kilograms, energy::KilowattHours},
};

type Result<T = (), E = BillingError> = std::result::Result<T, E>;

/// Registered energy consumer with their appliances and usage history.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, bon::Builder)]
pub struct Consumer {
    #[builder(into)]
    pub full_name: String,

    pub account_type: AccountType,

    pub energy_source: EnergySource,

    /// Power draw per appliance name.
    #[builder(default)]
    pub appliances: IndexMap<String, KilowattHours>,

    /// Price per appliance name.
    #[builder(default)]
    pub appliance_prices: IndexMap<String, Cost>,

    #[builder(default)]
    pub usage: UsageLog,

    #[builder(default)]
    pub usage_update_count: u32,
}

/// Outcome of [`Consumer::record_usage`].
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UsageUpdate {
    pub total: KilowattHours,
    pub update_count: u32,
}

/// Appliance as shown in tables.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Appliance<'a> {
    pub name: &'a str,
    pub consumption: KilowattHours,
    pub price: Cost,
}

impl Consumer {
    /// Whether the name refers to this consumer, ignoring the case.
    pub fn is_named(&self, name: &str) -> bool {
        self.full_name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Add the appliance, replacing the existing one with the same name.
    pub fn add_appliance(&mut self, name: impl Into<String>, consumption: KilowattHours, price: Cost) {
        let name = name.into();
        self.appliances.insert(name.clone(), consumption);
        self.appliance_prices.insert(name, price);
    }

    pub fn remove_appliance(&mut self, name: &str) -> Result<KilowattHours> {
        let consumption = self
            .appliances
            .shift_remove(name)
            .ok_or_else(|| BillingError::ApplianceNotFound(name.to_string()))?;
        self.appliance_prices.shift_remove(name);
        Ok(consumption)
    }

    /// Move the consumption and the price to the new name, appending the appliance to the end.
    ///
    /// Another appliance that already has the new name is never replaced.
    pub fn rename_appliance(&mut self, name: &str, new_name: impl Into<String>) -> Result {
        let new_name = new_name.into();
        if new_name != name && self.appliances.contains_key(&new_name) {
            return Err(BillingError::DuplicateAppliance(new_name));
        }
        let price = self.appliance_price(name);
        let consumption = self.remove_appliance(name)?;
        self.add_appliance(new_name, consumption, price);
        Ok(())
    }

    pub fn set_consumption(&mut self, name: &str, consumption: KilowattHours) -> Result {
        *self
            .appliances
            .get_mut(name)
            .ok_or_else(|| BillingError::ApplianceNotFound(name.to_string()))? = consumption;
        Ok(())
    }

    pub fn set_price(&mut self, name: &str, price: Cost) -> Result {
        if !self.appliances.contains_key(name) {
            return Err(BillingError::ApplianceNotFound(name.to_string()));
        }
        self.appliance_prices.insert(name.to_string(), price);
        Ok(())
    }

    /// Price of the appliance, zero when unknown.
    pub fn appliance_price(&self, name: &str) -> Cost {
        self.appliance_prices.get(name).copied().unwrap_or_default()
    }

    pub fn appliances(&self) -> impl Iterator<Item = Appliance<'_>> {
        self.appliances.iter().map(|(name, consumption)| Appliance {
            name: name.as_str(),
            consumption: *consumption,
            price: self.appliance_price(name),
        })
    }

    /// Combined power draw of all the appliances.
    pub fn total_draw(&self) -> KilowattHours {
        self.appliances.values().copied().sum()
    }

    /// Fold the current appliance draw into the usage tables and count the update.
    pub fn record_usage(&mut self, today: NaiveDate) -> UsageUpdate {
        let total = self.total_draw();
        self.usage.record(today, total);
        self.usage_update_count += 1;
        UsageUpdate { total, update_count: self.usage_update_count }
    }

    /// Emissions over every recorded month, not only the current one.
    pub fn lifetime_emissions(&self) -> Kilograms {
        self.energy_source.emissions(self.usage.monthly.total())
    }
}
