use crate::{
    core::{
        consumer::Consumer,
        tariff::EnergySource,
        usage::{Period, UsageTable},
    },
    quantity::{cost::Cost, emission::Kilograms, energy::KilowattHours},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillEntry {
    pub label: String,
    pub usage: KilowattHours,
    pub cost: Cost,
}

/// Per-label breakdown of a usage table priced at a tariff.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bill {
    pub entries: Vec<BillEntry>,
    pub total: Cost,
}

impl Bill {
    /// Price every label of the table, keeping the table order.
    pub fn for_period(table: &UsageTable, source: EnergySource) -> Self {
        let entries: Vec<_> = table
            .iter()
            .map(|(label, usage)| BillEntry {
                label: label.to_string(),
                usage,
                cost: source.cost(usage),
            })
            .collect();
        let total = entries.iter().map(|entry| entry.cost).sum();
        Self { entries, total }
    }
}

/// Read-only figures shown to the consumer.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSummary {
    pub daily: Bill,
    pub weekly: Bill,
    pub monthly: Bill,
    pub lifetime_emissions: Kilograms,
}

impl AccountSummary {
    pub const fn bill(&self, period: Period) -> &Bill {
        match period {
            Period::Daily => &self.daily,
            Period::Weekly => &self.weekly,
            Period::Monthly => &self.monthly,
        }
    }
}

impl From<&Consumer> for AccountSummary {
    fn from(consumer: &Consumer) -> Self {
        let bill = |period| Bill::for_period(consumer.usage.table(period), consumer.energy_source);
        Self {
            daily: bill(Period::Daily),
            weekly: bill(Period::Weekly),
            monthly: bill(Period::Monthly),
            lifetime_emissions: consumer.lifetime_emissions(),
        }
    }
}
