use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;

use crate::quantity::energy::KilowattHours;

/// Calendar bucket of a usage table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Label of the bucket that contains the date: `Monday`, `Week 42` or `October`.
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Daily => date.format("%A").to_string(),
            Self::Weekly => format!("Week {}", week_of_year(date)),
            Self::Monthly => date.format("%B").to_string(),
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Week number where weeks start on Monday and the first week is the one containing 1 January,
/// however short it is.
fn week_of_year(date: NaiveDate) -> u32 {
    let offset = NaiveDate::from_yo_opt(date.year(), 1)
        .map_or(0, |new_year| new_year.weekday().num_days_from_monday());
    (date.ordinal0() + offset) / 7 + 1
}

/// Usage per calendar label, in the order the labels were first recorded.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq, derive_more::IntoIterator)]
pub struct UsageTable(IndexMap<String, KilowattHours>);

impl UsageTable {
    /// Replace the label's value.
    pub fn set(&mut self, label: impl Into<String>, usage: KilowattHours) {
        self.0.insert(label.into(), usage);
    }

    /// Add to the label's value, starting from zero when the label is new.
    pub fn accumulate(&mut self, label: impl Into<String>, usage: KilowattHours) {
        *self.0.entry(label.into()).or_default() += usage;
    }

    pub fn get(&self, label: &str) -> Option<KilowattHours> {
        self.0.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, KilowattHours)> {
        self.0.iter().map(|(label, usage)| (label.as_str(), *usage))
    }

    pub fn total(&self) -> KilowattHours {
        self.0.values().copied().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, KilowattHours)> for UsageTable {
    fn from_iter<T: IntoIterator<Item = (L, KilowattHours)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(label, usage)| (label.into(), usage)).collect())
    }
}

/// Daily, weekly and monthly usage tables of a consumer.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UsageLog {
    pub daily: UsageTable,
    pub weekly: UsageTable,
    pub monthly: UsageTable,
}

impl UsageLog {
    /// Fold the total draw into the tables.
    ///
    /// The day's entry is overwritten with the latest total, whereas weeks and months accumulate.
    pub fn record(&mut self, date: NaiveDate, total: KilowattHours) {
        self.daily.set(Period::Daily.label(date), total);
        self.weekly.accumulate(Period::Weekly.label(date), total);
        self.monthly.accumulate(Period::Monthly.label(date), total);
    }

    pub const fn table(&self, period: Period) -> &UsageTable {
        match period {
            Period::Daily => &self.daily,
            Period::Weekly => &self.weekly,
            Period::Monthly => &self.monthly,
        }
    }
}
