use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use enumset::EnumSet;

use crate::error::BillingError;

#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum AccountType {
    Residential,
    Commercial,
}

impl AccountType {
    pub fn all() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().into_iter()
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Residential => write!(f, "Residential"),
            Self::Commercial => write!(f, "Commercial"),
        }
    }
}

impl FromStr for AccountType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::all()
            .find(|account_type| name.eq_ignore_ascii_case(&account_type.to_string()))
            .ok_or_else(|| BillingError::InvalidAccountType(name.to_string()))
    }
}
