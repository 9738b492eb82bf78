use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use comfy_table::Color;
use enumset::EnumSet;

use crate::{
    error::BillingError,
    quantity::{
        cost::Cost,
        emission::{Kilograms, KilogramsPerKilowattHour},
        energy::KilowattHours,
        rate::KilowattHourRate,
    },
};

/// Fixed tariff a consumer draws power from.
#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum EnergySource {
    Solar,
    Wind,
    Geothermal,
}

impl EnergySource {
    /// All tariffs in catalog order.
    pub fn catalog() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().into_iter()
    }

    pub const fn cost_per_kwh(self) -> KilowattHourRate {
        match self {
            Self::Solar => KilowattHourRate(0.07),
            Self::Wind => KilowattHourRate(0.05),
            Self::Geothermal => KilowattHourRate(0.06),
        }
    }

    pub const fn carbon_per_kwh(self) -> KilogramsPerKilowattHour {
        match self {
            Self::Solar => KilogramsPerKilowattHour(0.005),
            Self::Wind => KilogramsPerKilowattHour(0.002),
            Self::Geothermal => KilogramsPerKilowattHour(0.003),
        }
    }

    pub fn cost(self, usage: KilowattHours) -> Cost {
        usage * self.cost_per_kwh()
    }

    pub fn emissions(self, usage: KilowattHours) -> Kilograms {
        usage * self.carbon_per_kwh()
    }

    /// Name under which the tariff is persisted.
    pub const fn discriminator(self) -> &'static str {
        match self {
            Self::Solar => "SolarEnergy",
            Self::Wind => "WindEnergy",
            Self::Geothermal => "GeothermalEnergy",
        }
    }

    /// Human-readable multi-line description of the tariff.
    pub fn info(self) -> String {
        format!(
            "{self} Energy\nCost per kWh = {}\nCarbon emissions = {}",
            self.cost_per_kwh(),
            self.carbon_per_kwh(),
        )
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Solar => Color::Yellow,
            Self::Wind => Color::Cyan,
            Self::Geothermal => Color::DarkRed,
        }
    }
}

impl Display for EnergySource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solar => write!(f, "Solar"),
            Self::Wind => write!(f, "Wind"),
            Self::Geothermal => write!(f, "Geothermal"),
        }
    }
}

impl FromStr for EnergySource {
    type Err = BillingError;

    /// Accepts both the short names and the persisted discriminators, ignoring the case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::catalog()
            .find(|source| {
                name.eq_ignore_ascii_case(&source.to_string())
                    || name.eq_ignore_ascii_case(source.discriminator())
            })
            .ok_or_else(|| BillingError::InvalidEnergySource(name.to_string()))
    }
}
