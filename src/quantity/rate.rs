use std::fmt::{Debug, Display, Formatter};

quantity!(
    /// Pesos per kilowatt-hour.
    KilowattHourRate
);

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{:.2}", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}/kWh", self.0)
    }
}
