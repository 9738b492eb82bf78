use std::fmt::{Debug, Display, Formatter};

quantity!(
    /// Mass of emitted carbon.
    Kilograms
);

impl Display for Kilograms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}

impl Debug for Kilograms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kg", self.0)
    }
}

quantity!(
    /// Carbon emission factor of an energy source.
    KilogramsPerKilowattHour
);

impl Display for KilogramsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kg/kWh", self.0)
    }
}

impl Debug for KilogramsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kg/kWh", self.0)
    }
}
