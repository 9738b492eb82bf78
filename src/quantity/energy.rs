use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{
    cost::Cost,
    emission::{Kilograms, KilogramsPerKilowattHour},
    rate::KilowattHourRate,
};

quantity!(
    /// Energy drawn by an appliance or accumulated in a usage table.
    KilowattHours
);

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kWh", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rhs.0)
    }
}

impl Mul<KilogramsPerKilowattHour> for KilowattHours {
    type Output = Kilograms;

    fn mul(self, rhs: KilogramsPerKilowattHour) -> Self::Output {
        Kilograms(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_cost() {
        assert_abs_diff_eq!((KilowattHours(6.5) * KilowattHourRate(0.07)).0, 0.455);
    }

    #[test]
    fn test_emissions() {
        assert_abs_diff_eq!((KilowattHours(6.5) * KilogramsPerKilowattHour(0.005)).0, 0.0325);
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHours(6.5).to_string(), "6.50 kWh");
    }
}
