#[macro_use]
mod macros;

pub mod cost;
pub mod emission;
pub mod energy;
pub mod rate;

#[cfg(test)]
mod tests {
    use std::fmt::{Debug, Formatter};

    quantity!(Bare);

    impl Debug for Bare {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    #[test]
    fn test_min_max() {
        assert_eq!(Bare::from(1.0).min(Bare::from(2.0)), Bare::from(1.0));
        assert_eq!(Bare::from(1.0).max(Bare::from(2.0)), Bare::from(2.0));
    }

    #[test]
    fn test_sum() {
        let sum: Bare = [Bare(1.5), Bare(2.0), Bare(0.5)].into_iter().sum();
        assert_eq!(sum, Bare(4.0));
        assert_eq!(std::iter::empty::<Bare>().sum::<Bare>(), Bare::ZERO);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("6.5".parse::<Bare>().unwrap(), Bare(6.5));
        assert!("six".parse::<Bare>().is_err());
    }
}
