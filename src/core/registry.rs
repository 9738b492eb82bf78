use crate::{core::consumer::Consumer, error::BillingError};

/// Ordered collection of the consumers known to the session.
///
/// Names are not required to be unique: lookups return the first case-insensitive match.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Registry(Vec<Consumer>);

impl Registry {
    pub fn add(&mut self, consumer: Consumer) -> &mut Consumer {
        self.0.push(consumer);
        let index = self.0.len() - 1;
        &mut self.0[index]
    }

    pub fn find(&self, name: &str) -> Option<&Consumer> {
        self.0.iter().find(|consumer| consumer.is_named(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Consumer> {
        self.0.iter_mut().find(|consumer| consumer.is_named(name))
    }

    pub fn get(&self, name: &str) -> Result<&Consumer, BillingError> {
        self.find(name).ok_or_else(|| BillingError::ConsumerNotFound(name.trim().to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Consumer, BillingError> {
        self.find_mut(name).ok_or_else(|| BillingError::ConsumerNotFound(name.trim().to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Consumer> {
        self.0.iter()
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Consumer> for Registry {
    fn from_iter<T: IntoIterator<Item = Consumer>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Consumer> for Registry {
    fn extend<T: IntoIterator<Item = Consumer>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{account::AccountType, consumer::tests::jane_doe, tariff::EnergySource};

    #[test]
    fn test_lookup_is_case_insensitive_and_first_match_wins() {
        let duplicate = Consumer::builder()
            .full_name("JANE DOE")
            .account_type(AccountType::Commercial)
            .energy_source(EnergySource::Geothermal)
            .build();
        let mut registry: Registry = [jane_doe(), duplicate].into_iter().collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("jane doe").unwrap().energy_source, EnergySource::Solar);
        registry.get_mut("Jane Doe").unwrap().usage_update_count = 7;
        assert_eq!(registry.find("JANE DOE").unwrap().usage_update_count, 7);
    }

    #[test]
    fn test_not_found() {
        let registry = Registry::default();
        assert_eq!(
            registry.get(" Nobody "),
            Err(BillingError::ConsumerNotFound("Nobody".to_string())),
        );
    }
}
