use thiserror::Error;

/// Failures of the billing domain.
///
/// Application code wraps these into [`anyhow::Error`], callers that need to tell them apart
/// use [`anyhow::Error::downcast_ref`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillingError {
    #[error("invalid energy source: `{0}`")]
    InvalidEnergySource(String),

    #[error("invalid account type: `{0}`")]
    InvalidAccountType(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("invalid numeric input: `{0}`")]
    InvalidNumericInput(String),

    #[error("consumer `{0}` not found")]
    ConsumerNotFound(String),

    #[error("appliance `{0}` not found")]
    ApplianceNotFound(String),

    #[error("appliance `{0}` already exists")]
    DuplicateAppliance(String),
}
