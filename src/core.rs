pub mod account;
pub mod billing;
pub mod consumer;
pub mod registry;
pub mod tariff;
pub mod usage;
