use clap::Parser;

use crate::core::{account::AccountType, consumer::Consumer, tariff::EnergySource};

#[derive(Parser)]
pub struct SummaryArgs {
    /// Full name of the consumer, case-insensitive.
    pub name: String,
}

#[derive(Parser)]
pub struct CreateArgs {
    #[clap(long)]
    pub name: String,

    #[clap(long = "account-type", default_value = "residential")]
    pub account_type: AccountType,

    #[clap(long = "energy-source")]
    pub energy_source: EnergySource,
}

impl From<CreateArgs> for Consumer {
    fn from(args: CreateArgs) -> Self {
        Self::builder()
            .full_name(args.name.trim())
            .account_type(args.account_type)
            .energy_source(args.energy_source)
            .build()
    }
}
