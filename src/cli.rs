mod consumers;
mod transfer;

use std::{env, path::PathBuf};

use clap::{Parser, Subcommand};

pub use self::{
    consumers::{CreateArgs, SummaryArgs},
    transfer::{ImportArgs, export, import},
};
use crate::{prelude::*, storage::Storage};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Directory with the consumer files, `Users` next to the executable by default.
    #[clap(long = "users-dir", env = "GREENBILL_USERS_DIR")]
    pub users_dir: Option<PathBuf>,

    /// Password for the admin menu, the menu is open when not set.
    #[clap(long = "admin-password", env = "GREENBILL_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn storage(&self) -> Result<Storage> {
        if let Some(users_dir) = &self.users_dir {
            return Ok(Storage::new(users_dir));
        }
        let executable = env::current_exe().context("failed to locate the executable")?;
        let parent = executable.parent().context("the executable has no parent directory")?;
        Ok(Storage::new(parent.join("Users")))
    }
}

#[derive(Default, Subcommand)]
pub enum Command {
    /// Interactive admin and user menus.
    #[default]
    #[clap(name = "shell")]
    Shell,

    /// Print the table of all consumers.
    #[clap(name = "list")]
    List,

    /// Print the account summary of the consumer.
    #[clap(name = "summary")]
    Summary(SummaryArgs),

    /// Create a consumer without appliances.
    #[clap(name = "create")]
    Create(CreateArgs),

    /// Print every consumer as a compact line.
    #[clap(name = "export")]
    Export,

    /// Append consumers from a file of compact lines.
    #[clap(name = "import")]
    Import(ImportArgs),
}
