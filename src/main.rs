#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod error;
mod prelude;
mod quantity;
mod shell;
mod storage;
mod tables;

use std::io;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, export, import},
    core::consumer::Consumer,
    prelude::*,
    shell::{Console, Shell},
    tables::{build_consumers_table, render_account_summary},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let storage = args.storage()?;
    let mut registry = storage.load()?;

    match args.command.unwrap_or_default() {
        Command::Shell => {
            let console = Console::new(io::stdin().lock(), io::stdout().lock());
            Shell::new(console, &mut registry, &storage)
                .with_admin_password(args.admin_password.as_deref())
                .run()?;
        }
        Command::List => {
            println!("{}", build_consumers_table(&registry));
        }
        Command::Summary(summary_args) => {
            println!("{}", render_account_summary(registry.get(&summary_args.name)?));
        }
        Command::Create(create_args) => {
            let consumer = registry.add(Consumer::from(create_args));
            storage.save(consumer)?;
            info!(full_name = consumer.full_name, "created the consumer");
        }
        Command::Export => {
            print!("{}", export(&registry)?);
        }
        Command::Import(import_args) => {
            if import(&mut registry, &import_args)? != 0 {
                let n_failures = storage.save_all(&registry);
                ensure!(n_failures == 0, "failed to save {n_failures} consumer(s)");
            }
        }
    }

    info!("done!");
    Ok(())
}
