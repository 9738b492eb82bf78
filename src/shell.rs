mod console;
mod menu;

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};

pub use self::console::Console;
use self::{
    console::EndOfInput,
    menu::{AdminMenuItem, MainMenuItem, ModifyMenuItem, UserMenuItem},
};
use crate::{
    core::{account::AccountType, consumer::Consumer, registry::Registry, tariff::EnergySource},
    error::BillingError,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
    storage::Storage,
    tables::{
        build_appliances_table,
        build_consumers_table,
        render_account_summary,
        render_usage_logs,
    },
};

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Interactive menus for administrators and consumers.
///
/// Every change is followed by saving the whole registry.
pub struct Shell<'a, R, W> {
    console: Console<R, W>,
    registry: &'a mut Registry,
    storage: &'a Storage,
    admin_password: Option<&'a str>,
    today: fn() -> NaiveDate,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(console: Console<R, W>, registry: &'a mut Registry, storage: &'a Storage) -> Self {
        Self { console, registry, storage, admin_password: None, today: local_today }
    }

    /// Require the password to enter the admin menu.
    pub const fn with_admin_password(mut self, admin_password: Option<&'a str>) -> Self {
        self.admin_password = admin_password;
        self
    }

    pub const fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run the main menu until the user exits or the input ends, then save everything.
    #[instrument(skip_all)]
    pub fn run(&mut self) -> Result {
        let outcome = self.main_menu();
        self.save()?;
        match outcome {
            Err(error) if error.is::<EndOfInput>() => {
                info!("input closed");
                Ok(())
            }
            outcome => outcome,
        }
    }

    fn main_menu(&mut self) -> Result {
        loop {
            match self.console.ask_choice("Main Menu", &MainMenuItem::ALL)? {
                MainMenuItem::Admin => self.admin_menu()?,
                MainMenuItem::User => self.user_menu()?,
                MainMenuItem::Exit => {
                    self.console.say("Saving data and exiting…")?;
                    return Ok(());
                }
            }
        }
    }

    fn admin_menu(&mut self) -> Result {
        if let Some(admin_password) = self.admin_password
            && self.console.ask("Enter admin password: ")? != admin_password.trim()
        {
            warn!("admin access denied");
            return self.console.say("Invalid password. Access denied.");
        }
        loop {
            match self.console.ask_choice("Admin Menu", &AdminMenuItem::ALL)? {
                AdminMenuItem::CreateConsumer => self.create_consumer()?,
                AdminMenuItem::AddAppliances => self.add_appliances()?,
                AdminMenuItem::ViewAppliances => self.view_appliances()?,
                AdminMenuItem::RemoveAppliance => self.remove_appliance()?,
                AdminMenuItem::ViewConsumers => {
                    self.console.say(build_consumers_table(self.registry))?;
                }
                AdminMenuItem::UpdateUsage => self.update_usage()?,
                AdminMenuItem::ModifyAppliances => self.modify_appliances()?,
                AdminMenuItem::Back => return Ok(()),
            }
        }
    }

    fn user_menu(&mut self) -> Result {
        let Some(full_name) = self.ask_consumer("Enter your full name: ")? else {
            return Ok(());
        };
        loop {
            match self.console.ask_choice("Customer Menu", &UserMenuItem::ALL)? {
                UserMenuItem::ViewAccount => {
                    let consumer = self.registry.get(&full_name)?;
                    self.console.say(render_account_summary(consumer))?;
                }
                UserMenuItem::Back => return Ok(()),
            }
        }
    }

    #[instrument(skip_all)]
    fn create_consumer(&mut self) -> Result {
        let full_name = self.console.ask_text("Enter full name: ")?;
        let account_type = self
            .console
            .ask_choice("Account Type", &AccountType::all().collect::<Vec<_>>())?;
        let energy_source = self
            .console
            .ask_choice("Energy Source", &EnergySource::catalog().collect::<Vec<_>>())?;
        if self.registry.find(&full_name).is_some() {
            warn!(full_name, "a consumer with the same name already exists");
        }
        self.registry.add(
            Consumer::builder()
                .full_name(full_name.as_str())
                .account_type(account_type)
                .energy_source(energy_source)
                .build(),
        );
        info!(full_name, ?account_type, ?energy_source, "created the consumer");
        self.save()?;
        self.console.say("Consumer created successfully.")
    }

    fn add_appliances(&mut self) -> Result {
        let Some(full_name) = self.ask_consumer("Enter the full name of the consumer: ")? else {
            return Ok(());
        };
        loop {
            let name = self.console.ask_text("Enter appliance name: ")?;
            let consumption: KilowattHours =
                self.console.ask_number("Enter appliance power consumption (kWh): ")?;
            let price: Cost = self.console.ask_number("Enter price for this appliance: ")?;
            self.registry.get_mut(&full_name)?.add_appliance(name.as_str(), consumption, price);
            info!(full_name, name, ?consumption, ?price, "added the appliance");
            self.console.say("Appliance added successfully.")?;
            if !self.console.ask_yes("Do you want to add another appliance? (y/n): ")? {
                break;
            }
        }
        self.save()?;
        self.console.say("Data saved successfully.")
    }

    fn view_appliances(&mut self) -> Result {
        let Some(full_name) = self.ask_consumer("Enter the full name of the consumer: ")? else {
            return Ok(());
        };
        let consumer = self.registry.get(&full_name)?;
        if consumer.appliances.is_empty() {
            self.console.say(format_args!("Consumer {} has no appliances added.", consumer.full_name))
        } else {
            self.console.say(build_appliances_table(consumer))
        }
    }

    fn remove_appliance(&mut self) -> Result {
        let Some(full_name) = self.ask_consumer("Enter the full name of the consumer: ")? else {
            return Ok(());
        };
        let name = self.console.ask_text("Enter the appliance name to remove: ")?;
        match self.registry.get_mut(&full_name)?.remove_appliance(&name) {
            Ok(_) => {
                info!(full_name, name, "removed the appliance");
                self.save()?;
                self.console.say("Appliance removed successfully.")
            }
            Err(error) => self.report(&error),
        }
    }

    #[instrument(skip_all)]
    fn update_usage(&mut self) -> Result {
        let Some(full_name) = self.ask_consumer("Enter the full name of the consumer: ")? else {
            return Ok(());
        };
        let consumer = self.registry.get_mut(&full_name)?;
        let update = consumer.record_usage((self.today)());
        info!(full_name, total = ?update.total, update.update_count, "recorded the usage");
        self.save()?;
        self.console.say(format_args!(
            "Usage logs updated: {} consumed today.\nTotal updates: {}\n",
            update.total, update.update_count,
        ))?;
        self.console.say(render_usage_logs(self.registry.get(&full_name)?))
    }

    fn modify_appliances(&mut self) -> Result {
        let Some(full_name) = self.ask_consumer("Enter the full name of the consumer: ")? else {
            return Ok(());
        };
        {
            let consumer = self.registry.get(&full_name)?;
            self.console.say(format_args!("\n--- Consumer Found: {} ---", consumer.full_name))?;
            self.console.say(format_args!("Account type: {}", consumer.account_type))?;
            self.console.say(format_args!("Energy source: {}", consumer.energy_source.info()))?;
            self.console.say("\nAppliances:")?;
            self.console.say(build_appliances_table(consumer))?;
        }
        loop {
            let item = self.console.ask_choice("Update Appliances", &ModifyMenuItem::ALL)?;
            if item == ModifyMenuItem::Back {
                return Ok(());
            }
            let Some(name) = self.ask_appliance(&full_name)? else {
                continue;
            };
            let consumer = self.registry.get_mut(&full_name)?;
            match item {
                ModifyMenuItem::ChangeConsumption => {
                    let consumption: KilowattHours =
                        self.console.ask_number("Enter the new power consumption (kWh): ")?;
                    consumer.set_consumption(&name, consumption)?;
                    self.console.say(format_args!(
                        "Power consumption for `{name}` updated to {consumption}."
                    ))?;
                }
                ModifyMenuItem::ChangePrice => {
                    let price: Cost = self.console.ask_number("Enter the new price: ")?;
                    consumer.set_price(&name, price)?;
                    self.console.say(format_args!("Price for `{name}` updated to {price}."))?;
                }
                ModifyMenuItem::Rename => {
                    let new_name = self.console.ask_text("Enter the new appliance name: ")?;
                    if let Err(error) = consumer.rename_appliance(&name, new_name.as_str()) {
                        self.report(&error)?;
                        continue;
                    }
                    self.console.say(format_args!("Appliance `{name}` renamed to `{new_name}`."))?;
                }
                ModifyMenuItem::Back => return Ok(()),
            }
            info!(full_name, name, ?item, "modified the appliance");
            self.save()?;
        }
    }

    fn ask_appliance(&mut self, full_name: &str) -> Result<Option<String>> {
        let name = self.console.ask_text("Enter the name of the appliance to update: ")?;
        if self.registry.get(full_name)?.appliances.contains_key(&name) {
            Ok(Some(name))
        } else {
            self.report(&BillingError::ApplianceNotFound(name))?;
            Ok(None)
        }
    }

    /// Ask for a consumer's full name and check that the consumer exists.
    fn ask_consumer(&mut self, prompt: &str) -> Result<Option<String>> {
        let full_name = self.console.ask_text(prompt)?;
        if self.registry.find(&full_name).is_some() {
            Ok(Some(full_name))
        } else {
            self.report(&BillingError::ConsumerNotFound(full_name))?;
            Ok(None)
        }
    }

    fn report(&mut self, error: &BillingError) -> Result {
        warn!("{error}");
        self.console.say(format_args!("Error: {error}."))
    }

    fn save(&mut self) -> Result {
        let n_failures = self.storage.save_all(self.registry);
        if n_failures != 0 {
            self.console.say(format_args!("Failed to save {n_failures} consumer(s), see the log."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::core::consumer::tests::{jane_doe, today};

    fn run(
        registry: &mut Registry,
        storage: &Storage,
        admin_password: Option<&str>,
        input: &str,
    ) -> Result<String> {
        let mut output = Vec::new();
        Shell::new(Console::new(Cursor::new(input.as_bytes()), &mut output), registry, storage)
            .with_admin_password(admin_password)
            .with_clock(today)
            .run()?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn test_create_consumer_and_update_usage() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry = Registry::default();
        let input = "1\n1\nJane Doe\n1\n1\n\
                     2\njane doe\nFridge\n5\n120\ny\nTV\n1.5\n300\nn\n\
                     6\nJane Doe\n8\n3\n";

        let output = run(&mut registry, &storage, None, input)?;

        assert!(output.contains("Consumer created successfully."));
        assert!(output.contains("Usage logs updated: 6.50 kWh consumed today."));
        assert!(output.contains("Total updates: 1"));
        let consumer = registry.get("Jane Doe")?;
        assert_eq!(consumer.account_type, AccountType::Residential);
        assert_eq!(consumer.energy_source, EnergySource::Solar);
        assert_eq!(consumer.appliances.len(), 2);
        assert_eq!(consumer.usage.weekly.get("Week 42"), Some(KilowattHours(6.5)));
        assert_eq!(storage.load()?, registry);
        Ok(())
    }

    #[test]
    fn test_wrong_admin_password() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry = Registry::default();

        let output = run(&mut registry, &storage, Some("secret"), "1\nwrong\n3\n")?;

        assert!(output.contains("Invalid password. Access denied."));
        assert!(!output.contains("Admin Menu ---"));
        assert!(registry.is_empty());
        Ok(())
    }

    #[test]
    fn test_user_views_account() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut consumer = jane_doe();
        let _ = consumer.record_usage(today());
        let mut registry: Registry = [consumer].into_iter().collect();

        let output = run(&mut registry, &storage, Some("secret"), "2\nJANE DOE\n1\n2\n3\n")?;

        assert!(output.contains("--- Information Details for Jane Doe ---"));
        assert!(output.contains("Total carbon emissions over all recorded months: 0.03 kg"));
        Ok(())
    }

    #[test]
    fn test_modify_appliances() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry: Registry = [jane_doe()].into_iter().collect();
        let input = "1\n7\nJane Doe\n3\nFridge\nFreezer\n1\nTV\n2\n2\nRadio\n4\n8\n3\n";

        let output = run(&mut registry, &storage, None, input)?;

        assert!(output.contains("Appliance `Fridge` renamed to `Freezer`."));
        assert!(output.contains("Error: appliance `Radio` not found."));
        let consumer = registry.get("Jane Doe")?;
        assert_eq!(consumer.appliances.keys().collect::<Vec<_>>(), ["TV", "Freezer"]);
        assert_eq!(consumer.appliances["TV"], KilowattHours(2.0));
        assert_eq!(consumer.appliance_price("Freezer"), Cost(120.0));
        Ok(())
    }

    #[test]
    fn test_rename_onto_existing_appliance_is_reported() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry: Registry = [jane_doe()].into_iter().collect();

        let output = run(&mut registry, &storage, None, "1\n7\nJane Doe\n3\nTV\nFridge\n4\n8\n3\n")?;

        assert!(output.contains("Error: appliance `Fridge` already exists."));
        let consumer = storage.load()?.get("Jane Doe")?.clone();
        assert_eq!(consumer.appliances.len(), 2);
        assert_eq!(consumer.appliances["Fridge"], KilowattHours(5.0));
        Ok(())
    }

    #[test]
    fn test_admin_password_with_surrounding_whitespace() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry = Registry::default();

        let output = run(&mut registry, &storage, Some(" secret "), "1\n secret \n8\n3\n")?;

        assert!(!output.contains("Access denied"));
        assert!(output.contains("--- Admin Menu ---"));
        Ok(())
    }

    #[test]
    fn test_remove_appliance() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry: Registry = [jane_doe()].into_iter().collect();

        run(&mut registry, &storage, None, "1\n4\nJane Doe\nTV\n8\n3\n")?;

        let consumer = registry.get("Jane Doe")?;
        assert_eq!(consumer.appliances.keys().collect::<Vec<_>>(), ["Fridge"]);
        assert!(!consumer.appliance_prices.contains_key("TV"));
        Ok(())
    }

    #[test]
    fn test_unknown_consumer() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry = Registry::default();

        let output = run(&mut registry, &storage, None, "1\n3\nJohn Smith\n8\n3\n")?;

        assert!(output.contains("Error: consumer `John Smith` not found."));
        Ok(())
    }

    #[test]
    fn test_end_of_input_saves() -> Result {
        let root = tempfile::tempdir()?;
        let storage = Storage::new(root.path());
        let mut registry: Registry = [jane_doe()].into_iter().collect();

        run(&mut registry, &storage, None, "1\n")?;

        assert!(storage.path_of("Jane Doe").is_file());
        Ok(())
    }
}
