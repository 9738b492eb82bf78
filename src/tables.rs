use std::fmt::Write;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        billing::{AccountSummary, Bill},
        consumer::Consumer,
        registry::Registry,
        usage::{Period, UsageTable},
    },
    quantity::energy::KilowattHours,
};

/// Width of the longest bar in the usage charts.
const CHART_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

#[must_use]
pub fn build_appliances_table(consumer: &Consumer) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Appliance", "Power consumption", "Price"]);
    for appliance in consumer.appliances() {
        table.add_row(vec![
            Cell::new(appliance.name),
            Cell::new(appliance.consumption).set_alignment(CellAlignment::Right),
            Cell::new(appliance.price).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_consumers_table(registry: &Registry) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Full name", "Account type", "Energy source", "Appliances", "Updates"]);
    for consumer in registry.iter() {
        table.add_row(vec![
            Cell::new(&consumer.full_name),
            Cell::new(consumer.account_type),
            Cell::new(consumer.energy_source).fg(consumer.energy_source.color()),
            Cell::new(consumer.appliances.len()).set_alignment(CellAlignment::Right),
            Cell::new(consumer.usage_update_count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_bill_table(bill: &Bill) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Period", "Usage", "Bill"]);
    for entry in &bill.entries {
        table.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.usage).set_alignment(CellAlignment::Right),
            Cell::new(entry.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(bill.total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Horizontal bar chart of the usage table, bars scaled to the largest value.
#[must_use]
pub fn build_usage_chart(usage: &UsageTable) -> Table {
    let max_usage = usage.iter().map(|(_, usage)| usage).max().unwrap_or(KilowattHours::ZERO);
    let mut table = new_table();
    for (label, usage) in usage.iter() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(usage).set_alignment(CellAlignment::Right),
            Cell::new(bar(usage, max_usage)).fg(Color::Green),
        ]);
    }
    table
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bar(usage: KilowattHours, max_usage: KilowattHours) -> String {
    if max_usage <= KilowattHours::ZERO {
        return String::new();
    }
    let length = (usage.0 / max_usage.0 * CHART_WIDTH as f64).round() as usize;
    "█".repeat(length.min(CHART_WIDTH))
}

/// Usage tables with their charts, as shown after a usage update.
#[must_use]
pub fn render_usage_logs(consumer: &Consumer) -> String {
    let mut text = String::from("--- Usage Logs ---\n");
    for period in Period::ALL {
        let table = consumer.usage.table(period);
        let _ = writeln!(text, "\n{period} Usage:");
        if table.is_empty() {
            text.push_str("No usage recorded.\n");
        } else {
            let _ = writeln!(text, "{}", build_usage_chart(table));
        }
    }
    let _ = write!(text, "\nTotal usage updates: {}", consumer.usage_update_count);
    text
}

/// Read-only account information for the consumer.
#[must_use]
pub fn render_account_summary(consumer: &Consumer) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "--- Information Details for {} ---", consumer.full_name);
    let _ = writeln!(text, "Account type: {}", consumer.account_type);
    let _ = writeln!(text, "Energy source: {}", consumer.energy_source.info());
    let _ = writeln!(text, "\nUsage updates: {} times", consumer.usage_update_count);

    if consumer.appliances.is_empty() {
        text.push_str("\nNo appliances have been added for this account.");
        return text;
    }
    let _ = writeln!(text, "{}", build_appliances_table(consumer));

    let summary = AccountSummary::from(consumer);
    for period in Period::ALL {
        let _ = writeln!(text, "\n--- {period} Usage and Bill ---");
        let _ = writeln!(text, "{}", build_bill_table(summary.bill(period)));
        let usage = consumer.usage.table(period);
        if !usage.is_empty() {
            let _ = writeln!(text, "{}", build_usage_chart(usage));
        }
    }
    let _ = write!(
        text,
        "\nTotal carbon emissions over all recorded months: {}",
        summary.lifetime_emissions,
    );
    text
}
