//! Terminal summaries for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sleep_cli::pipeline::{ExportOutcome, ImportOutcome};
use sleep_store::{EnsuredUser, User};

pub fn print_export_summary(outcome: &ExportOutcome) {
    println!("Source: {}", outcome.source);
    println!("Output: {}", outcome.path.display());

    let mut table = summary_table();
    table.add_row(vec![label_cell("Payload"), Cell::new(outcome.shape)]);
    table.add_row(vec![label_cell("Format"), Cell::new(outcome.format)]);
    table.add_row(vec![
        label_cell("Records exported"),
        count_cell(outcome.records, Color::Green),
    ]);
    table.add_row(vec![
        label_cell("Entries skipped"),
        count_cell(outcome.skipped, Color::Yellow),
    ]);
    align_values(&mut table);
    println!("{table}");
}

pub fn print_import_summary(outcome: &ImportOutcome, dry_run: bool) {
    if dry_run {
        println!("Dry run: nothing was written to the database");
    }
    println!(
        "Found {} completed, dated records out of {} total",
        outcome.selected, outcome.read
    );

    let mut table = summary_table();
    table.add_row(vec![label_cell("Records read"), Cell::new(outcome.read)]);
    table.add_row(vec![label_cell("Completed"), Cell::new(outcome.completed)]);
    table.add_row(vec![label_cell("Selected"), Cell::new(outcome.selected)]);
    table.add_row(vec![
        label_cell("Excluded (incomplete)"),
        count_cell(outcome.incomplete, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Excluded (no date)"),
        count_cell(outcome.undated, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Imported"),
        count_cell(outcome.report.imported, Color::Green),
    ]);
    table.add_row(vec![label_cell("Batches"), Cell::new(outcome.report.batches)]);
    table.add_row(vec![
        label_cell("Stored for user").add_attribute(Attribute::Bold),
        Cell::new(outcome.stored_total).add_attribute(Attribute::Bold),
    ]);
    align_values(&mut table);
    println!("{table}");
}

pub fn print_user(ensured: &EnsuredUser) {
    let email = ensured.user.email.as_deref().unwrap_or("-");
    match &ensured.password {
        Some(password) => {
            println!("Created user {email} ({})", ensured.user.id);
            println!("Password: {password}");
        }
        None => println!(
            "Using existing user {email} ({}), password unchanged",
            ensured.user.id
        ),
    }
}

pub fn print_updated_user(user: &User) {
    let email = user.email.as_deref().unwrap_or("-");
    println!("Updated user {} to {email}", user.id);
}

fn summary_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
    table
}

fn align_values(table: &mut Table) {
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}
