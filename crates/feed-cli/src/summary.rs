use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use feed_core::{CompileReport, CompiledFeed};
use feed_model::GroupFailure;
use feed_report::ParsedFeed;

/// Print the compile summary to stderr so stdout can carry the feed itself.
pub fn print_compile_summary(feed: &CompiledFeed, output: Option<&Path>) {
    eprintln!("Generated: {}", feed.generated_at.format("%Y-%m-%d %H:%M"));
    if let Some(path) = output {
        eprintln!("Feed: {}", path.display());
    }
    eprintln!("{}", report_table(&feed.report));
    if let Some(table) = skipped_table(&feed.report.skipped) {
        eprintln!("{table}");
    }
}

pub fn report_table(report: &CompileReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Primary rows"), Cell::new(report.primary_rows)]);
    table.add_row(vec![Cell::new("Secondary rows"), Cell::new(report.secondary_rows)]);
    table.add_row(vec![Cell::new("Product groups"), Cell::new(report.groups)]);
    table.add_row(vec![
        Cell::new("Groups emitted"),
        Cell::new(report.emitted_groups()),
    ]);
    table.add_row(vec![
        Cell::new("Groups skipped"),
        count_cell(report.skipped.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Offers")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.offers).add_attribute(Attribute::Bold),
    ]);
    table
}

/// One row per skipped group, or `None` when nothing was skipped.
pub fn skipped_table(skipped: &[GroupFailure]) -> Option<Table> {
    if skipped.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product Code"),
        header_cell("Kind"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for failure in skipped {
        let (kind, color) = if failure.is_validation() {
            ("validation", Color::Yellow)
        } else {
            ("build", Color::Red)
        };
        let code = match failure.product_code() {
            "" => dim_cell("(blank)"),
            code => Cell::new(code),
        };
        table.add_row(vec![
            code,
            Cell::new(kind).fg(color),
            Cell::new(failure.to_string()),
        ]);
    }
    Some(table)
}

/// Offer listing of a parsed feed.
pub fn offers_table(feed: &ParsedFeed) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Offer"),
        header_cell("Group"),
        header_cell("Name"),
        header_cell("Price"),
        header_cell("Pictures"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for offer in &feed.offers {
        let is_main = offer.id.ends_with("_main");
        let id_cell = if is_main {
            Cell::new(&offer.id)
        } else {
            Cell::new(format!("  -> {}", offer.id)).fg(Color::DarkGrey)
        };
        let kind = offer
            .params
            .last()
            .map(|(_, value)| value.as_str())
            .unwrap_or_default();
        table.add_row(vec![
            id_cell,
            Cell::new(offer.group_id),
            Cell::new(offer.field("name").unwrap_or_default()),
            Cell::new(offer.field("price").unwrap_or_default()),
            count_cell(offer.pictures.len(), Color::Green),
            Cell::new(kind),
        ]);
    }
    table
}

pub fn print_feed(feed: &ParsedFeed) {
    println!("Shop: {} ({})", feed.shop.name, feed.shop.url);
    println!("Generated: {}", feed.date);
    println!("{}", offers_table(feed));
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
