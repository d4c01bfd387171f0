use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabclean_cli::pipeline::CleanRun;
use tabclean_model::{CellValue, Table as DataTable};
use tabclean_output::RunSummary;
use tabclean_transform::StageReport;

pub fn print_run(run: &CleanRun, preview: usize) {
    print_preview("Raw data", &run.raw, preview);
    println!();
    print_preview("Clean data", &run.outcome.table, preview);
    println!();
    print_log(run);
    println!();
    print_summary(&run.summary);
}

fn print_preview(title: &str, data: &DataTable, limit: usize) {
    println!("{title} ({} rows, {} columns):", data.len(), data.width());
    if limit == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(data.columns().iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in data.rows().iter().take(limit) {
        table.add_row(row.iter().map(value_cell));
    }
    println!("{table}");
    if data.len() > limit {
        println!("... {} more rows", data.len() - limit);
    }
}

fn print_log(run: &CleanRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Log"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Changed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for entry in &run.outcome.log {
        let report = run.outcome.report(entry.stage);
        table.add_row(vec![
            Cell::new(entry.stage)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.message),
            count_cell(report.map(|r| r.rows_before)),
            count_cell(report.map(|r| r.rows_after)),
            count_cell(report.map(changed_cells)),
        ]);
    }
    println!("Execution log:");
    println!("{table}");
}

fn print_summary(summary: &RunSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Records processed"),
        Cell::new(summary.records_processed),
    ]);
    table.add_row(vec![
        Cell::new("Valid records"),
        Cell::new(summary.records_kept).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Removed"),
        count_cell(Some(summary.records_removed())),
    ]);
    table.add_row(vec![
        Cell::new("Total amount")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        match summary.total_amount {
            Some(total) => Cell::new(format_currency(total)).add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        },
    ]);
    println!("Summary:");
    println!("{table}");
}

fn changed_cells(report: &StageReport) -> usize {
    report.cells_changed + report.cells_filled
}

/// `$1,234.50` style formatting with thousands separators.
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Missing => dim_cell("NaN"),
        CellValue::Number(_) => Cell::new(value.render()).set_alignment(CellAlignment::Right),
        CellValue::Text(_) | CellValue::Date(_) => Cell::new(value.render()),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(Color::Yellow),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(950.5), "$950.50");
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-2500.0), "-$2,500.00");
    }
}
