//! Amount coercion: free-form monetary text to numbers.

use tabclean_model::{CellValue, Table};

/// Thousands separator stripped before parsing.
const THOUSANDS_SEPARATOR: char = ',';

/// Parse a monetary string such as `"1,000"` or `" 250.50 "`.
///
/// Returns `None` for empty, non-numeric and non-finite input.
pub fn parse_amount(value: &str) -> Option<f64> {
    let stripped: String = value
        .chars()
        .filter(|ch| *ch != THOUSANDS_SEPARATOR)
        .collect();
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Numeric value of a cell, or `None` when the cell must be filled.
pub fn amount_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(value) if value.is_finite() => Some(*value),
        CellValue::Text(value) => parse_amount(value),
        CellValue::Number(_) | CellValue::Date(_) | CellValue::Missing => None,
    }
}

/// Counts gathered while coercing a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountStats {
    /// Text cells converted to numbers.
    pub converted: usize,
    /// Cells replaced by the fill value.
    pub filled: usize,
}

/// Coerce every cell of the column at `index` to a number.
pub fn coerce_amount_column(mut table: Table, index: usize, fill: f64) -> (Table, AmountStats) {
    let mut stats = AmountStats::default();
    table.map_column(index, |cell| match amount_value(&cell) {
        Some(value) => {
            if !matches!(cell, CellValue::Number(_)) {
                stats.converted += 1;
            }
            CellValue::Number(value)
        }
        None => {
            stats.filled += 1;
            CellValue::Number(fill)
        }
    });
    (table, stats)
}
