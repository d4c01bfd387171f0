//! Duplicate row removal.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use tabclean_model::{CellValue, CleanOptions, ColumnRole, ColumnRoles, DedupeMode, Table};

use super::amount::amount_value;
use super::date::date_value;
use super::status::title_case;

/// Hashable, totally ordered image of a cell used as a row key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CellKey {
    Missing,
    Number(u64),
    Date(NaiveDate),
    Text(String),
}

impl CellKey {
    fn exact(cell: &CellValue) -> Self {
        match cell {
            CellValue::Text(value) => Self::Text(value.clone()),
            CellValue::Number(value) => Self::number(*value),
            CellValue::Date(value) => Self::Date(*value),
            CellValue::Missing => Self::Missing,
        }
    }

    fn number(value: f64) -> Self {
        // -0.0 == 0.0 and every NaN is the same key.
        let canonical = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        Self::Number(canonical.to_bits())
    }

    /// Key of the value the later stages will write for this cell.
    fn canonical(cell: &CellValue, role: ColumnRole, options: &CleanOptions) -> Self {
        match role {
            ColumnRole::Amount => {
                Self::number(amount_value(cell).unwrap_or(options.amount_fill))
            }
            ColumnRole::Status => match cell {
                CellValue::Text(value) => Self::Text(title_case(value)),
                other => Self::exact(other),
            },
            ColumnRole::Date => match date_value(cell, options.date_order) {
                Some(parsed) => Self::Date(parsed.date),
                None => Self::exact(cell),
            },
            _ => Self::exact(cell),
        }
    }
}

/// Remove rows that repeat an earlier row, keeping the first occurrence.
///
/// Returns the reduced table and the number of rows removed. Row order is
/// preserved.
///
/// In [`DedupeMode::Canonical`] (the default) the removed count can exceed
/// the number of byte-identical duplicates: rows such as `"PAID"` and
/// `"paid"` or `"1,000"` and `1000` count as duplicates because the later
/// stages would make them equal. The output then holds no two equal rows
/// and a second run removes nothing. [`DedupeMode::Exact`] compares stored
/// values only.
pub fn dedupe_rows(mut table: Table, roles: &ColumnRoles, options: &CleanOptions) -> (Table, usize) {
    let before = table.len();
    let mut seen: BTreeSet<Vec<CellKey>> = BTreeSet::new();
    table.retain_rows(|row| {
        let key: Vec<CellKey> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| match options.dedupe {
                DedupeMode::Exact => CellKey::exact(cell),
                DedupeMode::Canonical => CellKey::canonical(cell, roles.role(index), options),
            })
            .collect();
        seen.insert(key)
    });
    let removed = before - table.len();
    (table, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(vec!["id".into(), "amount".into(), "status".into()], rows).unwrap()
    }

    fn row(id: &str, amount: CellValue, status: &str) -> Vec<CellValue> {
        vec![CellValue::text(id), amount, CellValue::text(status)]
    }

    #[test]
    fn test_removes_exact_duplicates_keeping_first() {
        let input = table(vec![
            row("A", CellValue::Number(1.0), "Paid"),
            row("B", CellValue::Number(2.0), "Paid"),
            row("A", CellValue::Number(1.0), "Paid"),
        ]);
        let roles = ColumnRoles::resolve(input.columns());
        let (output, removed) = dedupe_rows(input, &roles, &CleanOptions::default());
        assert_eq!(removed, 1);
        assert_eq!(output.len(), 2);
        assert_eq!(output.cell(1, "id"), Some(&CellValue::text("B")));
    }

    #[test]
    fn test_canonical_mode_matches_normalized_values() {
        let input = table(vec![
            row("A", CellValue::text("1,000"), "PAID"),
            row("A", CellValue::Number(1000.0), "paid"),
        ]);
        let roles = ColumnRoles::resolve(input.columns());
        let (output, removed) = dedupe_rows(input.clone(), &roles, &CleanOptions::default());
        assert_eq!(removed, 1);
        assert_eq!(output.cell(0, "amount"), Some(&CellValue::text("1,000")));

        let exact = CleanOptions::default().with_dedupe(DedupeMode::Exact);
        let (_, removed) = dedupe_rows(input, &roles, &exact);
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_missing_amount_matches_fill() {
        let input = table(vec![
            row("A", CellValue::Missing, "Paid"),
            row("A", CellValue::Number(0.0), "Paid"),
        ]);
        let roles = ColumnRoles::resolve(input.columns());
        let (_, removed) = dedupe_rows(input, &roles, &CleanOptions::default());
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let input = table(vec![
            row("A", CellValue::Number(1.0), "Paid"),
            row("A", CellValue::Number(1.0), "Paid"),
        ]);
        let roles = ColumnRoles::resolve(input.columns());
        let options = CleanOptions::default();
        let (once, _) = dedupe_rows(input, &roles, &options);
        let (twice, removed) = dedupe_rows(once.clone(), &roles, &options);
        assert_eq!(removed, 0);
        assert_eq!(once, twice);
    }
}
