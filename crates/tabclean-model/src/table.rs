//! In-memory table with a fixed, ordered header.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cell::CellValue;
use crate::error::{CleanError, Result};

/// One row, positionally aligned with [`Table::columns`].
pub type Row = Vec<CellValue>;

/// An ordered sequence of rows sharing one header.
///
/// Every row holds exactly one cell per column and column names are unique.
/// Both invariants are checked on construction and on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        check_unique(&columns)?;
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a table from a header and its rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut table = Self::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row, rejecting it if its width does not match the header.
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CleanError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(index)))
    }

    /// Cell at a row and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Replace the header, keeping row data untouched.
    pub fn rename_columns(self, columns: Vec<String>) -> Result<Self> {
        if columns.len() != self.columns.len() {
            return Err(CleanError::RowWidth {
                row: 0,
                expected: self.columns.len(),
                found: columns.len(),
            });
        }
        check_unique(&columns)?;
        Ok(Self {
            columns,
            rows: self.rows,
        })
    }

    /// Keep only rows for which the predicate returns true, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Rewrite every cell of one column in place.
    ///
    /// Does nothing when `index` is out of range.
    pub fn map_column<F>(&mut self, index: usize, mut map: F)
    where
        F: FnMut(CellValue) -> CellValue,
    {
        if index >= self.columns.len() {
            return;
        }
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                let current = std::mem::replace(cell, CellValue::Missing);
                *cell = map(current);
            }
        }
    }
}

fn check_unique(columns: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for name in columns {
        if !seen.insert(name.as_str()) {
            return Err(CleanError::DuplicateColumn { name: name.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".into(), "amount".into()],
            vec![
                vec![CellValue::text("A"), CellValue::Number(1.0)],
                vec![CellValue::text("B"), CellValue::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_ragged_row() {
        let mut table = sample();
        let err = table.push_row(vec![CellValue::Missing]).unwrap_err();
        assert_eq!(
            err,
            CleanError::RowWidth {
                row: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let err = Table::new(vec!["a".into(), "a".into()]).unwrap_err();
        assert_eq!(err, CleanError::DuplicateColumn { name: "a".into() });
    }

    #[test]
    fn test_column_access() {
        let table = sample();
        let amounts: Vec<_> = table.column("amount").unwrap().cloned().collect();
        assert_eq!(amounts, vec![CellValue::Number(1.0), CellValue::Missing]);
        assert_eq!(table.cell(1, "id"), Some(&CellValue::text("B")));
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_map_and_retain() {
        let mut table = sample();
        table.map_column(1, |cell| match cell {
            CellValue::Missing => CellValue::Number(0.0),
            other => other,
        });
        assert_eq!(table.cell(1, "amount"), Some(&CellValue::Number(0.0)));
        table.retain_rows(|row| row[0] != CellValue::text("A"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rename_keeps_rows() {
        let table = sample()
            .rename_columns(vec!["txn".into(), "total".into()])
            .unwrap();
        assert_eq!(table.columns(), ["txn", "total"]);
        assert_eq!(table.len(), 2);
    }
}
