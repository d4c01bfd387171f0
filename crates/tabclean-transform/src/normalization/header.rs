//! Header canonicalization.

use std::collections::BTreeMap;

use tabclean_model::{CleanError, Result, Table, normalize_column_name};

/// Rename every column to its canonical form.
///
/// Fails with [`CleanError::HeaderCollision`] when two distinct names map to
/// the same header, so values of different columns are never merged.
pub fn normalize_headers(table: Table) -> Result<Table> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    let mut renamed = Vec::with_capacity(table.width());
    for original in table.columns() {
        let normalized = normalize_column_name(original);
        if let Some(first) = seen.get(&normalized) {
            return Err(CleanError::HeaderCollision {
                first: (*first).to_string(),
                second: original.clone(),
                normalized,
            });
        }
        seen.insert(normalized.clone(), original);
        renamed.push(normalized);
    }
    table.rename_columns(renamed)
}

/// Number of columns whose name changes under canonicalization.
pub fn count_renamed(columns: &[String]) -> usize {
    columns
        .iter()
        .filter(|name| normalize_column_name(name) != **name)
        .count()
}
