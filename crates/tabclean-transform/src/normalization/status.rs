//! Status casing.

use tabclean_model::{CellValue, Table};

/// Title-case a string: the first letter of every whitespace-separated word
/// upper-cased, all other letters lower-cased. Whitespace is preserved.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.chars() {
        if ch.is_whitespace() {
            out.push(ch);
            word_start = true;
        } else if word_start {
            let mut upper = ch.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            // Multi-char expansions ("ß" -> "SS") keep only the lead upper-case.
            out.extend(upper.flat_map(char::to_lowercase));
            word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Title-case every text cell of the column at `index`.
///
/// Returns the table and the number of cells whose text changed. Non-text
/// cells are left untouched.
pub fn normalize_status_column(mut table: Table, index: usize) -> (Table, usize) {
    let mut changed = 0usize;
    table.map_column(index, |cell| match cell {
        CellValue::Text(value) => {
            let cased = title_case(&value);
            if cased != value {
                changed += 1;
            }
            CellValue::Text(cased)
        }
        other => other,
    });
    (table, changed)
}
