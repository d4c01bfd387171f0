//! Best-effort calendar date parsing.
//!
//! Values are tried against an ordered list of representations and the first
//! one that yields a valid calendar date wins:
//!
//! 1. Year-first numeric forms (`2024-01-15`, `2024/01/15`, `20240115`)
//! 2. ISO 8601 date-times (`2024-01-15T10:30:00Z`, `2024-01-15 10:30`)
//! 3. Month-name forms (`Jan 3, 2024`, `3 January 2024`, `03-Jan-2024`)
//! 4. Numeric `A/B/YYYY` forms, read month-first or day-first according to
//!    [`DateOrder`]; when only one reading is a real date it wins
//! 5. The same numeric forms with two-digit years
//!
//! Date-times keep their date part only. Years outside 1000-9999 are rejected
//! so every accepted value renders as `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use tabclean_model::{CellValue, DateOrder, Table};

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const YEAR_FIRST_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

// `%b` only takes three-letter abbreviations; `%B` takes full names too.
const MONTH_NAME_FORMATS: [&str; 15] = [
    "%b %d, %Y", // Jan 3, 2024
    "%B %d, %Y", // January 3, 2024
    "%b %d %Y",  // Jan 3 2024
    "%B %d %Y",  // January 3 2024
    "%d %b %Y",  // 3 Jan 2024
    "%d %B %Y",  // 3 January 2024
    "%d %b, %Y", // 3 Jan, 2024
    "%d %B, %Y", // 3 January, 2024
    "%d-%b-%Y",  // 03-Jan-2024
    "%d-%B-%Y",  // 03-January-2024
    "%d-%b-%y",  // 03-Jan-24
    "%Y-%b-%d",  // 2024-Jan-03
    "%Y-%B-%d",  // 2024-January-03
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
];

const NUMERIC_SEPARATORS: [char; 3] = ['/', '-', '.'];

/// A successfully parsed date and how it was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    /// Both month-first and day-first readings were valid and differed, so
    /// the configured [`DateOrder`] decided.
    pub ambiguous: bool,
}

/// Parse a string into a calendar date.
pub fn parse_calendar_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    parse_date_detailed(value, order).map(|parsed| parsed.date)
}

/// Parse a string into a calendar date, reporting ambiguity.
pub fn parse_date_detailed(value: &str, order: DateOrder) -> Option<ParsedDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let unambiguous = |date| ParsedDate {
        date,
        ambiguous: false,
    };

    if let Some(date) = try_formats(trimmed, &YEAR_FIRST_FORMATS) {
        return Some(unambiguous(date));
    }
    if let Some(date) = try_datetime(trimmed) {
        return Some(unambiguous(date));
    }
    if let Some(date) = try_formats(trimmed, &MONTH_NAME_FORMATS) {
        return Some(unambiguous(date));
    }
    try_numeric(trimmed, order, "%Y").or_else(|| try_numeric(trimmed, order, "%y"))
}

/// Date value of a cell, or `None` when the row must be dropped.
pub fn date_value(cell: &CellValue, order: DateOrder) -> Option<ParsedDate> {
    match cell {
        CellValue::Date(date) => Some(ParsedDate {
            date: *date,
            ambiguous: false,
        }),
        CellValue::Text(value) => parse_date_detailed(value, order),
        CellValue::Number(_) | CellValue::Missing => None,
    }
}

/// Counts gathered while normalizing a date column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateStats {
    /// Text cells converted to dates.
    pub converted: usize,
    /// Rows removed because their date could not be recovered.
    pub dropped: usize,
    /// Values resolved by the month/day order preference.
    pub ambiguous: usize,
}

/// Parse the column at `index` into dates and drop rows that fail.
pub fn normalize_date_column(mut table: Table, index: usize, order: DateOrder) -> (Table, DateStats) {
    let mut stats = DateStats::default();
    let before = table.len();
    table.map_column(index, |cell| match date_value(&cell, order) {
        Some(parsed) => {
            if parsed.ambiguous {
                stats.ambiguous += 1;
            }
            if !matches!(cell, CellValue::Date(_)) {
                stats.converted += 1;
            }
            CellValue::Date(parsed.date)
        }
        None => CellValue::Missing,
    });
    table.retain_rows(|row| matches!(row.get(index), Some(CellValue::Date(_))));
    stats.dropped = before - table.len();
    if stats.ambiguous > 0 {
        debug!(
            ambiguous = stats.ambiguous,
            order = ?order,
            "resolved ambiguous numeric dates by order preference"
        );
    }
    (table, stats)
}

fn try_formats(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(|date| in_range(*date))
}

fn try_datetime(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        let date = dt.date_naive();
        return in_range(date).then_some(date);
    }
    DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .find(|date| in_range(*date))
}

/// Read `A<sep>B<sep>YEAR` both ways and pick according to `order`.
fn try_numeric(value: &str, order: DateOrder, year: &str) -> Option<ParsedDate> {
    for sep in NUMERIC_SEPARATORS {
        if !value.contains(sep) {
            continue;
        }
        let month_first = format!("%m{sep}%d{sep}{year}");
        let day_first = format!("%d{sep}%m{sep}{year}");
        let as_month_first = parse_in_range(value, &month_first);
        let as_day_first = parse_in_range(value, &day_first);
        let (preferred, fallback) = match order {
            DateOrder::MonthFirst => (as_month_first, as_day_first),
            DateOrder::DayFirst => (as_day_first, as_month_first),
        };
        match (preferred, fallback) {
            (Some(date), Some(other)) => {
                return Some(ParsedDate {
                    date,
                    ambiguous: date != other,
                });
            }
            (Some(date), None) | (None, Some(date)) => {
                return Some(ParsedDate {
                    date,
                    ambiguous: false,
                });
            }
            (None, None) => {}
        }
    }
    None
}

fn parse_in_range(value: &str, fmt: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, fmt)
        .ok()
        .filter(|date| in_range(*date))
}

fn in_range(date: NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}
