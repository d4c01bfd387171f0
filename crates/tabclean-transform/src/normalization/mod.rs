//! The five normalization stages.
//!
//! - **header**: column name canonicalization
//! - **dedupe**: duplicate row removal
//! - **amount**: monetary text to numbers, with a fill value
//! - **status**: title-casing of status labels
//! - **date**: best-effort date parsing, dropping unrecoverable rows

pub mod amount;
pub mod date;
pub mod dedupe;
pub mod header;
pub mod status;

pub use amount::{AmountStats, amount_value, coerce_amount_column, parse_amount};
pub use date::{
    DateStats, ParsedDate, date_value, normalize_date_column, parse_calendar_date,
    parse_date_detailed,
};
pub use dedupe::dedupe_rows;
pub use header::{count_renamed, normalize_headers};
pub use status::{normalize_status_column, title_case};
