//! Output for tabclean runs.
//!
//! - **csv**: clean table as CSV
//! - **summary**: records processed, kept and the amount total
//! - **report**: JSON report combining the log, stage counts and summary

pub mod csv;
pub mod error;
pub mod report;
pub mod summary;

pub use crate::csv::{to_csv_string, write_csv, write_csv_file};
pub use error::{OutputError, Result};
pub use report::CleanReport;
pub use summary::RunSummary;
