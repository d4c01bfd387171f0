//! Data model for the tabclean normalization pipeline.
//!
//! - **cell**: tagged cell values (`Text`, `Number`, `Date`, `Missing`)
//! - **table**: row-oriented table with a fixed header
//! - **role**: column roles and header canonicalization
//! - **log**: the user-facing, append-only execution log
//! - **options**: pipeline configuration

pub mod cell;
pub mod error;
pub mod log;
pub mod options;
pub mod role;
pub mod table;

pub use cell::{CellValue, DATE_FORMAT, format_number};
pub use error::{CleanError, Result};
pub use log::{CleanLog, LogEntry, Stage};
pub use options::{CleanOptions, DateOrder, DedupeMode};
pub use role::{ColumnRole, ColumnRoles, normalize_column_name};
pub use table::{Row, Table};
