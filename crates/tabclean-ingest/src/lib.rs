//! CSV ingestion for tabclean.
//!
//! Loads a delimited file with one header row into a
//! [`Table`](tabclean_model::Table). Headers are kept raw so the pipeline
//! can report what it renamed.

pub mod csv;
pub mod error;

pub use crate::csv::{
    CsvHeaders, DEFAULT_NA_VALUES, IngestOptions, MAX_CSV_FILE_SIZE, read_csv_from_reader,
    read_csv_table,
};
pub use error::{IngestError, Result};
