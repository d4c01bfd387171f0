//! CSV reading into [`Table`](tabclean_model::Table).

mod header;
mod options;
mod reader;

pub use header::CsvHeaders;
pub use options::{DEFAULT_NA_VALUES, IngestOptions};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_from_reader,
    read_csv_table, validate_encoding,
};
