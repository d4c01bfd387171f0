//! CSV file reading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tabclean_model::{CellValue, ColumnRole, Row, Table};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;
use super::options::IngestOptions;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

const READER_SOURCE: &str = "<reader>";

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects files that start with a UTF-16 byte-order mark.
///
/// A UTF-8 BOM is accepted and stripped from the first header.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into a [`Table`].
///
/// Fields matching one of `options.na_values` become [`CellValue::Missing`].
/// Other fields are kept verbatim as text, except in columns where every
/// present value is a plain number and numeric inference is enabled. The
/// date column is never inferred as numeric.
/// Records shorter than the header are padded with missing cells; longer
/// records are an error.
pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<Table> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let table = read_table(BufReader::new(file), options, path)?;

    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.width(),
        "loaded CSV"
    );
    Ok(table)
}

/// Reads CSV data from any reader. Errors report the source as `<reader>`.
pub fn read_csv_from_reader<R: Read>(reader: R, options: &IngestOptions) -> Result<Table> {
    read_table(reader, options, Path::new(READER_SOURCE))
}

fn read_table<R: Read>(reader: R, options: &IngestOptions, source: &Path) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_record = csv_reader
        .headers()
        .map_err(|e| csv_error(source, e))?
        .clone();
    if header_record.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }
    let headers = CsvHeaders::from_record(&header_record);
    let width = headers.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut padded = 0usize;
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(source, e))?;
        if record.len() > width {
            return Err(IngestError::RowTooLong {
                path: source.to_path_buf(),
                line: record_line(&record, index),
                expected: width,
                found: record.len(),
            });
        }
        if record.len() < width {
            padded += 1;
        }
        raw_rows.push(raw_row(&record, width, options));
    }

    if padded > 0 {
        warn!(
            source = %source.display(),
            rows = padded,
            "padded short CSV records with missing cells"
        );
    }

    // Date columns stay textual so compact forms like 20240115 still parse
    // as dates downstream.
    let numeric: Vec<bool> = headers
        .columns()
        .iter()
        .enumerate()
        .map(|(column, name)| {
            options.infer_numeric
                && ColumnRole::from_name(name) != ColumnRole::Date
                && is_numeric_column(&raw_rows, column)
        })
        .collect();

    let rows: Vec<Row> = raw_rows
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .zip(&numeric)
                .map(|(field, &is_numeric)| to_cell(field, is_numeric))
                .collect()
        })
        .collect();

    Table::from_rows(headers.into_columns(), rows).map_err(|e| IngestError::InvalidTable {
        path: source.to_path_buf(),
        source: e,
    })
}

fn raw_row(record: &StringRecord, width: usize, options: &IngestOptions) -> Vec<Option<String>> {
    let mut fields: Vec<Option<String>> = record
        .iter()
        .map(|field| {
            if options.is_na(field) {
                None
            } else {
                Some(field.to_string())
            }
        })
        .collect();
    fields.resize(width, None);
    fields
}

fn is_numeric_column(rows: &[Vec<Option<String>>], column: usize) -> bool {
    rows.iter()
        .filter_map(|row| row[column].as_deref())
        .all(|value| parse_number(value).is_some())
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn to_cell(field: Option<String>, numeric: bool) -> CellValue {
    match field {
        None => CellValue::Missing,
        Some(value) if numeric => parse_number(&value)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Text(value)),
        Some(value) => CellValue::Text(value),
    }
}

fn record_line(record: &StringRecord, index: usize) -> u64 {
    record
        .position()
        .map_or(index as u64 + 2, csv::Position::line)
}

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

fn csv_error(path: &Path, error: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source: error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str) -> Result<Table> {
        read_csv_from_reader(data.as_bytes(), &IngestOptions::default())
    }

    #[test]
    fn reads_text_and_numbers() {
        let table = read("id,amount,status\nA1,\"1,200.50\",paid\nA2,50,Pending\n").unwrap();
        assert_eq!(table.columns(), &["id", "amount", "status"]);
        assert_eq!(table.len(), 2);
        // "1,200.50" keeps the column textual
        assert_eq!(table.cell(0, "amount"), Some(&CellValue::text("1,200.50")));
        assert_eq!(table.cell(1, "status"), Some(&CellValue::text("Pending")));
    }

    #[test]
    fn infers_numeric_columns() {
        let table = read("qty,label\n1,a\n2.5,b\n,c\n").unwrap();
        assert_eq!(table.cell(0, "qty"), Some(&CellValue::Number(1.0)));
        assert_eq!(table.cell(1, "qty"), Some(&CellValue::Number(2.5)));
        assert_eq!(table.cell(2, "qty"), Some(&CellValue::Missing));
    }

    #[test]
    fn na_tokens_become_missing() {
        let table = read("a,b\nNA,x\nN/A,null\n").unwrap();
        assert_eq!(table.cell(0, "a"), Some(&CellValue::Missing));
        assert_eq!(table.cell(1, "a"), Some(&CellValue::Missing));
        assert_eq!(table.cell(1, "b"), Some(&CellValue::Missing));
        assert_eq!(table.cell(0, "b"), Some(&CellValue::text("x")));
    }

    #[test]
    fn fields_are_not_trimmed() {
        let table = read("status\n  paid \n").unwrap();
        assert_eq!(table.cell(0, "status"), Some(&CellValue::text("  paid ")));
    }

    #[test]
    fn short_records_are_padded() {
        let table = read("a,b,c\n1,2\n").unwrap();
        assert_eq!(table.cell(0, "c"), Some(&CellValue::Missing));
    }

    #[test]
    fn long_records_are_rejected() {
        let err = read("a,b\n1,2\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::RowTooLong {
                line: 3,
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(read(""), Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn header_only_gives_empty_table() {
        let table = read("Amount,Date\n").unwrap();
        assert_eq!(table.width(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_headers_are_invalid() {
        let err = read("a,a\n1,2\n").unwrap_err();
        assert!(matches!(err, IngestError::InvalidTable { .. }));
    }

    #[test]
    fn date_column_is_not_inferred_numeric() {
        let table = read("id,Date,amount\nA,20240115,5\nB,20240116,6\n").unwrap();
        assert_eq!(table.cell(0, "Date"), Some(&CellValue::text("20240115")));
        assert_eq!(table.cell(1, "amount"), Some(&CellValue::Number(6.0)));
    }

    #[test]
    fn inference_can_be_disabled() {
        let options = IngestOptions::default().with_infer_numeric(false);
        let table = read_csv_from_reader("n\n7\n".as_bytes(), &options).unwrap();
        assert_eq!(table.cell(0, "n"), Some(&CellValue::text("7")));
    }
}
