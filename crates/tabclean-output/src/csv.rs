//! Clean-table CSV writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tabclean_model::{CellValue, Table};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Writes `table` as comma-separated UTF-8 with a header row.
///
/// Cells are rendered with [`CellValue::render`](tabclean_model::CellValue::render):
/// dates as `YYYY-MM-DD`, missing cells as empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(CellValue::render))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders `table` to an in-memory CSV string.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes `table` to `path`, replacing any existing file.
pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(table, BufWriter::new(file))?;
    debug!(path = %path.display(), rows = table.len(), "wrote CSV");
    Ok(())
}
