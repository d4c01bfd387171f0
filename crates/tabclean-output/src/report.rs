//! JSON run report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tabclean_model::{CleanOptions, Table};
use tabclean_transform::{CleanOutcome, StageReport};

use crate::error::{OutputError, Result};
use crate::summary::RunSummary;

/// Machine-readable record of a cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub options: CleanOptions,
    pub columns: Vec<String>,
    pub log: Vec<String>,
    pub stages: Vec<StageReport>,
    pub summary: RunSummary,
}

impl CleanReport {
    pub fn new(raw: &Table, outcome: &CleanOutcome, options: &CleanOptions) -> Self {
        Self {
            source: None,
            options: options.clone(),
            columns: outcome.table.columns().to_vec(),
            log: outcome
                .log
                .iter()
                .map(|entry| entry.message.clone())
                .collect(),
            stages: outcome.reports.clone(),
            summary: RunSummary::from_tables(raw, &outcome.table),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json_file(&self, path: &Path) -> Result<()> {
        let io_error = |source: std::io::Error| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}
