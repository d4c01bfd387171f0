//! Load, clean and write steps shared by the `clean` and `demo` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tabclean_ingest::{IngestOptions, read_csv_table};
use tabclean_model::{CleanOptions, Table};
use tabclean_output::{CleanReport, RunSummary, write_csv_file};
use tabclean_transform::{CleanOutcome, CleaningPipeline};
use tracing::{info, info_span};

/// Everything produced by one cleaning run.
#[derive(Debug, Clone)]
pub struct CleanRun {
    pub raw: Table,
    pub outcome: CleanOutcome,
    pub summary: RunSummary,
    pub options: CleanOptions,
}

impl CleanRun {
    pub fn report(&self) -> CleanReport {
        CleanReport::new(&self.raw, &self.outcome, &self.options)
    }
}

/// Where a run writes its files.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub csv: Option<PathBuf>,
    pub report: Option<PathBuf>,
    /// Recorded in the JSON report.
    pub source: Option<String>,
}

pub fn ingest(path: &Path, options: &IngestOptions) -> Result<Table> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let table =
        read_csv_table(path, options).with_context(|| format!("read {}", path.display()))?;
    info!(rows = table.len(), columns = table.width(), "input loaded");
    Ok(table)
}

pub fn clean(raw: Table, options: &CleanOptions) -> Result<CleanRun> {
    let outcome = CleaningPipeline::new(options.clone())
        .run(&raw)
        .context("clean table")?;
    let summary = RunSummary::from_tables(&raw, &outcome.table);
    Ok(CleanRun {
        raw,
        outcome,
        summary,
        options: options.clone(),
    })
}

pub fn write_outputs(run: &CleanRun, config: &OutputConfig) -> Result<()> {
    if let Some(path) = &config.csv {
        write_csv_file(&run.outcome.table, path)
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), rows = run.outcome.table.len(), "clean CSV written");
    }
    if let Some(path) = &config.report {
        let mut report = run.report();
        if let Some(source) = &config.source {
            report = report.with_source(source.as_str());
        }
        report
            .write_json_file(path)
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

/// Default clean CSV path: `<stem>_clean.csv` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}_clean.csv"))
}
