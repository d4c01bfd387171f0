//! Pipeline orchestration.
//!
//! The pipeline runs five stages in a fixed order over a private copy of the
//! caller's table:
//!
//! ```text
//! headers -> duplicates -> amount -> status -> date
//! ```
//!
//! Headers and duplicates always run and always log. The amount, status and
//! date stages run only when their column is present; an absent column skips
//! the stage without a log entry.
//!
//! # Example
//!
//! ```
//! use tabclean_model::{CellValue, CleanOptions, Table};
//! use tabclean_transform::clean_table;
//!
//! let raw = Table::from_rows(
//!     vec!["Amount".into()],
//!     vec![vec![CellValue::text("1,000")]],
//! )?;
//! let outcome = clean_table(&raw, &CleanOptions::default())?;
//! assert_eq!(outcome.table.cell(0, "amount"), Some(&CellValue::Number(1000.0)));
//! # Ok::<(), tabclean_model::CleanError>(())
//! ```

use serde::Serialize;
use tracing::{debug, info, info_span};

use tabclean_model::{CleanError, CleanLog, CleanOptions, ColumnRoles, Result, Stage, Table};

use crate::normalization::{
    coerce_amount_column, count_renamed, dedupe_rows, normalize_date_column, normalize_headers,
    normalize_status_column,
};

pub const HEADERS_MESSAGE: &str = "Standardized column headers (lowercase, no spaces).";
pub const AMOUNT_MESSAGE: &str =
    "Cleaned 'Amount' column (removed commas, converted text to numbers).";
pub const STATUS_MESSAGE: &str = "Standardized 'Status' column casing.";
pub const DATE_MESSAGE: &str = "Parsed mixed Date formats into ISO standard (YYYY-MM-DD).";

/// Log line of the deduplicator.
pub fn duplicates_message(removed: usize) -> String {
    format!("Removed {removed} duplicate rows.")
}

/// Counts describing what one stage did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Cells or column names rewritten to a different value.
    pub cells_changed: usize,
    /// Amount cells replaced by the fill value.
    pub cells_filled: usize,
    /// Dates resolved by the month/day order preference.
    pub ambiguous_dates: usize,
}

impl StageReport {
    fn new(stage: Stage, rows_before: usize, rows_after: usize) -> Self {
        Self {
            stage,
            rows_before,
            rows_after,
            cells_changed: 0,
            cells_filled: 0,
            ambiguous_dates: 0,
        }
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanOutcome {
    pub table: Table,
    pub log: CleanLog,
    pub reports: Vec<StageReport>,
}

impl CleanOutcome {
    /// Report of a stage, if it ran.
    pub fn report(&self, stage: Stage) -> Option<&StageReport> {
        self.reports.iter().find(|report| report.stage == stage)
    }

    /// Rows removed across all stages.
    pub fn rows_removed(&self) -> usize {
        self.reports.iter().map(StageReport::rows_removed).sum()
    }
}

/// Five-stage cleaning pipeline bound to a set of options.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    options: CleanOptions,
}

impl CleaningPipeline {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Run every stage over a copy of `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::NoColumns`] for a table without columns and
    /// [`CleanError::HeaderCollision`] when two headers normalize to the
    /// same name. Options with a NaN or infinite amount fill fail with
    /// [`CleanError::NonFiniteAmountFill`]. Unparseable cells never fail
    /// the run.
    pub fn run(&self, input: &Table) -> Result<CleanOutcome> {
        let span = info_span!("clean", rows = input.len(), columns = input.width());
        let _guard = span.enter();

        if input.width() == 0 {
            return Err(CleanError::NoColumns);
        }
        self.options.validate()?;

        let mut log = CleanLog::new();
        let mut reports = Vec::with_capacity(Stage::ALL.len());
        let table = input.clone();

        // Stage 1: headers
        let rows = table.len();
        let renamed = count_renamed(table.columns());
        let table = info_span!("headers").in_scope(|| normalize_headers(table))?;
        log.push(Stage::Headers, HEADERS_MESSAGE);
        reports.push(StageReport {
            cells_changed: renamed,
            ..StageReport::new(Stage::Headers, rows, rows)
        });
        info!(renamed, "headers normalized");

        let roles = ColumnRoles::resolve(table.columns());

        // Stage 2: duplicates
        let rows = table.len();
        let (table, removed) =
            info_span!("duplicates").in_scope(|| dedupe_rows(table, &roles, &self.options));
        log.push(Stage::Duplicates, duplicates_message(removed));
        reports.push(StageReport::new(Stage::Duplicates, rows, table.len()));
        info!(removed, mode = ?self.options.dedupe, "duplicates removed");

        // Stage 3: amount
        let table = match roles.amount() {
            Some(index) => {
                let rows = table.len();
                let (table, stats) = info_span!("amount").in_scope(|| {
                    coerce_amount_column(table, index, self.options.amount_fill)
                });
                log.push(Stage::Amount, AMOUNT_MESSAGE);
                reports.push(StageReport {
                    cells_changed: stats.converted,
                    cells_filled: stats.filled,
                    ..StageReport::new(Stage::Amount, rows, rows)
                });
                info!(
                    converted = stats.converted,
                    filled = stats.filled,
                    "amount column coerced"
                );
                table
            }
            None => {
                debug!("no amount column, skipping");
                table
            }
        };

        // Stage 4: status
        let table = match roles.status() {
            Some(index) => {
                let rows = table.len();
                let (table, changed) =
                    info_span!("status").in_scope(|| normalize_status_column(table, index));
                log.push(Stage::Status, STATUS_MESSAGE);
                reports.push(StageReport {
                    cells_changed: changed,
                    ..StageReport::new(Stage::Status, rows, rows)
                });
                info!(changed, "status casing normalized");
                table
            }
            None => {
                debug!("no status column, skipping");
                table
            }
        };

        // Stage 5: date
        let table = match roles.date() {
            Some(index) => {
                let rows = table.len();
                let (table, stats) = info_span!("date").in_scope(|| {
                    normalize_date_column(table, index, self.options.date_order)
                });
                log.push(Stage::Date, DATE_MESSAGE);
                reports.push(StageReport {
                    cells_changed: stats.converted,
                    ambiguous_dates: stats.ambiguous,
                    ..StageReport::new(Stage::Date, rows, table.len())
                });
                info!(
                    converted = stats.converted,
                    dropped = stats.dropped,
                    ambiguous = stats.ambiguous,
                    "date column parsed"
                );
                table
            }
            None => {
                debug!("no date column, skipping");
                table
            }
        };

        info!(
            rows_in = input.len(),
            rows_out = table.len(),
            stages = log.len(),
            "clean complete"
        );
        Ok(CleanOutcome {
            table,
            log,
            reports,
        })
    }
}

/// Clean `input` with the given options.
///
/// The caller's table is never modified.
pub fn clean_table(input: &Table, options: &CleanOptions) -> Result<CleanOutcome> {
    CleaningPipeline::new(options.clone()).run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabclean_model::CellValue;

    #[test]
    fn test_no_columns_is_an_error() {
        let table = Table::new(Vec::new()).unwrap();
        let err = clean_table(&table, &CleanOptions::default()).unwrap_err();
        assert_eq!(err, CleanError::NoColumns);
    }

    #[test]
    fn test_non_finite_amount_fill_is_rejected() {
        let table = Table::from_rows(
            vec!["Amount".into()],
            vec![vec![CellValue::Missing]],
        )
        .unwrap();
        let options = CleanOptions::default().with_amount_fill(f64::NAN);
        let err = clean_table(&table, &options).unwrap_err();
        assert!(matches!(err, CleanError::NonFiniteAmountFill { value } if value.is_nan()));

        let options = CleanOptions::default().with_amount_fill(-1.5);
        let once = clean_table(&table, &options).unwrap();
        assert_eq!(once.table.cell(0, "amount"), Some(&CellValue::Number(-1.5)));
        let twice = clean_table(&once.table, &options).unwrap();
        assert_eq!(once.table, twice.table);
    }

    #[test]
    fn test_empty_rows_flow_through() {
        let table = Table::new(vec!["Amount".into(), "Date".into()]).unwrap();
        let outcome = clean_table(&table, &CleanOptions::default()).unwrap();
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.log.len(), 4);
        assert_eq!(outcome.log.messages()[1], "Removed 0 duplicate rows.");
    }

    #[test]
    fn test_absent_columns_skip_stages() {
        let table = Table::from_rows(
            vec!["Notes".into()],
            vec![vec![CellValue::text("x")], vec![CellValue::text("x")]],
        )
        .unwrap();
        let outcome = clean_table(&table, &CleanOptions::default()).unwrap();
        assert_eq!(
            outcome.log.messages(),
            vec![HEADERS_MESSAGE, "Removed 1 duplicate rows."]
        );
        assert_eq!(outcome.reports.len(), 2);
        assert!(outcome.report(Stage::Amount).is_none());
    }

    #[test]
    fn test_reports_count_changes() {
        let table = Table::from_rows(
            vec!["Amount".into(), "Date".into()],
            vec![
                vec![CellValue::text("1,000"), CellValue::text("01/02/2024")],
                vec![CellValue::Missing, CellValue::Missing],
            ],
        )
        .unwrap();
        let outcome = clean_table(&table, &CleanOptions::default()).unwrap();
        let amount = outcome.report(Stage::Amount).unwrap();
        assert_eq!(amount.cells_changed, 1);
        assert_eq!(amount.cells_filled, 1);
        let date = outcome.report(Stage::Date).unwrap();
        assert_eq!(date.rows_removed(), 1);
        assert_eq!(date.ambiguous_dates, 1);
        assert_eq!(outcome.rows_removed(), 1);
        assert_eq!(outcome.report(Stage::Headers).unwrap().cells_changed, 2);
    }
}
