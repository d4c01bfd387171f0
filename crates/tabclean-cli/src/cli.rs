//! CLI argument definitions for tabclean.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabclean_ingest::IngestOptions;
use tabclean_model::{CleanOptions, DateOrder, DedupeMode};

use tabclean_cli::demo::{DEFAULT_DUPLICATES, DEFAULT_ROWS, DEFAULT_SEED, DemoConfig};

#[derive(Parser)]
#[command(
    name = "tabclean",
    version,
    about = "Normalize messy transaction tables",
    long_about = "Normalize messy transaction tables.\n\n\
                  Standardizes headers, removes duplicate rows, coerces amounts to numbers,\n\
                  fixes status casing and parses mixed date formats into YYYY-MM-DD."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a CSV file.
    Clean(CleanArgs),

    /// Generate the messy demo table and clean it.
    Demo(DemoArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// CSV file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Clean CSV destination (default: <INPUT stem>_clean.csv beside the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a JSON report with the log, stage counts and summary.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Rows shown in the raw and clean previews.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,

    /// Field value read as missing (repeatable; replaces the default NA tokens).
    #[arg(long = "na-value", value_name = "TOKEN")]
    pub na_values: Vec<String>,

    /// Keep numeric-looking columns as text.
    #[arg(long = "no-infer-numeric")]
    pub no_infer_numeric: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Parser)]
pub struct DemoArgs {
    /// Random seed for the generated table.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Distinct transactions to generate.
    #[arg(long = "rows", default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Leading rows appended again as duplicates.
    #[arg(long = "duplicates", default_value_t = DEFAULT_DUPLICATES)]
    pub duplicates: usize,

    /// Write the generated messy table as CSV.
    #[arg(long = "raw-output", value_name = "PATH")]
    pub raw_output: Option<PathBuf>,

    /// Write the clean table as CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a JSON report with the log, stage counts and summary.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Rows shown in the raw and clean previews.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Cleaning options shared by every command.
#[derive(Args)]
pub struct PipelineArgs {
    /// How to read ambiguous numeric dates such as 01/02/2024.
    #[arg(long = "date-order", value_enum, default_value = "month-first")]
    pub date_order: DateOrderArg,

    /// Duplicate detection mode.
    #[arg(long = "dedupe", value_enum, default_value = "canonical")]
    pub dedupe: DedupeArg,

    /// Value used for amounts that cannot be parsed.
    #[arg(
        long = "amount-fill",
        value_name = "F",
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_parser = parse_amount_fill
    )]
    pub amount_fill: f64,
}

/// Amount fill must be a finite number so the amount column stays numeric.
fn parse_amount_fill(value: &str) -> Result<f64, String> {
    let fill: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if fill.is_finite() {
        Ok(fill)
    } else {
        Err(format!("'{value}' is not a finite number"))
    }
}

impl PipelineArgs {
    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions::new()
            .with_date_order(match self.date_order {
                DateOrderArg::MonthFirst => DateOrder::MonthFirst,
                DateOrderArg::DayFirst => DateOrder::DayFirst,
            })
            .with_dedupe(match self.dedupe {
                DedupeArg::Canonical => DedupeMode::Canonical,
                DedupeArg::Exact => DedupeMode::Exact,
            })
            .with_amount_fill(self.amount_fill)
    }
}

impl CleanArgs {
    pub fn ingest_options(&self) -> IngestOptions {
        let options = IngestOptions::default().with_infer_numeric(!self.no_infer_numeric);
        if self.na_values.is_empty() {
            options
        } else {
            options.with_na_values(self.na_values.iter().cloned())
        }
    }
}

impl DemoArgs {
    pub fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            seed: self.seed,
            rows: self.rows,
            duplicates: self.duplicates,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DateOrderArg {
    MonthFirst,
    DayFirst,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DedupeArg {
    Canonical,
    Exact,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
