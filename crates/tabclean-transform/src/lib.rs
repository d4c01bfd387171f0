//! Normalization pipeline for inconsistently formatted tables.
//!
//! - **normalization**: the five stages (headers, duplicates, amount,
//!   status, date)
//! - **pipeline**: ordered execution, the execution log and stage reports

pub mod normalization;
pub mod pipeline;

pub use normalization::{parse_amount, parse_calendar_date, title_case};
pub use pipeline::{CleanOutcome, CleaningPipeline, StageReport, clean_table};
