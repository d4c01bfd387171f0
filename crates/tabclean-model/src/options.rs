//! Configuration options for the cleaning pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};

/// How the deduplicator decides two rows are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupeMode {
    /// Compare amount, status and date cells by the value the later stages
    /// will produce; other cells compare exactly.
    #[default]
    Canonical,
    /// Every cell must be equal as stored.
    Exact,
}

/// Preferred reading of ambiguous numeric dates such as `01/02/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `MM/DD/YYYY` before `DD/MM/YYYY`.
    #[default]
    MonthFirst,
    /// `DD/MM/YYYY` before `MM/DD/YYYY`.
    DayFirst,
}

/// Options controlling pipeline behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    pub dedupe: DedupeMode,
    pub date_order: DateOrder,
    /// Value substituted for unparseable or missing amounts.
    ///
    /// Missing revenue counts as zero so that sums over the column stay
    /// defined.
    pub amount_fill: f64,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            dedupe: DedupeMode::Canonical,
            date_order: DateOrder::MonthFirst,
            amount_fill: 0.0,
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dedupe(mut self, mode: DedupeMode) -> Self {
        self.dedupe = mode;
        self
    }

    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    #[must_use]
    pub fn with_amount_fill(mut self, fill: f64) -> Self {
        self.amount_fill = fill;
        self
    }

    /// Checks that the options can produce a fully numeric amount column.
    pub fn validate(&self) -> Result<()> {
        if !self.amount_fill.is_finite() {
            return Err(CleanError::NonFiniteAmountFill {
                value: self.amount_fill,
            });
        }
        Ok(())
    }
}
