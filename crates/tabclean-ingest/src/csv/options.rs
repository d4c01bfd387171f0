//! Options controlling how raw CSV fields become cells.

use serde::{Deserialize, Serialize};

/// Tokens read as a missing value when they make up a whole field.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A",
];

/// Field interpretation settings for CSV loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Exact field values treated as missing.
    pub na_values: Vec<String>,
    /// Load a column as numbers when every present value parses as one.
    pub infer_numeric: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            na_values: DEFAULT_NA_VALUES.iter().map(|v| (*v).to_string()).collect(),
            infer_numeric: true,
        }
    }
}

impl IngestOptions {
    /// Options that keep every field as text, with only empty fields missing.
    pub fn text_only() -> Self {
        Self {
            na_values: vec![String::new()],
            infer_numeric: false,
        }
    }

    #[must_use]
    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_infer_numeric(mut self, infer: bool) -> Self {
        self.infer_numeric = infer;
        self
    }

    pub fn is_na(&self, field: &str) -> bool {
        self.na_values.iter().any(|na| na == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_na_tokens() {
        let options = IngestOptions::default();
        assert!(options.is_na(""));
        assert!(options.is_na("N/A"));
        assert!(options.is_na("#N/A"));
        assert!(!options.is_na(" NA"));
        assert!(!options.is_na("pending"));
        assert!(options.infer_numeric);
    }

    #[test]
    fn text_only_keeps_tokens() {
        let options = IngestOptions::text_only();
        assert!(options.is_na(""));
        assert!(!options.is_na("NA"));
        assert!(!options.infer_numeric);
    }

    #[test]
    fn builder_overrides() {
        let options = IngestOptions::default()
            .with_na_values(["-", "?"])
            .with_infer_numeric(false);
        assert!(options.is_na("-"));
        assert!(!options.is_na(""));
        assert!(!options.infer_numeric);
    }
}
