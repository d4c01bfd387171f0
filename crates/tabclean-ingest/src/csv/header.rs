//! Header row handling.

use csv::StringRecord;

/// Column names read from the first row of a CSV file.
///
/// Names are kept as written apart from a leading byte-order mark and blank
/// names, which get a positional placeholder. Canonicalization is the
/// pipeline's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(index, name)| clean_header_cell(index, &name))
            .collect();
        Self { columns }
    }

    pub fn from_record(record: &StringRecord) -> Self {
        Self::new(record.iter().map(str::to_string).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}

fn clean_header_cell(index: usize, raw: &str) -> String {
    let name = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    if name.trim().is_empty() {
        format!("Unnamed: {index}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_from_first_header() {
        let headers = CsvHeaders::new(vec!["\u{feff}Transaction ID".into(), "Amount".into()]);
        assert_eq!(headers.columns(), &["Transaction ID", "Amount"]);
    }

    #[test]
    fn keeps_raw_spacing_and_case() {
        let headers = CsvHeaders::new(vec![" Customer Name ".into(), "STATUS".into()]);
        assert_eq!(headers.columns(), &[" Customer Name ", "STATUS"]);
    }

    #[test]
    fn names_blank_headers_by_position() {
        let record = StringRecord::from(vec!["id", "", "  "]);
        let headers = CsvHeaders::from_record(&record);
        assert_eq!(headers.columns(), &["id", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(headers.len(), 3);
    }
}
