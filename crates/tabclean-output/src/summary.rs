use serde::Serialize;
use tabclean_model::{ColumnRoles, Table};

/// Headline numbers for one cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub records_processed: usize,
    pub records_kept: usize,
    /// Sum of the clean amount column; `None` when there is no amount column.
    pub total_amount: Option<f64>,
}

impl RunSummary {
    pub fn from_tables(raw: &Table, clean: &Table) -> Self {
        let roles = ColumnRoles::resolve(clean.columns());
        let total_amount = roles.amount().map(|index| {
            clean
                .rows()
                .iter()
                .filter_map(|row| row[index].as_number())
                .sum()
        });
        Self {
            records_processed: raw.len(),
            records_kept: clean.len(),
            total_amount,
        }
    }

    pub fn records_removed(&self) -> usize {
        self.records_processed.saturating_sub(self.records_kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabclean_model::CellValue;

    #[test]
    fn sums_amount_column() {
        let raw = Table::from_rows(
            vec!["Amount".into()],
            vec![
                vec![CellValue::text("1,000")],
                vec![CellValue::Missing],
                vec![CellValue::Number(50.0)],
            ],
        )
        .unwrap();
        let clean = Table::from_rows(
            vec!["amount".into()],
            vec![vec![CellValue::Number(1000.0)], vec![CellValue::Number(50.0)]],
        )
        .unwrap();
        let summary = RunSummary::from_tables(&raw, &clean);
        assert_eq!(summary.records_processed, 3);
        assert_eq!(summary.records_kept, 2);
        assert_eq!(summary.records_removed(), 1);
        assert_eq!(summary.total_amount, Some(1050.0));
    }

    #[test]
    fn no_amount_column() {
        let table = Table::new(vec!["status".into()]).unwrap();
        let summary = RunSummary::from_tables(&table, &table);
        assert_eq!(summary.total_amount, None);
        assert_eq!(summary.records_removed(), 0);
    }
}
