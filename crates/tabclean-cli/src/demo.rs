//! Seeded generator for a deliberately messy transactions table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabclean_model::{CellValue, Result, Row, Table};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_DUPLICATES: usize = 5;

const FIRST_TRANSACTION: usize = 1000;

const COLUMNS: [&str; 5] = ["Transaction_ID", "Customer Name", "Date", "Amount", "Status"];

const NAMES: [&str; 5] = [
    "John Doe",
    " Jane Smith ",
    "Ali  Khan",
    "Sarah Connor",
    "John Doe",
];

const DATES: [Option<&str>; 5] = [
    Some("2024-01-01"),
    Some("01/02/2024"),
    Some("Jan 3, 2024"),
    Some("2024/01/04"),
    None,
];

#[derive(Debug, Clone, Copy)]
enum DemoAmount {
    Number(f64),
    Text(&'static str),
    Missing,
}

const AMOUNTS: [DemoAmount; 6] = [
    DemoAmount::Number(100.0),
    DemoAmount::Number(250.0),
    DemoAmount::Number(500.0),
    DemoAmount::Text("1,000"),
    DemoAmount::Missing,
    DemoAmount::Number(50.0),
];

const STATUSES: [&str; 5] = ["Paid", "pending", "PAID", "Unpaid", "Error"];

/// Shape of the generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    pub seed: u64,
    /// Distinct transactions before duplication.
    pub rows: usize,
    /// Leading rows appended again at the end.
    pub duplicates: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            rows: DEFAULT_ROWS,
            duplicates: DEFAULT_DUPLICATES,
        }
    }
}

/// Builds a transactions table with stray spaces, mixed date formats,
/// comma-formatted amounts, inconsistent status casing and repeated rows.
///
/// The same config always yields the same table. `duplicates` is capped at
/// `rows`.
pub fn generate_messy_table(config: &DemoConfig) -> Result<Table> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let ids: Vec<String> = (0..config.rows)
        .map(|offset| format!("TXN-{}", FIRST_TRANSACTION + offset))
        .collect();
    let names: Vec<&str> = (0..config.rows).map(|_| pick(&mut rng, &NAMES)).collect();
    let dates: Vec<Option<&str>> = (0..config.rows).map(|_| pick(&mut rng, &DATES)).collect();
    let amounts: Vec<DemoAmount> = (0..config.rows).map(|_| pick(&mut rng, &AMOUNTS)).collect();
    let statuses: Vec<&str> = (0..config.rows)
        .map(|_| pick(&mut rng, &STATUSES))
        .collect();

    let mut rows: Vec<Row> = (0..config.rows)
        .map(|index| {
            vec![
                CellValue::text(ids[index].as_str()),
                CellValue::text(names[index]),
                CellValue::from(dates[index]),
                amount_cell(amounts[index]),
                CellValue::text(statuses[index]),
            ]
        })
        .collect();

    let repeated = config.duplicates.min(config.rows);
    rows.extend_from_within(..repeated);

    Table::from_rows(COLUMNS.iter().map(|c| (*c).to_string()).collect(), rows)
}

fn pick<T: Copy>(rng: &mut StdRng, choices: &[T]) -> T {
    choices[rng.gen_range(0..choices.len())]
}

fn amount_cell(amount: DemoAmount) -> CellValue {
    match amount {
        DemoAmount::Number(value) => CellValue::Number(value),
        DemoAmount::Text(value) => CellValue::text(value),
        DemoAmount::Missing => CellValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape() {
        let table = generate_messy_table(&DemoConfig::default()).unwrap();
        assert_eq!(table.len(), 55);
        assert_eq!(table.columns(), &COLUMNS);
        assert_eq!(table.rows()[50], table.rows()[0]);
        assert_eq!(table.rows()[54], table.rows()[4]);
        assert_eq!(table.cell(49, "Transaction_ID"), Some(&CellValue::text("TXN-1049")));
    }

    #[test]
    fn same_seed_same_table() {
        let config = DemoConfig {
            seed: 7,
            ..DemoConfig::default()
        };
        assert_eq!(
            generate_messy_table(&config).unwrap(),
            generate_messy_table(&config).unwrap()
        );
    }

    #[test]
    fn duplicates_capped_by_rows() {
        let config = DemoConfig {
            seed: 1,
            rows: 3,
            duplicates: 10,
        };
        assert_eq!(generate_messy_table(&config).unwrap().len(), 6);
    }

    #[test]
    fn zero_rows() {
        let config = DemoConfig {
            seed: 1,
            rows: 0,
            duplicates: 5,
        };
        let table = generate_messy_table(&config).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 5);
    }
}
