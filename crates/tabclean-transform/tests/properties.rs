//! Property tests for pipeline invariants.

use proptest::prelude::*;

use chrono::NaiveDate;
use tabclean_model::{CellValue, CleanOptions, DateOrder, Table};
use tabclean_transform::{clean_table, parse_calendar_date, title_case};

fn amount_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        (0u32..5000).prop_map(|v| CellValue::Number(f64::from(v))),
        (1u32..5, 0u32..1000).prop_map(|(th, rest)| CellValue::text(format!("{th},{rest:03}"))),
        "[a-z]{1,4}".prop_map(CellValue::Text),
    ]
}

fn status_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        "[A-Za-z]{1,8}( [A-Za-z]{1,8})?".prop_map(CellValue::Text),
        prop::sample::select(vec!["Paid", "pending", "PAID", "Unpaid", "Error"])
            .prop_map(CellValue::text),
    ]
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn date_cell() -> impl Strategy<Value = CellValue> {
    let formatted = (2000i32..2030, 1u32..13, 1u32..29, 0usize..5).prop_map(|(y, m, d, style)| {
        let text = match style {
            0 => format!("{y:04}-{m:02}-{d:02}"),
            1 => format!("{m:02}/{d:02}/{y:04}"),
            2 => format!("{y:04}/{m:02}/{d:02}"),
            3 => format!("{d} Mar {y}"),
            _ => format!("{} {d}, {y}", MONTH_NAMES[(m - 1) as usize]),
        };
        CellValue::Text(text)
    });
    prop_oneof![
        Just(CellValue::Missing),
        formatted,
        "[a-z ]{0,6}".prop_map(CellValue::Text),
    ]
}

fn row() -> impl Strategy<Value = Vec<CellValue>> {
    (
        (0u32..6).prop_map(|id| CellValue::text(format!("TXN-{id}"))),
        amount_cell(),
        status_cell(),
        date_cell(),
    )
        .prop_map(|(id, amount, status, date)| vec![id, amount, status, date])
}

fn table() -> impl Strategy<Value = Table> {
    prop::collection::vec(row(), 0..40).prop_map(|mut rows| {
        // repeat a prefix so exact duplicates are common
        let repeats: Vec<_> = rows.iter().take(3).cloned().collect();
        rows.extend(repeats);
        let columns = ["Transaction ID", "Amount", " Status", "DATE"]
            .map(String::from)
            .to_vec();
        Table::from_rows(columns, rows).unwrap()
    })
}

fn order() -> impl Strategy<Value = DateOrder> {
    prop_oneof![Just(DateOrder::MonthFirst), Just(DateOrder::DayFirst)]
}

proptest! {
    #[test]
    fn pipeline_is_idempotent(raw in table(), order in order()) {
        let options = CleanOptions::default().with_date_order(order);
        let once = clean_table(&raw, &options).unwrap();
        let twice = clean_table(&once.table, &options).unwrap();
        prop_assert_eq!(&once.table, &twice.table);
        prop_assert_eq!(twice.rows_removed(), 0);
    }

    #[test]
    fn output_has_no_duplicates(raw in table()) {
        let outcome = clean_table(&raw, &CleanOptions::default()).unwrap();
        let rows = outcome.table.rows();
        prop_assert!(rows.len() <= raw.len());
        for (i, left) in rows.iter().enumerate() {
            for right in rows.iter().skip(i + 1) {
                prop_assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn role_columns_are_total(raw in table()) {
        let outcome = clean_table(&raw, &CleanOptions::default()).unwrap();
        for amount in outcome.table.column("amount").unwrap() {
            prop_assert!(matches!(amount, CellValue::Number(v) if v.is_finite()));
        }
        for date in outcome.table.column("date").unwrap() {
            prop_assert!(matches!(date, CellValue::Date(_)));
        }
        for status in outcome.table.column("status").unwrap() {
            if let CellValue::Text(value) = status {
                prop_assert_eq!(value, &title_case(value));
            }
        }
    }

    #[test]
    fn caller_table_is_untouched(raw in table()) {
        let before = raw.clone();
        let _ = clean_table(&raw, &CleanOptions::default()).unwrap();
        prop_assert_eq!(raw, before);
    }

    #[test]
    fn full_month_names_parse(y in 1900i32..2100, m in 1u32..13, d in 1u32..29, order in order()) {
        let expected = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let name = MONTH_NAMES[(m - 1) as usize];
        prop_assert_eq!(parse_calendar_date(&format!("{name} {d}, {y}"), order), Some(expected));
        prop_assert_eq!(parse_calendar_date(&format!("{d} {name} {y}"), order), Some(expected));
    }
}
