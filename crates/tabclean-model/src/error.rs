use thiserror::Error;

/// Errors raised for structurally invalid tables.
///
/// Unparseable cells are never errors: amounts are filled and rows with bad
/// dates are dropped. Only shape problems surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleanError {
    /// The table has no columns at all.
    #[error("table has no columns")]
    NoColumns,

    /// Two column names are identical.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    /// Two distinct column names normalize to the same header.
    #[error("columns '{first}' and '{second}' both normalize to '{normalized}'")]
    HeaderCollision {
        first: String,
        second: String,
        normalized: String,
    },

    /// A row does not have one cell per column.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The amount fill value is NaN or infinite.
    #[error("amount fill value must be finite, got {value}")]
    NonFiniteAmountFill { value: f64 },
}

pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CleanError::HeaderCollision {
            first: "Order Date".to_string(),
            second: "order_date".to_string(),
            normalized: "order_date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "columns 'Order Date' and 'order_date' both normalize to 'order_date'"
        );
        let err = CleanError::RowWidth {
            row: 3,
            expected: 5,
            found: 4,
        };
        assert_eq!(err.to_string(), "row 3 has 4 cells, expected 5");
        let err = CleanError::NonFiniteAmountFill {
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "amount fill value must be finite, got inf");
    }
}
