//! Column roles and header name canonicalization.

use serde::{Deserialize, Serialize};

/// Semantic category of a column, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    Identifier,
    Name,
    Amount,
    Status,
    Date,
    Unclassified,
}

impl ColumnRole {
    /// Resolve the role of a column name.
    ///
    /// Matching is exact after canonicalization, so `" Amount "` is an amount
    /// column but `order_amount` is not.
    pub fn from_name(name: &str) -> Self {
        match normalize_column_name(name).as_str() {
            "amount" => Self::Amount,
            "status" => Self::Status,
            "date" => Self::Date,
            "id" | "transaction_id" => Self::Identifier,
            "name" | "customer_name" => Self::Name,
            _ => Self::Unclassified,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Identifier => "Identifier",
            Self::Name => "Name",
            Self::Amount => "Amount",
            Self::Status => "Status",
            Self::Date => "Date",
            Self::Unclassified => "Unclassified",
        }
    }
}

/// Canonical header form: trimmed, lower-cased, each space replaced by `_`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Roles of every column of a table, resolved once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    roles: Vec<ColumnRole>,
    amount: Option<usize>,
    status: Option<usize>,
    date: Option<usize>,
}

impl ColumnRoles {
    /// Resolve roles for a header. The first column claiming a normalized
    /// role wins; later ones are treated as unclassified.
    pub fn resolve<S: AsRef<str>>(columns: &[S]) -> Self {
        let mut resolved = Self::default();
        for (index, column) in columns.iter().enumerate() {
            let mut role = ColumnRole::from_name(column.as_ref());
            let slot = match role {
                ColumnRole::Amount => Some(&mut resolved.amount),
                ColumnRole::Status => Some(&mut resolved.status),
                ColumnRole::Date => Some(&mut resolved.date),
                _ => None,
            };
            if let Some(slot) = slot {
                if slot.is_some() {
                    role = ColumnRole::Unclassified;
                } else {
                    *slot = Some(index);
                }
            }
            resolved.roles.push(role);
        }
        resolved
    }

    pub fn amount(&self) -> Option<usize> {
        self.amount
    }

    pub fn status(&self) -> Option<usize> {
        self.status
    }

    pub fn date(&self) -> Option<usize> {
        self.date
    }

    /// Role of the column at `index`, unclassified when out of range.
    pub fn role(&self, index: usize) -> ColumnRole {
        self.roles
            .get(index)
            .copied()
            .unwrap_or(ColumnRole::Unclassified)
    }
}
