//! Project expense line items
//!
//! General expenses (overtime meals, department charges) are derived from
//! monthly effort and a standard rate. Special expenses (workshops, kick-off,
//! regional travel) may be derived or typed in by hand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::numeric::{lenient_amount_map, sum_monthly};

/// Expense bucket as reported in the profitability summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    #[default]
    General,
    Special,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseCategory::General => write!(f, "General"),
            ExpenseCategory::Special => write!(f, "Special"),
        }
    }
}

/// How the monthly values of an expense row are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseMode {
    /// Recomputed from effort totals and a standard rate
    #[default]
    Derived,
    /// Typed in by hand
    Manual,
}

/// An expense row with one value per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExpenseItem {
    #[serde(default)]
    pub category: ExpenseCategory,

    /// Row label ("Overtime meals", "Workshop", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub item: String,

    #[serde(default, deserialize_with = "lenient_amount_map")]
    pub monthly_values: BTreeMap<String, f64>,

    #[serde(default)]
    pub mode: ExpenseMode,
}

impl ExpenseItem {
    pub fn new(category: ExpenseCategory, item: impl Into<String>) -> Self {
        Self {
            category,
            item: item.into(),
            ..Self::default()
        }
    }

    /// Set a month's value (builder style)
    pub fn with_month(mut self, month: impl Into<String>, value: f64) -> Self {
        self.monthly_values.insert(month.into(), value);
        self
    }

    /// Mark the row as manually entered (builder style)
    pub fn manual(mut self) -> Self {
        self.mode = ExpenseMode::Manual;
        self
    }

    /// Sum over all months
    pub fn total(&self) -> f64 {
        sum_monthly(&self.monthly_values)
    }

    /// Only special expenses may be edited; general rows always show as derived
    pub fn is_editable(&self) -> bool {
        self.category == ExpenseCategory::Special
    }

    /// Effective mode: general rows are always derived
    pub fn effective_mode(&self) -> ExpenseMode {
        match self.category {
            ExpenseCategory::General => ExpenseMode::Derived,
            ExpenseCategory::Special => self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total() {
        let item = ExpenseItem::new(ExpenseCategory::Special, "Workshop")
            .with_month("2025-01", 300.0)
            .with_month("2025-02", 150.0);
        assert_eq!(item.total(), 450.0);
    }

    #[test]
    fn test_general_rows_are_always_derived() {
        let general = ExpenseItem::new(ExpenseCategory::General, "Overtime meals").manual();
        assert!(!general.is_editable());
        assert_eq!(general.effective_mode(), ExpenseMode::Derived);

        let special = ExpenseItem::new(ExpenseCategory::Special, "Kick-off").manual();
        assert!(special.is_editable());
        assert_eq!(special.effective_mode(), ExpenseMode::Manual);
    }

    #[test]
    fn test_deserialize() {
        let item: ExpenseItem = serde_json::from_str(
            r#"{"category": "special", "item": "Rental", "monthly_values": {"2025-03": "1,000"}, "mode": "manual"}"#,
        )
        .unwrap();
        assert_eq!(item.total(), 1000.0);
        assert_eq!(item.mode, ExpenseMode::Manual);
    }
}
