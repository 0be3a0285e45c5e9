//! Derived project expenses
//!
//! Auto-calculated expense rows take their monthly values from the effort
//! table and a standard rate: e.g. overtime meals = company MM × meal
//! allowance, regional rental = (company + outsourced MM) × rental standard.
//! Manual rows are never touched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::effort::{EffortTable, MonthlyEffort};
use crate::models::{ExpenseItem, ExpenseMode};
use crate::numeric::finite_or_zero;

/// Which effort figure an expense standard scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EffortBasis {
    /// Company staff person-months
    #[default]
    Internal,
    /// Outsourced person-months
    External,
    /// Both
    All,
}

impl EffortBasis {
    pub fn effort_of(&self, effort: &MonthlyEffort) -> f64 {
        match self {
            EffortBasis::Internal => effort.internal,
            EffortBasis::External => effort.external,
            EffortBasis::All => effort.total(),
        }
    }
}

/// A standard expense rate per person-month, matched to expense rows by label
///
/// Settings may give the rate directly or as `input_value × unit_value`
/// with a `fixed_amount` fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StandardComponents")]
pub struct ExpenseStandard {
    /// Label of the expense row this standard drives
    pub item: String,
    #[serde(default)]
    pub basis: EffortBasis,
    /// Amount per person-month
    pub rate: f64,
}

impl ExpenseStandard {
    pub fn new(item: impl Into<String>, basis: EffortBasis, rate: f64) -> Self {
        Self {
            item: item.into(),
            basis,
            rate,
        }
    }

    /// Build a standard from a quantity × unit-value pair, falling back to a
    /// fixed amount when either part is missing
    pub fn from_components(
        item: impl Into<String>,
        basis: EffortBasis,
        input_value: Option<f64>,
        unit_value: Option<f64>,
        fixed_amount: f64,
    ) -> Self {
        let rate = match (input_value, unit_value) {
            (Some(input), Some(unit)) => input * unit,
            _ => fixed_amount,
        };
        Self::new(item, basis, finite_or_zero(rate))
    }

    fn matches(&self, item: &ExpenseItem) -> bool {
        self.item.trim() == item.item.trim()
    }
}

/// Settings form of an expense standard
#[derive(Deserialize)]
struct StandardComponents {
    item: String,
    #[serde(default)]
    basis: EffortBasis,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    input_value: Option<f64>,
    #[serde(default)]
    unit_value: Option<f64>,
    #[serde(default)]
    fixed_amount: f64,
}

impl From<StandardComponents> for ExpenseStandard {
    fn from(raw: StandardComponents) -> Self {
        match raw.rate {
            Some(rate) => Self::new(raw.item, raw.basis, finite_or_zero(rate)),
            None => Self::from_components(
                raw.item,
                raw.basis,
                raw.input_value,
                raw.unit_value,
                raw.fixed_amount,
            ),
        }
    }
}

/// Monthly values for one standard over the effort table
///
/// Months whose computed value is negative are left out.
pub fn derive_monthly_values(
    standard: &ExpenseStandard,
    table: &EffortTable,
) -> BTreeMap<String, f64> {
    table
        .iter()
        .map(|(month, effort)| (month.clone(), standard.basis.effort_of(effort) * standard.rate))
        .filter(|(_, value)| *value >= 0.0)
        .collect()
}

/// Recompute every derived expense row that has a matching standard
///
/// Months outside the effort table keep their previous values. Rows without
/// a standard and manual rows are returned unchanged.
pub fn apply_standards(
    expenses: &[ExpenseItem],
    standards: &[ExpenseStandard],
    table: &EffortTable,
) -> Vec<ExpenseItem> {
    expenses
        .iter()
        .map(|item| {
            if item.effective_mode() == ExpenseMode::Manual {
                return item.clone();
            }
            match standards.iter().find(|s| s.matches(item)) {
                Some(standard) => {
                    let mut derived = item.clone();
                    for month in table.keys() {
                        derived.monthly_values.remove(month);
                    }
                    derived
                        .monthly_values
                        .extend(derive_monthly_values(standard, table));
                    derived
                }
                None => item.clone(),
            }
        })
        .collect()
}
