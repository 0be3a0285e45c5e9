//! Monthly effort summary
//!
//! Splits the labor plan's person-months per calendar month into company
//! and outsourced effort. Derived expenses are computed from this table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::LaborAllocationItem;
use crate::numeric::round_mm;

/// Person-months for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthlyEffort {
    /// Company staff
    pub internal: f64,
    /// Outsourced staff
    pub external: f64,
}

impl MonthlyEffort {
    pub fn total(&self) -> f64 {
        self.internal + self.external
    }
}

/// Month-keyed effort table, ordered by month label
pub type EffortTable = BTreeMap<String, MonthlyEffort>;

/// Build the per-month effort table for a labor plan
pub fn monthly_effort(labor: &[LaborAllocationItem]) -> EffortTable {
    let mut table = EffortTable::new();

    for item in labor {
        for (month, mm) in &item.monthly_allocation {
            let entry = table.entry(month.clone()).or_default();
            if item.category().is_external() {
                entry.external += mm;
            } else {
                entry.internal += mm;
            }
        }
    }

    for effort in table.values_mut() {
        effort.internal = round_mm(effort.internal);
        effort.external = round_mm(effort.external);
    }

    table
}

/// Sum of the whole table
pub fn effort_totals(table: &EffortTable) -> MonthlyEffort {
    let totals = table
        .values()
        .fold(MonthlyEffort::default(), |acc, e| MonthlyEffort {
            internal: acc.internal + e.internal,
            external: acc.external + e.external,
        });

    MonthlyEffort {
        internal: round_mm(totals.internal),
        external: round_mm(totals.external),
    }
}
