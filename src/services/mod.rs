//! Computation layer for profit-calc
//!
//! Every function here is a pure function of its inputs: no I/O, no shared
//! state, and no failure modes. Callers re-run them whenever an input changes.

pub mod aggregator;
pub mod effort;
pub mod expense;
pub mod product;
pub mod scenario;

pub use aggregator::{aggregate, AggregationPolicy, Aggregator};
pub use effort::{effort_totals, monthly_effort, EffortTable, MonthlyEffort};
pub use expense::{apply_standards, derive_monthly_values, EffortBasis, ExpenseStandard};
pub use product::{product_totals, ProductPlanTotals, ProductSubtotal};
pub use scenario::{evaluate, evaluate_review, FIXED_MM_RATE};
