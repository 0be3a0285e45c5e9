//! Data models for profit-calc
//!
//! Input line items (labor, products, expenses, scenario cases) and the
//! computed summary and scenario results. Inputs are deserialized leniently
//! at the boundary; the computation core only ever sees parsed numbers.

pub mod case;
pub mod expense;
pub mod labor;
pub mod plan;
pub mod product;
pub mod scenario;
pub mod summary;

pub use case::{
    CaseInput, CostEntry, EffortEntry, ExternalPurchaseBase, ExternalPurchaseStage,
    RevenueBreakdown, ReviewCases, RiskCostBase,
};
pub use expense::{ExpenseCategory, ExpenseItem, ExpenseMode};
pub use labor::{LaborAllocationItem, LaborCategory};
pub use plan::ProfitabilityPlan;
pub use product::{ProductCategory, ProductSaleItem};
pub use scenario::{ProfitFigure, ReviewOutcome, ScenarioResult};
pub use summary::{
    ProductPartition, ProductSummary, ProfitabilitySummary, SectionTotal, ServicePartition,
    ServiceSummary,
};
