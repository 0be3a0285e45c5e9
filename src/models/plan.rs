//! The project plan document fed to the aggregator

use serde::{Deserialize, Serialize};

use super::{ExpenseItem, LaborAllocationItem, ProductSaleItem};
use crate::numeric::lenient_amount;

/// Line items and adjustments of one profitability plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfitabilityPlan {
    /// Project name, used only for report headers
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    #[serde(default)]
    pub labor: Vec<LaborAllocationItem>,

    #[serde(default)]
    pub products: Vec<ProductSaleItem>,

    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,

    /// Revenue outside the plan (e.g. maintenance carried over)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub extra_revenue: f64,

    /// Expense outside the plan
    #[serde(default, deserialize_with = "lenient_amount")]
    pub extra_expense: f64,
}

impl ProfitabilityPlan {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labor.is_empty() && self.products.is_empty() && self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let plan: ProfitabilityPlan = serde_json::from_str("{}").unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.extra_revenue, 0.0);
    }

    #[test]
    fn test_yaml_document() {
        let yaml = r#"
project: Portal renewal
labor:
  - category: company
    monthly_allocation:
      2025-01: 1
    proposed_unit_price: 9000
extra_revenue: "1,000"
"#;
        let plan: ProfitabilityPlan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.project, "Portal renewal");
        assert_eq!(plan.labor.len(), 1);
        assert_eq!(plan.labor[0].total_mm(), 1.0);
        assert_eq!(plan.extra_revenue, 1000.0);
    }
}
