//! Scenario ("case") inputs for the operating-profit waterfall
//!
//! A review carries two independently configured cases, Worst and Best.
//! Each case holds its revenue estimate, itemized costs and effort, and the
//! percentage/base knobs for the risk cost and the two external-purchase
//! deduction stages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProfitError, ProfitResult};
use crate::numeric::{lenient_amount, lenient_mm};

/// Calculation base for the risk cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskCostBase {
    #[default]
    TotalRevenue,
    /// Software / goods revenue
    RevenueSw,
    /// Hardware revenue
    RevenueHw,
    /// Service revenue
    RevenueService,
    /// Operating profit is not known yet when the risk cost is computed;
    /// this base always resolves to zero
    OperatingProfit,
}

impl fmt::Display for RiskCostBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCostBase::TotalRevenue => write!(f, "total revenue"),
            RiskCostBase::RevenueSw => write!(f, "goods revenue"),
            RiskCostBase::RevenueHw => write!(f, "hardware revenue"),
            RiskCostBase::RevenueService => write!(f, "service revenue"),
            RiskCostBase::OperatingProfit => write!(f, "operating profit"),
        }
    }
}

/// Calculation base for an external-purchase deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExternalPurchaseBase {
    TotalRevenue,
    RevenueSw,
    RevenueHw,
    RevenueService,
    /// Operating profit before any external purchase
    #[default]
    OperatingProfit,
    /// In stage 1: the percentage applies to what remains after the
    /// deduction (markup formula). In stage 2: the finalized stage-1 profit.
    OperatingProfitEp1,
}

impl fmt::Display for ExternalPurchaseBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalPurchaseBase::TotalRevenue => write!(f, "total revenue"),
            ExternalPurchaseBase::RevenueSw => write!(f, "goods revenue"),
            ExternalPurchaseBase::RevenueHw => write!(f, "hardware revenue"),
            ExternalPurchaseBase::RevenueService => write!(f, "service revenue"),
            ExternalPurchaseBase::OperatingProfit => write!(f, "operating profit"),
            ExternalPurchaseBase::OperatingProfitEp1 => write!(f, "operating profit (EP1)"),
        }
    }
}

/// Expected order value by category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RevenueBreakdown {
    /// Software / goods
    #[serde(default, deserialize_with = "lenient_amount")]
    pub goods: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub hardware: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub services: f64,
}

impl RevenueBreakdown {
    pub fn new(goods: f64, hardware: f64, services: f64) -> Self {
        Self {
            goods,
            hardware,
            services,
        }
    }
}

/// A labelled amount (project cost, third-party goods purchase)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostEntry {
    #[serde(default)]
    pub item: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl CostEntry {
    pub fn new(item: impl Into<String>, amount: f64) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

/// A labelled effort estimate in person-months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EffortEntry {
    #[serde(default)]
    pub item: String,
    #[serde(default, deserialize_with = "lenient_mm")]
    pub mm: f64,
}

impl EffortEntry {
    pub fn new(item: impl Into<String>, mm: f64) -> Self {
        Self {
            item: item.into(),
            mm,
        }
    }
}

/// One external-purchase deduction stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPurchaseStage {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub percent: f64,
    #[serde(default)]
    pub base: ExternalPurchaseBase,
    #[serde(default)]
    pub include: bool,
}

impl ExternalPurchaseStage {
    pub fn new(percent: f64, base: ExternalPurchaseBase, include: bool) -> Self {
        Self {
            percent,
            base,
            include,
        }
    }

    /// A stage that deducts nothing
    pub fn disabled() -> Self {
        Self::new(0.0, ExternalPurchaseBase::OperatingProfit, false)
    }
}

impl Default for ExternalPurchaseStage {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Everything needed to evaluate one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    #[serde(default)]
    pub revenue: RevenueBreakdown,

    /// Project execution costs
    #[serde(default)]
    pub project_costs: Vec<CostEntry>,

    /// Other goods purchased from third parties
    #[serde(default)]
    pub other_goods: Vec<CostEntry>,

    /// Estimated effort, converted to cost at the fixed person-month rate
    #[serde(default)]
    pub estimated_mm: Vec<EffortEntry>,

    #[serde(
        default = "default_risk_cost_percent",
        deserialize_with = "lenient_amount"
    )]
    pub risk_cost_percent: f64,

    #[serde(default)]
    pub risk_cost_base: RiskCostBase,

    #[serde(default = "default_first_stage")]
    pub external_purchase_1: ExternalPurchaseStage,

    #[serde(default)]
    pub external_purchase_2: ExternalPurchaseStage,
}

fn default_risk_cost_percent() -> f64 {
    10.0
}

fn default_first_stage() -> ExternalPurchaseStage {
    ExternalPurchaseStage::new(30.0, ExternalPurchaseBase::OperatingProfit, false)
}

impl Default for CaseInput {
    fn default() -> Self {
        Self {
            revenue: RevenueBreakdown::default(),
            project_costs: Vec::new(),
            other_goods: Vec::new(),
            estimated_mm: Vec::new(),
            risk_cost_percent: default_risk_cost_percent(),
            risk_cost_base: RiskCostBase::default(),
            external_purchase_1: default_first_stage(),
            external_purchase_2: ExternalPurchaseStage::default(),
        }
    }
}

impl CaseInput {
    /// Create a case with the given revenue and default knobs
    pub fn new(revenue: RevenueBreakdown) -> Self {
        Self {
            revenue,
            ..Self::default()
        }
    }

    /// Total estimated person-months, rounded to two decimals
    pub fn total_mm(&self) -> f64 {
        crate::numeric::round_mm(self.estimated_mm.iter().map(|e| e.mm).sum())
    }

    /// Check the rules an editor should enforce before saving
    ///
    /// The calculator never fails on these; a stage-2 deduction without
    /// stage 1 is simply not applied.
    pub fn validate(&self) -> ProfitResult<()> {
        if self.external_purchase_2.include && !self.external_purchase_1.include {
            return Err(ProfitError::Validation(
                "External purchase 2 cannot be enabled without external purchase 1".into(),
            ));
        }

        let percents = [
            ("risk cost", self.risk_cost_percent),
            ("external purchase 1", self.external_purchase_1.percent),
            ("external purchase 2", self.external_purchase_2.percent),
        ];
        for (label, pct) in percents {
            if !pct.is_finite() {
                return Err(ProfitError::Validation(format!(
                    "{} percentage must be a finite number",
                    label
                )));
            }
        }

        Ok(())
    }
}

/// The two cases of a profitability review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReviewCases {
    #[serde(default)]
    pub worst: CaseInput,
    #[serde(default)]
    pub best: CaseInput,
}

impl ReviewCases {
    /// Validate both cases, naming the failing one
    pub fn validate(&self) -> ProfitResult<()> {
        self.worst
            .validate()
            .map_err(|e| ProfitError::Validation(format!("Worst case: {}", e)))?;
        self.best
            .validate()
            .map_err(|e| ProfitError::Validation(format!("Best case: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let case = CaseInput::default();
        assert_eq!(case.risk_cost_percent, 10.0);
        assert_eq!(case.risk_cost_base, RiskCostBase::TotalRevenue);
        assert_eq!(case.external_purchase_1.percent, 30.0);
        assert!(!case.external_purchase_1.include);
        assert!(!case.external_purchase_2.include);
    }

    #[test]
    fn test_deserialize_selectors() {
        let json = r#"{
            "revenue": {"goods": "10,000", "services": 5000},
            "risk_cost_base": "revenue_service",
            "external_purchase_1": {"percent": 25, "base": "operating_profit_ep1", "include": true}
        }"#;
        let case: CaseInput = serde_json::from_str(json).unwrap();
        assert_eq!(case.revenue.goods, 10_000.0);
        assert_eq!(case.revenue.hardware, 0.0);
        assert_eq!(case.risk_cost_base, RiskCostBase::RevenueService);
        assert_eq!(
            case.external_purchase_1.base,
            ExternalPurchaseBase::OperatingProfitEp1
        );
        assert_eq!(case.risk_cost_percent, 10.0);
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        let result: Result<CaseInput, _> =
            serde_json::from_str(r#"{"risk_cost_base": "net_profit"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_stage_gating_validation() {
        let mut case = CaseInput::default();
        case.external_purchase_2.include = true;
        let err = case.validate().unwrap_err();
        assert!(err.is_validation());

        case.external_purchase_1.include = true;
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_review_validation_names_case() {
        let mut review = ReviewCases::default();
        review.best.external_purchase_2.include = true;
        let err = review.validate().unwrap_err();
        assert!(err.to_string().contains("Best case"));
    }

    #[test]
    fn test_total_mm() {
        let mut case = CaseInput::default();
        case.estimated_mm = vec![EffortEntry::new("dev", 1.1), EffortEntry::new("qa", 0.2)];
        assert_eq!(case.total_mm(), 1.3);
    }
}
