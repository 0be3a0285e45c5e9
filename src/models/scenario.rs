//! Operating-profit waterfall produced by the scenario calculator

use serde::{Deserialize, Serialize};

/// A profit figure and its share of total revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfitFigure {
    pub amount: f64,
    /// amount / total revenue × 100
    pub percent: f64,
}

/// Result of evaluating one case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScenarioResult {
    pub total_revenue: f64,
    pub other_goods_purchase: f64,
    pub total_project_costs: f64,
    pub estimated_effort_cost: f64,
    pub risk_cost: f64,
    /// Operating profit before external purchases
    pub operating_profit: ProfitFigure,
    pub external_purchase_1_cost: f64,
    /// Operating profit after the first external purchase
    pub operating_profit_ep1: ProfitFigure,
    pub external_purchase_2_cost: f64,
    /// Operating profit after the second external purchase
    pub operating_profit_ep2: ProfitFigure,
}

impl ScenarioResult {
    /// The figure reported as the case's bottom line
    pub fn final_profit(&self) -> ProfitFigure {
        self.operating_profit_ep2
    }
}

/// Worst and Best case results of one review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ReviewOutcome {
    pub worst: ScenarioResult,
    pub best: ScenarioResult,
}

impl ReviewOutcome {
    /// Best-case final profit minus worst-case final profit
    pub fn spread(&self) -> f64 {
        self.best.final_profit().amount - self.worst.final_profit().amount
    }
}
