//! Best/Worst case operating-profit calculator
//!
//! Evaluates one [`CaseInput`] into a staged waterfall:
//!
//! 1. operating profit = revenue − third-party goods − project costs
//!    − effort cost − risk cost
//! 2. EP1 profit = operating profit − first external purchase
//! 3. EP2 profit = EP1 profit − second external purchase
//!
//! The steps run strictly in this order because later bases may refer to
//! earlier profit figures.

use crate::models::{
    CaseInput, ExternalPurchaseBase, ExternalPurchaseStage, ProfitFigure, RevenueBreakdown,
    ReviewCases, ReviewOutcome, RiskCostBase, ScenarioResult,
};
use crate::numeric::{finite_or_zero, markup_share, percent_of, percent_of_positive};

/// Standard fully-loaded cost of one person-month
pub const FIXED_MM_RATE: f64 = 10_000_000.0;

/// Total expected revenue across the three categories
pub fn total_revenue(revenue: &RevenueBreakdown) -> f64 {
    revenue.goods + revenue.services + revenue.hardware
}

/// Base value for the risk cost
///
/// Operating profit has not been computed when the risk cost is needed, so
/// that base resolves to zero.
pub fn risk_cost_base_value(base: RiskCostBase, revenue: &RevenueBreakdown) -> f64 {
    match base {
        RiskCostBase::TotalRevenue => total_revenue(revenue),
        RiskCostBase::RevenueSw => revenue.goods,
        RiskCostBase::RevenueHw => revenue.hardware,
        RiskCostBase::RevenueService => revenue.services,
        RiskCostBase::OperatingProfit => 0.0,
    }
}

/// Deduction for the first external-purchase stage
///
/// With the `OperatingProfitEp1` base the percentage is a markup on what
/// remains after the deduction, so the share is `profit × pct / (100 + pct)`.
pub fn external_purchase_1_cost(
    stage: &ExternalPurchaseStage,
    revenue: &RevenueBreakdown,
    operating_profit: f64,
) -> f64 {
    if !stage.include {
        return 0.0;
    }
    match stage.base {
        ExternalPurchaseBase::OperatingProfitEp1 => markup_share(operating_profit, stage.percent),
        ExternalPurchaseBase::TotalRevenue => percent_of(total_revenue(revenue), stage.percent),
        ExternalPurchaseBase::RevenueSw => percent_of(revenue.goods, stage.percent),
        ExternalPurchaseBase::RevenueHw => percent_of(revenue.hardware, stage.percent),
        ExternalPurchaseBase::RevenueService => percent_of(revenue.services, stage.percent),
        ExternalPurchaseBase::OperatingProfit => percent_of(operating_profit, stage.percent),
    }
}

/// Base value for the second external-purchase stage
pub fn external_purchase_2_base_value(
    base: ExternalPurchaseBase,
    revenue: &RevenueBreakdown,
    operating_profit: f64,
    operating_profit_ep1: f64,
) -> f64 {
    match base {
        ExternalPurchaseBase::TotalRevenue => total_revenue(revenue),
        ExternalPurchaseBase::RevenueSw => revenue.goods,
        ExternalPurchaseBase::RevenueHw => revenue.hardware,
        ExternalPurchaseBase::RevenueService => revenue.services,
        ExternalPurchaseBase::OperatingProfit => operating_profit,
        ExternalPurchaseBase::OperatingProfitEp1 => operating_profit_ep1,
    }
}

/// Evaluate one case into its operating-profit waterfall
pub fn evaluate(input: &CaseInput) -> ScenarioResult {
    let revenue = &input.revenue;
    let total_revenue = total_revenue(revenue);

    let other_goods_purchase: f64 = input.other_goods.iter().map(|e| e.amount).sum();
    let total_project_costs: f64 = input.project_costs.iter().map(|e| e.amount).sum();
    let estimated_effort_cost: f64 = input
        .estimated_mm
        .iter()
        .map(|e| e.mm * FIXED_MM_RATE)
        .sum();

    let risk_base = risk_cost_base_value(input.risk_cost_base, revenue);
    let risk_cost = percent_of(risk_base, input.risk_cost_percent);

    let operating_profit = finite_or_zero(
        total_revenue - other_goods_purchase - total_project_costs - estimated_effort_cost
            - risk_cost,
    );

    let ep1_cost = external_purchase_1_cost(&input.external_purchase_1, revenue, operating_profit);
    let operating_profit_ep1 = operating_profit - ep1_cost;

    let stage2 = &input.external_purchase_2;
    let ep2_cost = if input.external_purchase_1.include && stage2.include {
        let base = external_purchase_2_base_value(
            stage2.base,
            revenue,
            operating_profit,
            operating_profit_ep1,
        );
        percent_of(base, stage2.percent)
    } else {
        0.0
    };
    let operating_profit_ep2 = operating_profit_ep1 - ep2_cost;

    let figure = |amount: f64| ProfitFigure {
        amount,
        percent: percent_of_positive(amount, total_revenue),
    };

    ScenarioResult {
        total_revenue,
        other_goods_purchase,
        total_project_costs,
        estimated_effort_cost,
        risk_cost,
        operating_profit: figure(operating_profit),
        external_purchase_1_cost: ep1_cost,
        operating_profit_ep1: figure(operating_profit_ep1),
        external_purchase_2_cost: ep2_cost,
        operating_profit_ep2: figure(operating_profit_ep2),
    }
}

/// Evaluate the Worst and Best cases of a review independently
pub fn evaluate_review(cases: &ReviewCases) -> ReviewOutcome {
    ReviewOutcome {
        worst: evaluate(&cases.worst),
        best: evaluate(&cases.best),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostEntry, EffortEntry};

    fn case_with_profit(profit: f64) -> CaseInput {
        let mut case = CaseInput::new(RevenueBreakdown::new(profit, 0.0, 0.0));
        case.risk_cost_percent = 0.0;
        case
    }

    #[test]
    fn test_end_to_end_example() {
        let mut case = CaseInput::new(RevenueBreakdown::new(10_000.0, 0.0, 5_000.0));
        case.project_costs = vec![CostEntry::new("A", 2_000.0)];
        case.estimated_mm = vec![EffortEntry::new("dev", 1.0)];
        case.risk_cost_percent = 10.0;
        case.risk_cost_base = RiskCostBase::TotalRevenue;

        let result = evaluate(&case);
        assert_eq!(result.total_revenue, 15_000.0);
        assert_eq!(result.risk_cost, 1_500.0);
        assert_eq!(result.estimated_effort_cost, 10_000_000.0);
        assert_eq!(
            result.operating_profit.amount,
            15_000.0 - 0.0 - 2_000.0 - 10_000_000.0 - 1_500.0
        );
        assert_eq!(result.operating_profit.amount, -9_988_500.0);
        assert_eq!(
            result.operating_profit.percent,
            -9_988_500.0 / 15_000.0 * 100.0
        );
        // Stage 1 is off by default
        assert_eq!(result.external_purchase_1_cost, 0.0);
        assert_eq!(result.operating_profit_ep2.amount, -9_988_500.0);
    }

    #[test]
    fn test_markup_formula() {
        let mut case = case_with_profit(1_000.0);
        case.external_purchase_1 =
            ExternalPurchaseStage::new(25.0, ExternalPurchaseBase::OperatingProfitEp1, true);

        let result = evaluate(&case);
        assert_eq!(result.operating_profit.amount, 1_000.0);
        assert_eq!(result.external_purchase_1_cost, 200.0);
        assert_eq!(result.operating_profit_ep1.amount, 800.0);
        // The deduction is exactly 25% of what remains
        assert_eq!(
            result.external_purchase_1_cost / result.operating_profit_ep1.amount,
            0.25
        );
    }

    #[test]
    fn test_plain_percentage_on_operating_profit() {
        let mut case = case_with_profit(1_000.0);
        case.external_purchase_1 =
            ExternalPurchaseStage::new(30.0, ExternalPurchaseBase::OperatingProfit, true);

        let result = evaluate(&case);
        assert_eq!(result.external_purchase_1_cost, 300.0);
        assert_eq!(result.operating_profit_ep1.amount, 700.0);
        assert_eq!(result.operating_profit_ep1.percent, 70.0);
    }

    #[test]
    fn test_risk_cost_bases() {
        let revenue = RevenueBreakdown::new(100.0, 20.0, 30.0);
        assert_eq!(risk_cost_base_value(RiskCostBase::TotalRevenue, &revenue), 150.0);
        assert_eq!(risk_cost_base_value(RiskCostBase::RevenueSw, &revenue), 100.0);
        assert_eq!(risk_cost_base_value(RiskCostBase::RevenueHw, &revenue), 20.0);
        assert_eq!(risk_cost_base_value(RiskCostBase::RevenueService, &revenue), 30.0);
        assert_eq!(risk_cost_base_value(RiskCostBase::OperatingProfit, &revenue), 0.0);
    }

    #[test]
    fn test_operating_profit_risk_base_degenerates_to_zero() {
        let mut case = CaseInput::new(RevenueBreakdown::new(10_000.0, 0.0, 0.0));
        case.risk_cost_percent = 50.0;
        case.risk_cost_base = RiskCostBase::OperatingProfit;

        let result = evaluate(&case);
        assert_eq!(result.risk_cost, 0.0);
        assert_eq!(result.operating_profit.amount, 10_000.0);
    }

    #[test]
    fn test_second_stage_on_ep1_profit() {
        let mut case = case_with_profit(1_000.0);
        case.external_purchase_1 =
            ExternalPurchaseStage::new(20.0, ExternalPurchaseBase::OperatingProfit, true);
        case.external_purchase_2 =
            ExternalPurchaseStage::new(50.0, ExternalPurchaseBase::OperatingProfitEp1, true);

        let result = evaluate(&case);
        assert_eq!(result.operating_profit_ep1.amount, 800.0);
        assert_eq!(result.external_purchase_2_cost, 400.0);
        assert_eq!(result.operating_profit_ep2.amount, 400.0);
        assert_eq!(result.final_profit().percent, 40.0);
    }

    #[test]
    fn test_second_stage_revenue_bases() {
        let revenue = RevenueBreakdown::new(100.0, 20.0, 30.0);
        assert_eq!(
            external_purchase_2_base_value(ExternalPurchaseBase::RevenueHw, &revenue, 5.0, 4.0),
            20.0
        );
        assert_eq!(
            external_purchase_2_base_value(ExternalPurchaseBase::OperatingProfit, &revenue, 5.0, 4.0),
            5.0
        );
        assert_eq!(
            external_purchase_2_base_value(
                ExternalPurchaseBase::OperatingProfitEp1,
                &revenue,
                5.0,
                4.0
            ),
            4.0
        );
    }

    #[test]
    fn test_second_stage_requires_first() {
        let mut case = case_with_profit(1_000.0);
        case.external_purchase_1 =
            ExternalPurchaseStage::new(20.0, ExternalPurchaseBase::OperatingProfit, false);
        case.external_purchase_2 =
            ExternalPurchaseStage::new(50.0, ExternalPurchaseBase::TotalRevenue, true);

        let result = evaluate(&case);
        assert_eq!(result.external_purchase_1_cost, 0.0);
        assert_eq!(result.external_purchase_2_cost, 0.0);
        assert_eq!(result.operating_profit_ep2.amount, 1_000.0);
    }

    #[test]
    fn test_zero_revenue_rates() {
        let mut case = CaseInput::default();
        case.project_costs = vec![CostEntry::new("Travel", 300.0)];

        let result = evaluate(&case);
        assert_eq!(result.total_revenue, 0.0);
        assert_eq!(result.operating_profit.amount, -300.0);
        assert_eq!(result.operating_profit.percent, 0.0);
        assert_eq!(result.operating_profit_ep1.percent, 0.0);
        assert_eq!(result.operating_profit_ep2.percent, 0.0);
    }

    #[test]
    fn test_negative_profit_propagates_through_stages() {
        let mut case = case_with_profit(0.0);
        case.other_goods = vec![CostEntry::new("Licenses", 1_000.0)];
        case.external_purchase_1 =
            ExternalPurchaseStage::new(10.0, ExternalPurchaseBase::OperatingProfit, true);

        let result = evaluate(&case);
        assert_eq!(result.operating_profit.amount, -1_000.0);
        assert_eq!(result.external_purchase_1_cost, -100.0);
        assert_eq!(result.operating_profit_ep1.amount, -900.0);
    }

    #[test]
    fn test_review_cases_are_independent() {
        let mut cases = ReviewCases::default();
        cases.worst = case_with_profit(1_000.0);
        cases.best = case_with_profit(2_000.0);
        cases.best.external_purchase_1 =
            ExternalPurchaseStage::new(25.0, ExternalPurchaseBase::OperatingProfitEp1, true);

        let outcome = evaluate_review(&cases);
        assert_eq!(outcome.worst.final_profit().amount, 1_000.0);
        assert_eq!(outcome.best.final_profit().amount, 1_600.0);
        assert_eq!(outcome.spread(), 600.0);
        assert_eq!(outcome.worst, evaluate(&cases.worst));
    }

    #[test]
    fn test_idempotent() {
        let mut case = CaseInput::new(RevenueBreakdown::new(12_345.0, 678.0, 910.0));
        case.estimated_mm = vec![EffortEntry::new("dev", 0.37)];
        case.external_purchase_1 =
            ExternalPurchaseStage::new(17.0, ExternalPurchaseBase::OperatingProfitEp1, true);

        let first = evaluate(&case);
        let second = evaluate(&case);
        assert_eq!(first, second);
        assert_eq!(
            first.operating_profit_ep1.amount.to_bits(),
            second.operating_profit_ep1.amount.to_bits()
        );
    }
}
