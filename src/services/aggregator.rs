//! Profitability aggregation
//!
//! Rolls labor, product and expense line items up into a categorized
//! profit-and-loss summary. Each input collection is walked exactly once;
//! nothing is cached between calls, so the same inputs always produce the
//! same summary.

use crate::models::{
    ExpenseCategory, ExpenseItem, LaborAllocationItem, ProductCategory, ProductPartition,
    ProductSaleItem, ProductSummary, ProfitabilityPlan, ProfitabilitySummary, SectionTotal,
    ServicePartition, ServiceSummary,
};
use crate::numeric::{finite_or_zero, percent_of_total, ratio, round_to_unit};

/// Contract-level policy inputs for the aggregation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregationPolicy {
    /// Delay-cost surcharge as a fraction of service labor cost (0.1 = 10%)
    pub delay_rate: f64,
}

impl AggregationPolicy {
    pub fn with_delay_rate(delay_rate: f64) -> Self {
        Self {
            delay_rate: finite_or_zero(delay_rate),
        }
    }
}

/// Computes profitability summaries under a fixed policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: AggregationPolicy,
}

impl Aggregator {
    pub fn new(policy: AggregationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AggregationPolicy {
        &self.policy
    }

    /// Summarize a whole plan document
    pub fn aggregate_plan(&self, plan: &ProfitabilityPlan) -> ProfitabilitySummary {
        self.aggregate(
            &plan.labor,
            &plan.products,
            &plan.expenses,
            plan.extra_revenue,
            plan.extra_expense,
        )
    }

    /// Roll the line items up into a summary
    pub fn aggregate(
        &self,
        labor: &[LaborAllocationItem],
        products: &[ProductSaleItem],
        expenses: &[ExpenseItem],
        extra_revenue: f64,
        extra_expense: f64,
    ) -> ProfitabilitySummary {
        let service = self.summarize_services(labor, expenses);
        let product = summarize_products(products);

        let extra_revenue = finite_or_zero(extra_revenue);
        let extra_expense = finite_or_zero(extra_expense);

        let total_revenue = service.total.proposal + product.total.proposal;
        let total_cost_before_extra = service.total.cost + product.total.cost;
        let core_profit = service.total.profit + product.total.profit;
        let net_profit = core_profit + extra_revenue - extra_expense;

        ProfitabilitySummary {
            service,
            product,
            total_revenue,
            total_cost_before_extra,
            total_cost: total_revenue - net_profit,
            core_profit,
            extra_revenue,
            extra_expense,
            net_profit,
            profit_rate: percent_of_total(net_profit, total_revenue),
            our_mm: service.internal.mm,
            others_mm: service.external.mm,
        }
    }

    fn summarize_services(
        &self,
        labor: &[LaborAllocationItem],
        expenses: &[ExpenseItem],
    ) -> ServiceSummary {
        let mut internal = ServicePartition::default();
        let mut external = ServicePartition::default();

        for item in labor {
            let partition = if item.category().is_external() {
                &mut external
            } else {
                &mut internal
            };
            partition.mm += item.total_mm();
            partition.proposal += item.proposed_total();
            partition.cost += item.internal_total();
        }

        internal.delay = round_to_unit(internal.cost * self.policy.delay_rate);
        external.delay = round_to_unit(external.cost * self.policy.delay_rate);

        // Expenses are carried by the company partition
        for item in expenses {
            match item.category {
                ExpenseCategory::General => internal.general_expense += item.total(),
                ExpenseCategory::Special => internal.special_expense += item.total(),
            }
        }

        let total = SectionTotal {
            proposal: internal.proposal + external.proposal,
            cost: internal.total_cost() + external.total_cost(),
            profit: internal.profit() + external.profit(),
        };

        ServiceSummary {
            internal,
            external,
            total,
        }
    }
}

fn summarize_products(products: &[ProductSaleItem]) -> ProductSummary {
    let mut internal = ProductPartition::default();
    let mut external = ProductPartition::default();

    for item in products {
        let partition = match item.category {
            ProductCategory::OwnCompany => &mut internal,
            ProductCategory::ThirdParty => &mut external,
        };
        partition.proposal += item.proposal_price;
        partition.cost += item.cost();
    }

    for partition in [&mut internal, &mut external] {
        partition.margin = partition.proposal - partition.cost;
        partition.margin_rate = ratio(partition.margin, partition.proposal);
    }

    let total = SectionTotal {
        proposal: internal.proposal + external.proposal,
        cost: internal.cost + external.cost,
        profit: internal.margin + external.margin,
    };

    ProductSummary {
        internal,
        external,
        total,
    }
}

/// Summarize line items with the default policy (no delay cost)
pub fn aggregate(
    labor: &[LaborAllocationItem],
    products: &[ProductSaleItem],
    expenses: &[ExpenseItem],
    extra_revenue: f64,
    extra_expense: f64,
) -> ProfitabilitySummary {
    Aggregator::default().aggregate(labor, products, expenses, extra_revenue, extra_expense)
}
