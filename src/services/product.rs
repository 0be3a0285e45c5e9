//! Product plan subtotals
//!
//! Per-category and grand totals for the product sales plan, including the
//! post-contract view (contracted cost and margin) used for variance reporting.

use serde::{Deserialize, Serialize};

use crate::models::{ProductCategory, ProductSaleItem};
use crate::numeric::{percent_of_total, ratio};

/// Totals for a group of product lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductSubtotal {
    pub quantity: f64,
    pub base: f64,
    pub proposal: f64,
    pub cost: f64,
    pub margin: f64,
    /// margin / proposal as a fraction
    pub margin_rate: f64,
    /// (base − proposal) / base in percent
    pub discount_rate: f64,
    /// Sum of contracted costs (zero for lines without a contract)
    pub contract_cost: f64,
    /// proposal − contracted cost
    pub contract_margin: f64,
}

impl ProductSubtotal {
    /// Total a set of product lines
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductSaleItem>,
    {
        let mut subtotal = Self::default();
        for item in items {
            subtotal.quantity += item.quantity;
            subtotal.base += item.base_price;
            subtotal.proposal += item.proposal_price;
            subtotal.cost += item.cost();
            subtotal.contract_cost += item.contract_cost_price.unwrap_or(0.0);
        }
        subtotal.finish()
    }

    fn combine(a: &Self, b: &Self) -> Self {
        Self {
            quantity: a.quantity + b.quantity,
            base: a.base + b.base,
            proposal: a.proposal + b.proposal,
            cost: a.cost + b.cost,
            contract_cost: a.contract_cost + b.contract_cost,
            ..Self::default()
        }
        .finish()
    }

    fn finish(mut self) -> Self {
        self.margin = self.proposal - self.cost;
        self.contract_margin = self.proposal - self.contract_cost;
        self.margin_rate = ratio(self.margin, self.proposal);
        self.discount_rate = if self.base > 0.0 {
            percent_of_total(self.base - self.proposal, self.base)
        } else {
            0.0
        };
        self
    }

    /// Contracted margin minus planned margin
    pub fn margin_variance(&self) -> f64 {
        self.contract_margin - self.margin
    }
}

/// Own, third-party and combined product totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductPlanTotals {
    pub own: ProductSubtotal,
    pub third_party: ProductSubtotal,
    pub total: ProductSubtotal,
}

/// Subtotal each product category and the whole plan
pub fn product_totals(products: &[ProductSaleItem]) -> ProductPlanTotals {
    let own = ProductSubtotal::from_items(
        products
            .iter()
            .filter(|p| p.category == ProductCategory::OwnCompany),
    );
    let third_party = ProductSubtotal::from_items(
        products
            .iter()
            .filter(|p| p.category == ProductCategory::ThirdParty),
    );
    let total = ProductSubtotal::combine(&own, &third_party);

    ProductPlanTotals {
        own,
        third_party,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_products() -> Vec<ProductSaleItem> {
        let mut contracted = ProductSaleItem::new(ProductCategory::ThirdParty, 2.0, 1_000.0)
            .with_proposal(1_800.0)
            .with_cost(1_200.0);
        contracted.contract_cost_price = Some(1_100.0);

        vec![
            ProductSaleItem::new(ProductCategory::OwnCompany, 1.0, 4_000.0)
                .with_proposal(3_000.0)
                .with_cost(500.0),
            contracted,
            ProductSaleItem::new(ProductCategory::ThirdParty, 1.0, 500.0).with_cost(400.0),
        ]
    }

    #[test]
    fn test_category_subtotals() {
        let totals = product_totals(&sample_products());

        assert_eq!(totals.own.quantity, 1.0);
        assert_eq!(totals.own.proposal, 3_000.0);
        assert_eq!(totals.own.margin, 2_500.0);
        assert_eq!(totals.own.discount_rate, 25.0);

        assert_eq!(totals.third_party.quantity, 3.0);
        assert_eq!(totals.third_party.base, 2_500.0);
        assert_eq!(totals.third_party.proposal, 2_300.0);
        assert_eq!(totals.third_party.cost, 1_600.0);
        assert_eq!(totals.third_party.contract_cost, 1_100.0);
        assert_eq!(totals.third_party.contract_margin, 1_200.0);
    }

    #[test]
    fn test_grand_total() {
        let totals = product_totals(&sample_products());
        let total = totals.total;

        assert_eq!(total.proposal, totals.own.proposal + totals.third_party.proposal);
        assert_eq!(total.cost, 2_100.0);
        assert_eq!(total.margin, 3_200.0);
        assert_eq!(total.margin_rate, 3_200.0 / 5_300.0);
        assert_eq!(total.discount_rate, percent_of_total(6_500.0 - 5_300.0, 6_500.0));
        assert_eq!(total.margin_variance(), total.contract_margin - total.margin);
    }

    #[test]
    fn test_empty_plan() {
        let totals = product_totals(&[]);
        assert_eq!(totals.total.margin_rate, 0.0);
        assert_eq!(totals.total.discount_rate, 0.0);
    }
}
