//! Product sale line items
//!
//! Products are either the company's own or resold third-party products.
//! Prices are kept as entered; margins are always derived.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numeric::{lenient_amount, lenient_option_amount, percent_of_total, ratio};

/// Whose product is being sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Own-company product
    #[default]
    OwnCompany,
    /// Third-party product bought in for resale
    ThirdParty,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::OwnCompany => write!(f, "Own"),
            ProductCategory::ThirdParty => write!(f, "Third-party"),
        }
    }
}

/// A product line on the sales plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductSaleItem {
    #[serde(default)]
    pub category: ProductCategory,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_name: String,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub quantity: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_price: f64,

    /// List price (usually quantity × unit price)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub base_price: f64,

    /// Negotiated proposal price
    #[serde(default, deserialize_with = "lenient_amount")]
    pub proposal_price: f64,

    /// Planned purchase cost
    #[serde(default, deserialize_with = "lenient_option_amount")]
    pub cost_price: Option<f64>,

    /// Actual cost once a purchase contract is signed
    #[serde(default, deserialize_with = "lenient_option_amount")]
    pub contract_cost_price: Option<f64>,
}

impl ProductSaleItem {
    /// Create a product line from quantity and unit price; the base price
    /// and proposal price both start at the list price
    pub fn new(category: ProductCategory, quantity: f64, unit_price: f64) -> Self {
        let base_price = Self::base_price_for(quantity, unit_price);
        Self {
            category,
            quantity,
            unit_price,
            base_price,
            proposal_price: base_price,
            ..Self::default()
        }
    }

    /// Set the negotiated proposal price (builder style)
    pub fn with_proposal(mut self, proposal_price: f64) -> Self {
        self.proposal_price = proposal_price;
        self
    }

    /// Set the planned cost (builder style)
    pub fn with_cost(mut self, cost_price: f64) -> Self {
        self.cost_price = Some(cost_price);
        self
    }

    /// List price for a quantity at a unit price
    fn base_price_for(quantity: f64, unit_price: f64) -> f64 {
        quantity * unit_price
    }

    /// Planned cost, zero when not yet known
    pub fn cost(&self) -> f64 {
        self.cost_price.unwrap_or(0.0)
    }

    /// proposal − cost
    pub fn margin(&self) -> f64 {
        self.proposal_price - self.cost()
    }

    /// margin / proposal as a fraction; zero when the proposal is zero
    pub fn margin_rate(&self) -> f64 {
        ratio(self.margin(), self.proposal_price)
    }

    /// Discount from list price in percent; zero when there is no list price
    pub fn discount_rate(&self) -> f64 {
        if self.base_price > 0.0 {
            percent_of_total(self.base_price - self.proposal_price, self.base_price)
        } else {
            0.0
        }
    }

    /// proposal − contracted cost, once a contract cost exists
    pub fn contract_margin(&self) -> Option<f64> {
        self.contract_cost_price
            .map(|contract_cost| self.proposal_price - contract_cost)
    }

    /// Contracted margin minus planned margin
    pub fn margin_variance(&self) -> Option<f64> {
        self.contract_margin().map(|m| m - self.margin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_identity() {
        let item = ProductSaleItem::new(ProductCategory::ThirdParty, 2.0, 500.0)
            .with_proposal(900.0)
            .with_cost(600.0);

        assert_eq!(item.base_price, 1000.0);
        assert_eq!(item.margin(), 300.0);
        assert_eq!(item.margin_rate(), 300.0 / 900.0);
        assert_eq!(item.discount_rate(), 10.0);
    }

    #[test]
    fn test_zero_proposal_has_zero_margin_rate() {
        let item = ProductSaleItem::new(ProductCategory::OwnCompany, 0.0, 0.0).with_cost(100.0);
        assert_eq!(item.margin(), -100.0);
        assert_eq!(item.margin_rate(), 0.0);
        assert_eq!(item.discount_rate(), 0.0);
    }

    #[test]
    fn test_missing_cost_is_zero() {
        let item = ProductSaleItem::new(ProductCategory::OwnCompany, 1.0, 250.0);
        assert_eq!(item.cost(), 0.0);
        assert_eq!(item.margin(), 250.0);
        assert_eq!(item.margin_rate(), 1.0);
    }

    #[test]
    fn test_contract_variance() {
        let mut item = ProductSaleItem::new(ProductCategory::ThirdParty, 1.0, 1000.0).with_cost(700.0);
        assert_eq!(item.contract_margin(), None);

        item.contract_cost_price = Some(650.0);
        assert_eq!(item.contract_margin(), Some(350.0));
        assert_eq!(item.margin_variance(), Some(50.0));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let item: ProductSaleItem =
            serde_json::from_str(r#"{"category": "third_party", "proposal_price": "1,200"}"#)
                .unwrap();
        assert_eq!(item.category, ProductCategory::ThirdParty);
        assert_eq!(item.proposal_price, 1200.0);
        assert_eq!(item.cost_price, None);
        assert_eq!(item.quantity, 0.0);
    }
}
