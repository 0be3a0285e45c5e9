//! Profit-and-loss summary produced by the aggregator

use serde::{Deserialize, Serialize};

/// Service figures for one provider partition (company staff or outsourced)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ServicePartition {
    /// Person-months
    pub mm: f64,
    /// Billing amount
    pub proposal: f64,
    /// Labor cost
    pub cost: f64,
    /// Delay cost surcharge
    pub delay: f64,
    /// Special (one-off) expenses charged to this partition
    pub special_expense: f64,
    /// General expenses charged to this partition
    pub general_expense: f64,
}

impl ServicePartition {
    /// Everything charged against the proposal
    pub fn total_cost(&self) -> f64 {
        self.cost + self.delay + self.special_expense + self.general_expense
    }

    /// proposal − (cost + delay + special + general)
    pub fn profit(&self) -> f64 {
        self.proposal - self.total_cost()
    }
}

/// Product figures for one partition (own or third-party)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductPartition {
    pub proposal: f64,
    pub cost: f64,
    pub margin: f64,
    /// margin / proposal as a fraction
    pub margin_rate: f64,
}

/// Subtotal across both partitions of services or products
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SectionTotal {
    pub proposal: f64,
    pub cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ServiceSummary {
    pub internal: ServicePartition,
    pub external: ServicePartition,
    pub total: SectionTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductSummary {
    pub internal: ProductPartition,
    pub external: ProductPartition,
    pub total: SectionTotal,
}

/// Categorized profit-and-loss summary for a project plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfitabilitySummary {
    pub service: ServiceSummary,
    pub product: ProductSummary,
    /// service proposal + product proposal
    pub total_revenue: f64,
    /// service cost + product cost, before extra adjustments
    pub total_cost_before_extra: f64,
    /// total revenue − net profit
    pub total_cost: f64,
    /// service profit + product profit
    pub core_profit: f64,
    pub extra_revenue: f64,
    pub extra_expense: f64,
    /// core profit + extra revenue − extra expense
    pub net_profit: f64,
    /// net profit / total revenue × 100
    pub profit_rate: f64,
    /// Company staff person-months
    pub our_mm: f64,
    /// Outsourced person-months
    pub others_mm: f64,
}

impl ProfitabilitySummary {
    /// Whether the plan loses money after adjustments
    pub fn is_loss(&self) -> bool {
        self.net_profit < 0.0
    }

    /// Total person-months across both partitions
    pub fn total_mm(&self) -> f64 {
        self.our_mm + self.others_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_profit() {
        let partition = ServicePartition {
            mm: 2.0,
            proposal: 10_000.0,
            cost: 6_000.0,
            delay: 600.0,
            special_expense: 300.0,
            general_expense: 100.0,
        };
        assert_eq!(partition.total_cost(), 7_000.0);
        assert_eq!(partition.profit(), 3_000.0);
    }

    #[test]
    fn test_serialization_shape() {
        let summary = ProfitabilitySummary::default();
        let json = serde_json::to_value(summary).unwrap();
        assert!(json["service"]["internal"]["mm"].is_number());
        assert!(json["product"]["total"]["profit"].is_number());
        assert!(json["profit_rate"].is_number());
        assert!(!summary.is_loss());
    }
}
