//! Product Plan Report
//!
//! Every product line with its margin and discount, the own / third-party
//! subtotals, and the post-contract margin variance when contract costs are
//! known.

use std::io::Write;

use super::{csv_number, format_amount, format_percent};
use crate::error::{ProfitError, ProfitResult};
use crate::models::{ProductSaleItem, ProfitabilityPlan};
use crate::services::{product_totals, ProductPlanTotals, ProductSubtotal};

/// Product lines and subtotals of one plan
#[derive(Debug, Clone)]
pub struct ProductPlanReport {
    pub project: String,
    pub items: Vec<ProductSaleItem>,
    pub totals: ProductPlanTotals,
}

impl ProductPlanReport {
    /// Subtotal the plan's product lines
    pub fn generate(plan: &ProfitabilityPlan) -> Self {
        Self {
            project: plan.project.clone(),
            items: plan.products.clone(),
            totals: product_totals(&plan.products),
        }
    }

    /// Whether any line has a signed contract cost
    pub fn has_contract_costs(&self) -> bool {
        self.items.iter().any(|i| i.contract_cost_price.is_some())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        if self.project.is_empty() {
            output.push_str("Product Plan\n");
        } else {
            output.push_str(&format!("Product Plan - {}\n", self.project));
        }
        output.push_str(&"=".repeat(96));
        output.push('\n');

        if self.items.is_empty() {
            output.push_str("No product lines.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<24} {:>6} {:>13} {:>13} {:>13} {:>7} {:>7}\n",
            "Category", "Product", "Qty", "Proposal", "Cost", "Margin", "Margin", "Disc."
        ));
        output.push_str(&"-".repeat(96));
        output.push('\n');

        for item in &self.items {
            let name = if item.company_name.is_empty() {
                item.product_name.clone()
            } else {
                format!("{} / {}", item.company_name, item.product_name)
            };
            output.push_str(&format!(
                "{:<12} {:<24} {:>6} {:>13} {:>13} {:>13} {:>7} {:>7}\n",
                item.category.to_string(),
                name,
                format_amount(item.quantity),
                format_amount(item.proposal_price),
                format_amount(item.cost()),
                format_amount(item.margin()),
                format_percent(item.margin_rate() * 100.0),
                format_percent(item.discount_rate()),
            ));
        }

        output.push_str(&"-".repeat(96));
        output.push('\n');
        for (label, subtotal) in [
            ("Own", &self.totals.own),
            ("Third-party", &self.totals.third_party),
            ("TOTAL", &self.totals.total),
        ] {
            output.push_str(&subtotal_row(label, subtotal));
        }

        if self.has_contract_costs() {
            let total = &self.totals.total;
            output.push('\n');
            output.push_str(&format!(
                "Contract cost:   {:>13}\n",
                format_amount(total.contract_cost)
            ));
            output.push_str(&format!(
                "Contract margin: {:>13}\n",
                format_amount(total.contract_margin)
            ));
            output.push_str(&format!(
                "Margin variance: {:>13}\n",
                format_amount(total.margin_variance())
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ProfitResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "Category",
            "Company",
            "Product",
            "Quantity",
            "Base",
            "Proposal",
            "Cost",
            "Margin",
            "Margin Rate",
            "Discount Rate",
            "Contract Cost",
            "Contract Margin",
        ])?;

        for item in &self.items {
            wtr.write_record([
                item.category.to_string(),
                item.company_name.clone(),
                item.product_name.clone(),
                csv_number(item.quantity),
                csv_number(item.base_price),
                csv_number(item.proposal_price),
                csv_number(item.cost()),
                csv_number(item.margin()),
                csv_number(item.margin_rate() * 100.0),
                csv_number(item.discount_rate()),
                item.contract_cost_price.map(csv_number).unwrap_or_default(),
                item.contract_margin().map(csv_number).unwrap_or_default(),
            ])?;
        }

        for (label, s) in [
            ("Own", &self.totals.own),
            ("Third-party", &self.totals.third_party),
            ("TOTAL", &self.totals.total),
        ] {
            wtr.write_record([
                label.to_string(),
                String::new(),
                "SUBTOTAL".to_string(),
                csv_number(s.quantity),
                csv_number(s.base),
                csv_number(s.proposal),
                csv_number(s.cost),
                csv_number(s.margin),
                csv_number(s.margin_rate * 100.0),
                csv_number(s.discount_rate),
                csv_number(s.contract_cost),
                csv_number(s.contract_margin),
            ])?;
        }

        wtr.flush()
            .map_err(|e| ProfitError::Export(format!("Failed to flush CSV: {}", e)))?;
        Ok(())
    }
}

fn subtotal_row(label: &str, subtotal: &ProductSubtotal) -> String {
    format!(
        "{:<12} {:<24} {:>6} {:>13} {:>13} {:>13} {:>7} {:>7}\n",
        label,
        "",
        format_amount(subtotal.quantity),
        format_amount(subtotal.proposal),
        format_amount(subtotal.cost),
        format_amount(subtotal.margin),
        format_percent(subtotal.margin_rate * 100.0),
        format_percent(subtotal.discount_rate),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;

    fn sample_plan() -> ProfitabilityPlan {
        let mut own = ProductSaleItem::new(ProductCategory::OwnCompany, 2.0, 500.0)
            .with_proposal(900.0)
            .with_cost(300.0);
        own.product_name = "Search engine".into();

        let mut third = ProductSaleItem::new(ProductCategory::ThirdParty, 1.0, 400.0)
            .with_cost(320.0);
        third.company_name = "Acme".into();
        third.product_name = "Firewall".into();

        let mut plan = ProfitabilityPlan::new("Portal");
        plan.products = vec![own, third];
        plan
    }

    #[test]
    fn test_generate_report() {
        let report = ProductPlanReport::generate(&sample_plan());
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.totals.total.proposal, 1300.0);
        assert_eq!(report.totals.total.margin, 680.0);
        assert!(!report.has_contract_costs());
    }

    #[test]
    fn test_terminal_format() {
        let output = ProductPlanReport::generate(&sample_plan()).format_terminal();
        assert!(output.contains("Product Plan - Portal"));
        assert!(output.contains("Acme / Firewall"));
        // 900 of a 1000 list price
        assert!(output.contains("10.0%"));
        assert!(output.contains("TOTAL"));
        assert!(!output.contains("Contract margin"));
    }

    #[test]
    fn test_contract_variance_shown() {
        let mut plan = sample_plan();
        plan.products[1].contract_cost_price = Some(300.0);

        let output = ProductPlanReport::generate(&plan).format_terminal();
        assert!(output.contains("Contract margin"));
        assert!(output.contains("Margin variance"));
    }

    #[test]
    fn test_empty_plan() {
        let output = ProductPlanReport::generate(&ProfitabilityPlan::default()).format_terminal();
        assert!(output.contains("No product lines."));
    }

    #[test]
    fn test_csv_export() {
        let report = ProductPlanReport::generate(&sample_plan());
        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.starts_with("Category,Company,Product,Quantity"));
        assert!(csv_string.contains("Third-party,Acme,Firewall,1.00,400.00,400.00,320.00,80.00,20.00,0.00,,"));
        assert!(csv_string.contains("TOTAL,,SUBTOTAL,3.00"));
    }
}
