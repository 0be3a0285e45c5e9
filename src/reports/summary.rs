//! Profitability Summary Report
//!
//! The profit-and-loss view of a plan: services split into company and
//! outsourced staff, products split into own and third-party lines, then the
//! roll-up to net profit.

use std::io::Write;

use super::{csv_number, format_amount, format_mm, format_percent};
use crate::error::{ProfitError, ProfitResult};
use crate::models::{ProfitabilityPlan, ProfitabilitySummary, ServicePartition};
use crate::numeric::percent_of_total;
use crate::services::{apply_standards, monthly_effort, Aggregator, ExpenseStandard};

/// Profitability summary of one plan
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Project name from the plan
    pub project: String,
    /// Delay rate the summary was computed with
    pub delay_rate: f64,
    pub summary: ProfitabilitySummary,
}

impl SummaryReport {
    /// Summarize a plan
    ///
    /// Derived expense rows with a matching standard are recomputed from the
    /// plan's monthly effort before aggregation.
    pub fn generate(
        plan: &ProfitabilityPlan,
        aggregator: &Aggregator,
        standards: &[ExpenseStandard],
    ) -> Self {
        let expenses = if standards.is_empty() {
            plan.expenses.clone()
        } else {
            apply_standards(&plan.expenses, standards, &monthly_effort(&plan.labor))
        };

        let summary = aggregator.aggregate(
            &plan.labor,
            &plan.products,
            &expenses,
            plan.extra_revenue,
            plan.extra_expense,
        );

        Self {
            project: plan.project.clone(),
            delay_rate: aggregator.policy().delay_rate,
            summary,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let s = &self.summary;
        let mut output = String::new();

        if self.project.is_empty() {
            output.push_str("Profitability Summary\n");
        } else {
            output.push_str(&format!("Profitability Summary - {}\n", self.project));
        }
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output.push_str(&format!(
            "{:<30} {:>14} {:>14} {:>14} {:>5}\n",
            "", "Proposal", "Cost", "Profit", "Rate"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        output.push_str("\nSERVICES\n");
        for (label, partition) in [
            ("Company staff", &s.service.internal),
            ("Outsourced", &s.service.external),
        ] {
            output.push_str(&row(
                &format!("  {} ({} MM)", label, format_mm(partition.mm)),
                partition.proposal,
                partition.total_cost(),
                partition.profit(),
            ));
            output.push_str(&service_detail(partition));
        }
        output.push_str(&row(
            "  Services total",
            s.service.total.proposal,
            s.service.total.cost,
            s.service.total.profit,
        ));

        output.push_str("\nPRODUCTS\n");
        for (label, partition) in [
            ("Own products", &s.product.internal),
            ("Third-party products", &s.product.external),
        ] {
            output.push_str(&row(
                &format!("  {}", label),
                partition.proposal,
                partition.cost,
                partition.margin,
            ));
        }
        output.push_str(&row(
            "  Products total",
            s.product.total.proposal,
            s.product.total.cost,
            s.product.total.profit,
        ));

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&row(
            "Core",
            s.total_revenue,
            s.total_cost_before_extra,
            s.core_profit,
        ));
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "  + Extra revenue",
            format_amount(s.extra_revenue)
        ));
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "  - Extra expense",
            format_amount(s.extra_expense)
        ));
        output.push_str(&row("NET", s.total_revenue, s.total_cost, s.net_profit));

        output.push('\n');
        output.push_str(&format!(
            "Effort: {} MM company, {} MM outsourced, {} MM total\n",
            format_mm(s.our_mm),
            format_mm(s.others_mm),
            format_mm(s.total_mm())
        ));
        if self.delay_rate > 0.0 {
            output.push_str(&format!(
                "Delay cost rate: {}\n",
                format_percent(self.delay_rate * 100.0)
            ));
        }
        if s.is_loss() {
            output.push_str("\n* Net loss\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ProfitResult<()> {
        let s = &self.summary;
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(["Section", "Line", "Proposal", "Cost", "Profit", "Rate"])?;

        let mut record = |section: &str, line: &str, proposal: f64, cost: f64, profit: f64| {
            wtr.write_record([
                section.to_string(),
                line.to_string(),
                csv_number(proposal),
                csv_number(cost),
                csv_number(profit),
                csv_number(percent_of_total(profit, proposal)),
            ])
        };

        for (line, p) in [
            ("Company staff", &s.service.internal),
            ("Outsourced", &s.service.external),
        ] {
            record("Services", line, p.proposal, p.total_cost(), p.profit())?;
        }
        record(
            "Services",
            "TOTAL",
            s.service.total.proposal,
            s.service.total.cost,
            s.service.total.profit,
        )?;

        for (line, p) in [
            ("Own products", &s.product.internal),
            ("Third-party products", &s.product.external),
        ] {
            record("Products", line, p.proposal, p.cost, p.margin)?;
        }
        record(
            "Products",
            "TOTAL",
            s.product.total.proposal,
            s.product.total.cost,
            s.product.total.profit,
        )?;

        record(
            "Summary",
            "Core",
            s.total_revenue,
            s.total_cost_before_extra,
            s.core_profit,
        )?;
        record("Summary", "Extra revenue", s.extra_revenue, 0.0, s.extra_revenue)?;
        record("Summary", "Extra expense", 0.0, s.extra_expense, -s.extra_expense)?;
        record("Summary", "NET", s.total_revenue, s.total_cost, s.net_profit)?;

        wtr.flush()
            .map_err(|e| ProfitError::Export(format!("Failed to flush CSV: {}", e)))?;

        Ok(())
    }
}

fn row(label: &str, proposal: f64, cost: f64, profit: f64) -> String {
    format!(
        "{:<30} {:>14} {:>14} {:>14} {:>5}\n",
        label,
        format_amount(proposal),
        format_amount(cost),
        format_amount(profit),
        format_percent(percent_of_total(profit, proposal))
    )
}

fn service_detail(partition: &ServicePartition) -> String {
    let mut output = String::new();
    for (label, amount) in [
        ("labor", partition.cost),
        ("delay", partition.delay),
        ("special expenses", partition.special_expense),
        ("general expenses", partition.general_expense),
    ] {
        if amount != 0.0 {
            output.push_str(&format!(
                "    {:<26} {:>14} {:>14}\n",
                label,
                "",
                format_amount(amount)
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ExpenseCategory, ExpenseItem, LaborAllocationItem, LaborCategory, ProductCategory,
        ProductSaleItem,
    };
    use crate::services::{AggregationPolicy, EffortBasis};

    fn sample_plan() -> ProfitabilityPlan {
        let mut plan = ProfitabilityPlan::new("Portal renewal");
        plan.labor = vec![
            LaborAllocationItem::new(LaborCategory::Company)
                .with_month("2025-01", 1.0)
                .with_month("2025-02", 1.0)
                .with_unit_prices(1000.0, 700.0),
            LaborAllocationItem::new(LaborCategory::External)
                .with_month("2025-01", 1.0)
                .with_unit_prices(800.0, 600.0),
        ];
        plan.products = vec![ProductSaleItem::new(ProductCategory::ThirdParty, 1.0, 500.0)
            .with_cost(400.0)];
        plan.expenses = vec![ExpenseItem::new(ExpenseCategory::General, "Meals")
            .with_month("2025-01", 10.0)];
        plan
    }

    #[test]
    fn test_generate_report() {
        let report = SummaryReport::generate(&sample_plan(), &Aggregator::default(), &[]);

        assert_eq!(report.project, "Portal renewal");
        assert_eq!(report.summary.total_revenue, 3300.0);
        // services: 2000 - 1400 - 10 + 800 - 600, products: 100
        assert_eq!(report.summary.net_profit, 890.0);
    }

    #[test]
    fn test_standards_recompute_expenses() {
        let standards = vec![ExpenseStandard::new("Meals", EffortBasis::All, 50.0)];
        let report = SummaryReport::generate(&sample_plan(), &Aggregator::default(), &standards);

        // Jan: 2 MM × 50, Feb: 1 MM × 50
        assert_eq!(report.summary.service.internal.general_expense, 150.0);
    }

    #[test]
    fn test_terminal_format() {
        let aggregator = Aggregator::new(AggregationPolicy::with_delay_rate(0.1));
        let report = SummaryReport::generate(&sample_plan(), &aggregator, &[]);
        let output = report.format_terminal();

        assert!(output.contains("Profitability Summary - Portal renewal"));
        assert!(output.contains("Company staff (2.00 MM)"));
        assert!(output.contains("Products total"));
        assert!(output.contains("NET"));
        assert!(output.contains("Delay cost rate: 10.0%"));
        assert!(!output.contains("Net loss"));
    }

    #[test]
    fn test_loss_is_flagged() {
        let mut plan = sample_plan();
        plan.extra_expense = 5000.0;
        let report = SummaryReport::generate(&plan, &Aggregator::default(), &[]);
        assert!(report.format_terminal().contains("* Net loss"));
    }

    #[test]
    fn test_csv_export() {
        let report = SummaryReport::generate(&sample_plan(), &Aggregator::default(), &[]);

        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.starts_with("Section,Line,Proposal,Cost,Profit,Rate"));
        assert!(csv_string.contains("Products,Third-party products,500.00,400.00,100.00,20.00"));
        assert!(csv_string.contains("Summary,NET,3300.00"));
    }

    #[test]
    fn test_empty_plan() {
        let report =
            SummaryReport::generate(&ProfitabilityPlan::default(), &Aggregator::default(), &[]);
        let output = report.format_terminal();
        assert!(output.starts_with("Profitability Summary\n"));
        assert!(output.contains("0.0%"));
    }
}
