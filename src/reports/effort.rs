//! Monthly Effort Report

use std::io::Write;

use super::{csv_number, format_mm};
use crate::error::{ProfitError, ProfitResult};
use crate::models::ProfitabilityPlan;
use crate::services::{effort_totals, monthly_effort, EffortTable, MonthlyEffort};

/// Company and outsourced person-months per month
#[derive(Debug, Clone)]
pub struct EffortReport {
    pub project: String,
    pub table: EffortTable,
    pub totals: MonthlyEffort,
}

impl EffortReport {
    pub fn generate(plan: &ProfitabilityPlan) -> Self {
        let table = monthly_effort(&plan.labor);
        let totals = effort_totals(&table);
        Self {
            project: plan.project.clone(),
            table,
            totals,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        if self.project.is_empty() {
            output.push_str("Monthly Effort (MM)\n");
        } else {
            output.push_str(&format!("Monthly Effort (MM) - {}\n", self.project));
        }
        output.push_str(&"=".repeat(48));
        output.push('\n');

        if self.table.is_empty() {
            output.push_str("No labor allocations.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>10} {:>12} {:>10}\n",
            "Month", "Company", "Outsourced", "Total"
        ));
        output.push_str(&"-".repeat(48));
        output.push('\n');

        for (month, effort) in &self.table {
            output.push_str(&format!(
                "{:<12} {:>10} {:>12} {:>10}\n",
                month,
                format_mm(effort.internal),
                format_mm(effort.external),
                format_mm(effort.total())
            ));
        }

        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>10} {:>12} {:>10}\n",
            "TOTAL",
            format_mm(self.totals.internal),
            format_mm(self.totals.external),
            format_mm(self.totals.total())
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ProfitResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Month", "Company", "Outsourced", "Total"])?;

        for (month, effort) in &self.table {
            wtr.write_record([
                month.clone(),
                csv_number(effort.internal),
                csv_number(effort.external),
                csv_number(effort.total()),
            ])?;
        }
        wtr.write_record([
            "TOTAL".to_string(),
            csv_number(self.totals.internal),
            csv_number(self.totals.external),
            csv_number(self.totals.total()),
        ])?;

        wtr.flush()
            .map_err(|e| ProfitError::Export(format!("Failed to flush CSV: {}", e)))?;
        Ok(())
    }
}
