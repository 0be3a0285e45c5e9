//! Scenario and Best/Worst Review Reports
//!
//! Both render the same operating-profit waterfall: revenue, the deductions
//! that lead to operating profit, then the two optional external-purchase
//! stages.

use std::io::Write;

use super::{csv_number, format_amount, format_mm, format_percent};
use crate::error::{ProfitError, ProfitResult};
use crate::models::{
    CaseInput, ExternalPurchaseStage, ProfitFigure, ReviewCases, ReviewOutcome, ScenarioResult,
};
use crate::services::{evaluate, evaluate_review};

/// One line of the waterfall
struct WaterfallLine {
    label: String,
    amount: f64,
    /// Share of revenue, shown for profit lines only
    percent: Option<f64>,
}

fn waterfall(input: &CaseInput, result: &ScenarioResult) -> Vec<WaterfallLine> {
    let line = |label: String, amount: f64| WaterfallLine {
        label,
        amount,
        percent: None,
    };
    let profit = |label: &str, figure: ProfitFigure| WaterfallLine {
        label: label.to_string(),
        amount: figure.amount,
        percent: Some(figure.percent),
    };

    let mut lines = vec![
        line("Total revenue".into(), result.total_revenue),
        line("  Other goods purchase".into(), result.other_goods_purchase),
        line("  Project costs".into(), result.total_project_costs),
        line(
            format!("  Effort cost ({} MM)", format_mm(input.total_mm())),
            result.estimated_effort_cost,
        ),
        line(
            format!(
                "  Risk cost ({} of {})",
                format_percent(input.risk_cost_percent),
                input.risk_cost_base
            ),
            result.risk_cost,
        ),
        profit("Operating profit", result.operating_profit),
    ];

    lines.push(line(
        stage_label("External purchase 1", &input.external_purchase_1, true),
        result.external_purchase_1_cost,
    ));
    lines.push(profit("Operating profit after EP1", result.operating_profit_ep1));

    let stage2_applies = input.external_purchase_1.include;
    lines.push(line(
        stage_label("External purchase 2", &input.external_purchase_2, stage2_applies),
        result.external_purchase_2_cost,
    ));
    lines.push(profit("Operating profit after EP2", result.operating_profit_ep2));

    lines
}

fn stage_label(name: &str, stage: &ExternalPurchaseStage, gate_open: bool) -> String {
    if stage.include && gate_open {
        format!(
            "  {} ({} of {})",
            name,
            format_percent(stage.percent),
            stage.base
        )
    } else {
        format!("  {} (not included)", name)
    }
}

/// Waterfall for a single case
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub label: String,
    pub input: CaseInput,
    pub result: ScenarioResult,
}

impl ScenarioReport {
    /// Evaluate a case and keep its inputs for labelling
    pub fn generate(label: impl Into<String>, input: &CaseInput) -> Self {
        Self {
            label: label.into(),
            input: input.clone(),
            result: evaluate(input),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Scenario - {}\n", self.label));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!("{:<40} {:>14} {:>8}\n", "", "Amount", "Rate"));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for line in waterfall(&self.input, &self.result) {
            output.push_str(&format!(
                "{:<40} {:>14} {:>8}\n",
                line.label,
                format_amount(line.amount),
                line.percent.map(format_percent).unwrap_or_default()
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ProfitResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Line", "Amount", "Rate"])?;

        for line in waterfall(&self.input, &self.result) {
            wtr.write_record([
                line.label.trim().to_string(),
                csv_number(line.amount),
                line.percent.map(csv_number).unwrap_or_default(),
            ])?;
        }

        wtr.flush()
            .map_err(|e| ProfitError::Export(format!("Failed to flush CSV: {}", e)))?;
        Ok(())
    }
}

/// Worst and Best cases side by side
#[derive(Debug, Clone)]
pub struct ReviewReport {
    pub cases: ReviewCases,
    pub outcome: ReviewOutcome,
}

impl ReviewReport {
    /// Evaluate both cases of a review independently
    pub fn generate(cases: &ReviewCases) -> Self {
        Self {
            cases: cases.clone(),
            outcome: evaluate_review(cases),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let worst = waterfall(&self.cases.worst, &self.outcome.worst);
        let best = waterfall(&self.cases.best, &self.outcome.best);

        let mut output = String::new();
        output.push_str("Profitability Review - Worst / Best\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14} {:>8}  {:>14} {:>8}\n",
            "", "Worst", "Rate", "Best", "Rate"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        // Labels carry per-case knobs, so only the leading text is shared
        for (w, b) in worst.iter().zip(best.iter()) {
            output.push_str(&format!(
                "{:<30} {:>14} {:>8}  {:>14} {:>8}\n",
                short_label(&w.label),
                format_amount(w.amount),
                w.percent.map(format_percent).unwrap_or_default(),
                format_amount(b.amount),
                b.percent.map(format_percent).unwrap_or_default(),
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Spread (best - worst): {}\n",
            format_amount(self.outcome.spread())
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ProfitResult<()> {
        let worst = waterfall(&self.cases.worst, &self.outcome.worst);
        let best = waterfall(&self.cases.best, &self.outcome.best);

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Line", "Worst", "Worst Rate", "Best", "Best Rate"])?;

        for (w, b) in worst.iter().zip(best.iter()) {
            wtr.write_record([
                short_label(&w.label).trim().to_string(),
                csv_number(w.amount),
                w.percent.map(csv_number).unwrap_or_default(),
                csv_number(b.amount),
                b.percent.map(csv_number).unwrap_or_default(),
            ])?;
        }

        wtr.flush()
            .map_err(|e| ProfitError::Export(format!("Failed to flush CSV: {}", e)))?;
        Ok(())
    }
}

/// Drop the parenthesized detail from a waterfall label
fn short_label(label: &str) -> &str {
    match label.find(" (") {
        Some(idx) => &label[..idx],
        None => label,
    }
}
