//! Plan CLI commands
//!
//! Commands that read a profitability plan: the summary, the product plan
//! and the monthly effort table.

use clap::Args;
use std::path::PathBuf;

use super::{print_result, CommandContext};
use crate::audit::{AuditEntry, Operation};
use crate::config::OutputFormat;
use crate::error::{ProfitError, ProfitResult};
use crate::export::ExportDocument;
use crate::models::ProfitabilityPlan;
use crate::reports::{format_amount, format_percent, EffortReport, ProductPlanReport, SummaryReport};
use crate::services::{AggregationPolicy, Aggregator};
use crate::storage::read_document;

/// Arguments shared by the plan commands
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Plan file (.json, .yaml or .yml)
    pub plan: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Export the table to a CSV file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the profitability summary
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Delay-cost rate as a fraction of labor cost, overriding the setting
    #[arg(long)]
    pub delay_rate: Option<f64>,
}

fn load_plan(args: &PlanArgs) -> ProfitResult<ProfitabilityPlan> {
    read_document(&args.plan)
}

/// Handle `profit summary`
pub fn handle_summary_command(ctx: &CommandContext, args: SummaryArgs) -> ProfitResult<()> {
    let plan = load_plan(&args.plan)?;

    let delay_rate = args.delay_rate.unwrap_or(ctx.settings.delay_rate);
    if !delay_rate.is_finite() || delay_rate < 0.0 {
        return Err(ProfitError::Validation(format!(
            "Delay rate must be a non-negative fraction, got {}",
            delay_rate
        )));
    }

    let aggregator = Aggregator::new(AggregationPolicy::with_delay_rate(delay_rate));
    let report = SummaryReport::generate(&plan, &aggregator, &ctx.settings.expense_standards);
    let source = args.plan.plan.display().to_string();

    ctx.journal(&[AuditEntry::calculation(
        ctx.run_id,
        Operation::Aggregate,
        source.clone(),
        &plan,
        &report.summary,
        Some(format!(
            "net profit {} ({})",
            format_amount(report.summary.net_profit),
            format_percent(report.summary.profit_rate)
        )),
    )])?;

    if let Some(path) = &args.plan.output {
        return ctx.write_csv(path, |mut w| report.export_csv(&mut w));
    }

    let document = ExportDocument::new("summary", report.summary).with_source(source);
    print_result(ctx.format(args.plan.format), &document, || {
        report.format_terminal()
    })
}

/// Handle `profit products`
pub fn handle_products_command(ctx: &CommandContext, args: PlanArgs) -> ProfitResult<()> {
    let plan = load_plan(&args)?;
    let report = ProductPlanReport::generate(&plan);

    if let Some(path) = &args.output {
        return ctx.write_csv(path, |mut w| report.export_csv(&mut w));
    }

    let document = ExportDocument::new("products", report.totals)
        .with_source(args.plan.display().to_string());
    print_result(ctx.format(args.format), &document, || report.format_terminal())
}

/// Handle `profit effort`
pub fn handle_effort_command(ctx: &CommandContext, args: PlanArgs) -> ProfitResult<()> {
    let plan = load_plan(&args)?;
    let report = EffortReport::generate(&plan);

    if let Some(path) = &args.output {
        return ctx.write_csv(path, |mut w| report.export_csv(&mut w));
    }

    let document = ExportDocument::new("effort", &report.table)
        .with_source(args.plan.display().to_string());
    print_result(ctx.format(args.format), &document, || report.format_terminal())
}
