//! Scenario CLI commands
//!
//! Evaluate a single case, or both cases of a Best/Worst review.

use clap::Args;
use std::path::PathBuf;

use super::{print_result, CommandContext};
use crate::audit::{AuditEntry, Operation};
use crate::config::OutputFormat;
use crate::error::ProfitResult;
use crate::export::ExportDocument;
use crate::models::{CaseInput, ReviewCases, ScenarioResult};
use crate::reports::{format_amount, format_percent, ReviewReport, ScenarioReport};
use crate::storage::read_document;

/// Arguments for a single case
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Case file (.json, .yaml or .yml)
    pub case: PathBuf,

    /// Label shown in the report header
    #[arg(short, long, default_value = "Case")]
    pub label: String,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Export the waterfall to a CSV file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for a Best/Worst review
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Review file with `worst` and `best` cases
    pub review: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Export the comparison to a CSV file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn profit_line(result: &ScenarioResult) -> String {
    let profit = result.final_profit();
    format!(
        "operating profit {} ({})",
        format_amount(profit.amount),
        format_percent(profit.percent)
    )
}

/// Handle `profit scenario`
pub fn handle_scenario_command(ctx: &CommandContext, args: ScenarioArgs) -> ProfitResult<()> {
    let input: CaseInput = read_document(&args.case)?;

    // The calculator tolerates an inconsistent case; the user still hears about it
    if let Err(e) = input.validate() {
        eprintln!("Warning: {}", e);
    }

    let report = ScenarioReport::generate(&args.label, &input);
    let source = args.case.display().to_string();

    ctx.journal(&[AuditEntry::calculation(
        ctx.run_id,
        Operation::Evaluate,
        source.clone(),
        &input,
        &report.result,
        Some(profit_line(&report.result)),
    )])?;

    if let Some(path) = &args.output {
        return ctx.write_csv(path, |mut w| report.export_csv(&mut w));
    }

    let document = ExportDocument::new("scenario", report.result).with_source(source);
    print_result(ctx.format(args.format), &document, || {
        report.format_terminal()
    })
}

/// Handle `profit review`
pub fn handle_review_command(ctx: &CommandContext, args: ReviewArgs) -> ProfitResult<()> {
    let cases: ReviewCases = read_document(&args.review)?;

    if let Err(e) = cases.validate() {
        eprintln!("Warning: {}", e);
    }

    let report = ReviewReport::generate(&cases);
    let source = args.review.display().to_string();

    // One entry per case so each can be traced on its own
    ctx.journal(&[
        AuditEntry::calculation(
            ctx.run_id,
            Operation::Review,
            format!("{} (worst)", source),
            &cases.worst,
            &report.outcome.worst,
            Some(profit_line(&report.outcome.worst)),
        ),
        AuditEntry::calculation(
            ctx.run_id,
            Operation::Review,
            format!("{} (best)", source),
            &cases.best,
            &report.outcome.best,
            Some(profit_line(&report.outcome.best)),
        ),
    ])?;

    if let Some(path) = &args.output {
        return ctx.write_csv(path, |mut w| report.export_csv(&mut w));
    }

    let document = ExportDocument::new("review", report.outcome).with_source(source);
    print_result(ctx.format(args.format), &document, || {
        report.format_terminal()
    })
}
