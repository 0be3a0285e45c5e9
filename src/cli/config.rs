//! Configuration CLI commands

use clap::Subcommand;

use super::CommandContext;
use crate::config::{OutputFormat, Settings};
use crate::error::{ProfitError, ProfitResult};
use crate::numeric::parse_amount;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and current settings
    Show,

    /// Write the current settings (defaults if none) to the config file
    Init,

    /// Set the delay-cost rate (fraction of labor cost, e.g. 0.1)
    DelayRate { rate: String },

    /// Set the default output format
    Format {
        #[arg(value_enum)]
        format: OutputFormat,
    },

    /// Turn the calculation journal on or off
    Journal {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

/// Handle `profit config`
pub fn handle_config_command(ctx: &CommandContext, cmd: ConfigCommands) -> ProfitResult<()> {
    match cmd {
        ConfigCommands::Show => {
            show(ctx);
            Ok(())
        }
        ConfigCommands::Init => {
            ctx.settings.save(&ctx.paths)?;
            println!(
                "Settings written to: {}",
                ctx.paths.settings_file().display()
            );
            Ok(())
        }
        ConfigCommands::DelayRate { rate } => {
            let rate = parse_amount(&rate)?;
            update(ctx, |s| s.delay_rate = rate)
        }
        ConfigCommands::Format { format } => update(ctx, |s| s.default_format = format),
        ConfigCommands::Journal { enabled } => update(ctx, |s| s.audit_enabled = enabled),
    }
}

fn update(ctx: &CommandContext, change: impl FnOnce(&mut Settings)) -> ProfitResult<()> {
    let mut settings = ctx.settings.clone();
    change(&mut settings);
    settings
        .validate()
        .map_err(|e| ProfitError::Validation(e.to_string()))?;
    settings.save(&ctx.paths)?;
    println!("Settings updated.");
    Ok(())
}

fn show(ctx: &CommandContext) {
    let settings = &ctx.settings;

    println!("profit-calc Configuration");
    println!("=========================");
    println!("Base directory:   {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!("Journal:          {}", ctx.paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Delay rate:        {}", settings.delay_rate);
    println!("  Default format:    {:?}", settings.default_format);
    println!("  Journal enabled:   {}", settings.audit_enabled);
    if settings.expense_standards.is_empty() {
        println!("  Expense standards: none");
    } else {
        println!("  Expense standards:");
        for standard in &settings.expense_standards {
            println!(
                "    {:<24} {:?} x {}",
                standard.item, standard.basis, standard.rate
            );
        }
    }
}
