//! Journal CLI command

use clap::Args;
use uuid::Uuid;

use super::CommandContext;
use crate::audit::{JournalQuery, Operation};
use crate::error::{ProfitError, ProfitResult};

/// Arguments for `profit log`
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Only entries of this kind
    #[arg(short, long, value_enum)]
    pub operation: Option<Operation>,

    /// Only entries whose subject contains this text
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Only entries written by this run
    #[arg(long, conflicts_with = "last_run")]
    pub run: Option<Uuid>,

    /// Only entries written by the most recent run
    #[arg(long)]
    pub last_run: bool,

    /// Print raw JSON lines, including input and output snapshots
    #[arg(long)]
    pub json: bool,
}

/// Handle `profit log`
pub fn handle_log_command(ctx: &CommandContext, args: LogArgs) -> ProfitResult<()> {
    let logger = ctx.logger();

    let run_id = if args.last_run {
        logger.last_run_id()?
    } else {
        args.run
    };
    let filtered = args.operation.is_some() || args.subject.is_some() || run_id.is_some();
    let query = JournalQuery {
        operation: args.operation,
        run_id,
        subject: args.subject,
    };
    let entries = logger.tail(&query, args.limit)?;

    if entries.is_empty() {
        if filtered {
            println!("No journal entries match.");
            return Ok(());
        }
        println!("No calculations journaled yet.");
        if !ctx.settings.audit_enabled {
            println!("Journaling is disabled in {}", ctx.paths.settings_file().display());
        }
        return Ok(());
    }

    for entry in &entries {
        if args.json {
            let line = serde_json::to_string(entry)
                .map_err(|e| ProfitError::Json(format!("Failed to serialize entry: {}", e)))?;
            println!("{}", line);
        } else {
            println!("{}", entry.format_human_readable());
        }
    }

    Ok(())
}
