//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the calculators and reports.

pub mod config;
pub mod log;
pub mod plan;
pub mod scenario;

pub use config::{handle_config_command, ConfigCommands};
pub use log::{handle_log_command, LogArgs};
pub use plan::{
    handle_effort_command, handle_products_command, handle_summary_command, PlanArgs, SummaryArgs,
};
pub use scenario::{handle_review_command, handle_scenario_command, ReviewArgs, ScenarioArgs};

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{OutputFormat, ProfitPaths, Settings};
use crate::error::{ProfitError, ProfitResult};
use crate::export::{export_json, export_yaml, ExportDocument};
use crate::storage::write_atomic;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub paths: ProfitPaths,
    pub settings: Settings,
    /// Shared by every journal entry this invocation writes
    pub run_id: Uuid,
}

impl CommandContext {
    pub fn new(paths: ProfitPaths, settings: Settings) -> Self {
        Self {
            paths,
            settings,
            run_id: Uuid::new_v4(),
        }
    }

    /// The requested format, else the configured default
    pub fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.settings.default_format)
    }

    pub fn logger(&self) -> AuditLogger {
        AuditLogger::new(self.paths.audit_log())
    }

    /// Append entries to the journal when journaling is enabled
    pub fn journal(&self, entries: &[AuditEntry]) -> ProfitResult<()> {
        if !self.settings.audit_enabled {
            return Ok(());
        }
        self.logger().log_batch(entries)
    }

    /// Write a CSV table atomically and journal the export
    pub fn write_csv<F>(&self, path: &Path, export: F) -> ProfitResult<()>
    where
        F: FnOnce(&mut dyn Write) -> ProfitResult<()>,
    {
        write_atomic(path, |writer| export(writer))?;
        self.journal(&[AuditEntry::export(
            self.run_id,
            path.display().to_string(),
            "csv",
        )])?;
        println!("Exported to: {}", path.display());
        Ok(())
    }
}

/// Print a result in the chosen format; `text` renders the terminal table
pub(crate) fn print_result<T: Serialize>(
    format: OutputFormat,
    document: &ExportDocument<T>,
    text: impl FnOnce() -> String,
) -> ProfitResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => {
            write!(out, "{}", text()).map_err(|e| ProfitError::Io(e.to_string()))?;
        }
        OutputFormat::Json => export_json(document, &mut out, true)?,
        OutputFormat::Yaml => export_yaml(document, &mut out)?,
    }

    Ok(())
}
