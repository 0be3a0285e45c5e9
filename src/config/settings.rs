//! User settings for profit-calc
//!
//! Policy inputs that belong to the organisation rather than to a single
//! plan: the delay-cost rate, expense standards, the default output format
//! and whether calculations are journaled.

use serde::{Deserialize, Serialize};

use super::paths::ProfitPaths;
use crate::error::ProfitError;
use crate::services::{AggregationPolicy, ExpenseStandard};
use crate::storage::write_json_atomic;

/// Output format for computed results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned terminal table
    #[default]
    Text,
    Json,
    Yaml,
}

/// User settings for profit-calc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Delay-cost surcharge as a fraction of service labor cost
    #[serde(default)]
    pub delay_rate: f64,

    /// Standard rates for derived expense rows
    #[serde(default)]
    pub expense_standards: Vec<ExpenseStandard>,

    /// Format used when a command is not given `--format`
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Whether each calculation is appended to the journal
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            delay_rate: 0.0,
            expense_standards: Vec::new(),
            default_format: OutputFormat::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Aggregation policy derived from these settings
    pub fn aggregation_policy(&self) -> AggregationPolicy {
        AggregationPolicy::with_delay_rate(self.delay_rate)
    }

    /// Reject settings the calculators cannot use
    pub fn validate(&self) -> Result<(), ProfitError> {
        if !self.delay_rate.is_finite() || self.delay_rate < 0.0 {
            return Err(ProfitError::Config(format!(
                "delay_rate must be a non-negative fraction, got {}",
                self.delay_rate
            )));
        }
        for standard in &self.expense_standards {
            if standard.item.trim().is_empty() {
                return Err(ProfitError::Config(
                    "expense standard with an empty item label".into(),
                ));
            }
        }
        Ok(())
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ProfitPaths) -> Result<Self, ProfitError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ProfitError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ProfitError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ProfitPaths) -> Result<(), ProfitError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
