//! Configuration module for profit-calc
//!
//! - Path resolution for settings, the calculation journal and exports
//! - Persisted policy settings (delay rate, expense standards, output format)

pub mod paths;
pub mod settings;

pub use paths::ProfitPaths;
pub use settings::{OutputFormat, Settings};
