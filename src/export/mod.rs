//! Export module for profit-calc
//!
//! Writes computed results as versioned documents:
//! - JSON: machine-readable, for downstream tooling
//! - YAML: human-readable, for review packs
//!
//! CSV tables come from the `reports` module.

pub mod json;
pub mod yaml;

pub use json::{export_json, ExportDocument, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
