//! JSON Export functionality
//!
//! Wraps a computed result in a document that records which schema and
//! application version produced it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{ProfitError, ProfitResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A computed result with its provenance
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// What kind of result this is ("summary", "scenario", "review", ...)
    pub kind: String,

    /// Input document the result was computed from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub result: T,
}

impl<T> ExportDocument<T> {
    pub fn new(kind: impl Into<String>, result: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            kind: kind.into(),
            source: None,
            result,
        }
    }

    /// Record the input document (builder style)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Write a document as JSON
pub fn export_json<T: Serialize, W: Write>(
    document: &ExportDocument<T>,
    writer: &mut W,
    pretty: bool,
) -> ProfitResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, document)
    } else {
        serde_json::to_writer(&mut *writer, document)
    }
    .map_err(|e| ProfitError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| ProfitError::Export(e.to_string()))?;
    Ok(())
}
