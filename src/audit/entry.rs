//! Journal entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of calculation that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Profitability summary of a plan
    Aggregate,
    /// A single scenario case
    Evaluate,
    /// One case of a Best/Worst review
    Review,
    /// A result written to a file
    Export,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Aggregate => write!(f, "AGGREGATE"),
            Operation::Evaluate => write!(f, "EVALUATE"),
            Operation::Review => write!(f, "REVIEW"),
            Operation::Export => write!(f, "EXPORT"),
        }
    }
}

/// A single journal entry
///
/// Records one calculation with snapshots of what went in and what came out,
/// so any figure shown to a reviewer can be traced back to its inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Identifies the command invocation; entries from one run share it
    pub run_id: Uuid,

    /// When the calculation ran (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// What was calculated (input file, case label, export path)
    pub subject: String,

    /// Input snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,

    /// Output snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,

    /// One-line human-readable result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    /// Journal a calculation
    pub fn calculation<I: Serialize, O: Serialize>(
        run_id: Uuid,
        operation: Operation,
        subject: impl Into<String>,
        input: &I,
        output: &O,
        summary: Option<String>,
    ) -> Self {
        Self {
            run_id,
            timestamp: Utc::now(),
            operation,
            subject: subject.into(),
            input: serde_json::to_value(input).ok(),
            output: serde_json::to_value(output).ok(),
            summary,
        }
    }

    /// Journal a file export
    pub fn export(run_id: Uuid, path: impl Into<String>, format: &str) -> Self {
        Self {
            run_id,
            timestamp: Utc::now(),
            operation: Operation::Export,
            subject: path.into(),
            input: None,
            output: None,
            summary: Some(format!("exported as {}", format)),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.subject
        );

        if let Some(summary) = &self.summary {
            output.push_str(&format!(" - {}", summary));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calculation_entry() {
        let run_id = Uuid::new_v4();
        let entry = AuditEntry::calculation(
            run_id,
            Operation::Evaluate,
            "case.json",
            &json!({"revenue": {"goods": 100}}),
            &json!({"total_revenue": 100}),
            Some("operating profit 100".into()),
        );

        assert_eq!(entry.run_id, run_id);
        assert_eq!(entry.operation, Operation::Evaluate);
        assert_eq!(entry.output.as_ref().unwrap()["total_revenue"], 100);
    }

    #[test]
    fn test_export_entry() {
        let entry = AuditEntry::export(Uuid::new_v4(), "out.csv", "csv");
        assert_eq!(entry.operation, Operation::Export);
        assert!(entry.input.is_none());
        assert_eq!(entry.summary.as_deref(), Some("exported as csv"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::export(Uuid::new_v4(), "out.csv", "csv");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"export\""));
        assert!(!json.contains("\"input\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.run_id, entry.run_id);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::calculation(
            Uuid::new_v4(),
            Operation::Aggregate,
            "plan.json",
            &json!({}),
            &json!({}),
            Some("net profit 1200".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("AGGREGATE"));
        assert!(formatted.contains("plan.json"));
        assert!(formatted.contains("net profit 1200"));
    }
}
