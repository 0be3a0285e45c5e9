//! Append-only calculation journal
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{ProfitError, ProfitResult};

use super::entry::{AuditEntry, Operation};

/// Selects journal entries; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct JournalQuery {
    pub operation: Option<Operation>,
    pub run_id: Option<Uuid>,
    /// Substring of the entry subject (input file, case label, export path)
    pub subject: Option<String>,
}

impl JournalQuery {
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn run(mut self, run_id: Uuid) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.operation.map_or(true, |op| entry.operation == op)
            && self.run_id.map_or(true, |id| entry.run_id == id)
            && self
                .subject
                .as_deref()
                .map_or(true, |needle| entry.subject.contains(needle))
    }
}

/// Writes journal entries to a JSONL file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> ProfitResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> ProfitResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProfitError::Io(format!("Failed to create journal directory: {}", e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ProfitError::Io(format!("Failed to open journal: {}", e)))?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                ProfitError::Json(format!("Failed to serialize journal entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| ProfitError::Io(format!("Failed to write journal entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| ProfitError::Io(format!("Failed to flush journal: {}", e)))?;

        Ok(())
    }

    /// Entries matching `query`, oldest first
    pub fn entries(&self, query: &JournalQuery) -> ProfitResult<Vec<AuditEntry>> {
        self.tail(query, usize::MAX)
    }

    /// The last `limit` entries matching `query`, oldest first
    pub fn tail(&self, query: &JournalQuery, limit: usize) -> ProfitResult<Vec<AuditEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut matched = VecDeque::new();
        self.scan(|entry| {
            if query.matches(&entry) {
                if matched.len() == limit {
                    matched.pop_front();
                }
                matched.push_back(entry);
            }
        })?;

        Ok(matched.into())
    }

    /// Run id of the most recently journaled calculation
    pub fn last_run_id(&self) -> ProfitResult<Option<Uuid>> {
        let mut last = None;
        self.scan(|entry| last = Some(entry.run_id))?;
        Ok(last)
    }

    /// Feed every entry to `visit`, oldest first
    fn scan(&self, mut visit: impl FnMut(AuditEntry)) -> ProfitResult<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ProfitError::Io(format!("Failed to open journal: {}", e)))?;

        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                ProfitError::Io(format!(
                    "Failed to read journal line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                ProfitError::Json(format!(
                    "Failed to parse journal entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            visit(entry);
        }

        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        (AuditLogger::new(log_path), temp_dir)
    }

    fn entry(run_id: Uuid, operation: Operation, subject: &str) -> AuditEntry {
        AuditEntry::calculation(
            run_id,
            operation,
            subject,
            &json!({"labor": []}),
            &json!({"net_profit": 0}),
            None,
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger
            .log(&entry(Uuid::new_v4(), Operation::Aggregate, "plan.json"))
            .unwrap();

        let entries = logger.entries(&JournalQuery::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Aggregate);
        assert_eq!(entries[0].subject, "plan.json");
    }

    #[test]
    fn test_tail_keeps_most_recent() {
        let (logger, _temp) = create_test_logger();
        let run = Uuid::new_v4();
        let entries: Vec<AuditEntry> = (0..5)
            .map(|i| entry(run, Operation::Aggregate, &format!("plan-{}", i)))
            .collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.tail(&JournalQuery::default(), 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].subject, "plan-3");
        assert_eq!(recent[1].subject, "plan-4");
        assert!(logger.tail(&JournalQuery::default(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_operation_and_run() {
        let (logger, _temp) = create_test_logger();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        logger
            .log_batch(&[
                entry(first, Operation::Aggregate, "plan.json"),
                entry(first, Operation::Export, "summary.csv"),
                entry(second, Operation::Review, "review.json (worst)"),
                entry(second, Operation::Review, "review.json (best)"),
            ])
            .unwrap();

        let reviews = logger
            .entries(&JournalQuery::default().operation(Operation::Review))
            .unwrap();
        assert_eq!(reviews.len(), 2);

        let first_run = logger.entries(&JournalQuery::default().run(first)).unwrap();
        assert_eq!(first_run.len(), 2);
        assert_eq!(first_run[1].operation, Operation::Export);

        let best = logger
            .tail(&JournalQuery::default().run(second).subject("(best)"), 10)
            .unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].subject, "review.json (best)");

        assert_eq!(logger.last_run_id().unwrap(), Some(second));
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.exists());
        assert!(logger.entries(&JournalQuery::default()).unwrap().is_empty());
        assert_eq!(logger.last_run_id().unwrap(), None);
        logger.log_batch(&[]).unwrap();
        assert!(!logger.exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("nested").join("audit.log"));
        logger
            .log(&entry(Uuid::new_v4(), Operation::Aggregate, "plan.json"))
            .unwrap();
        assert!(logger.exists());
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let (logger, _temp) = create_test_logger();
        logger
            .log(&entry(Uuid::new_v4(), Operation::Aggregate, "plan.json"))
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
        writeln!(file, "not json").unwrap();

        let err = logger.entries(&JournalQuery::default()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
