//! Calculation journal for profit-calc
//!
//! Every aggregation, scenario evaluation and export is appended to a
//! line-delimited JSON log with its inputs and outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use profit_calc::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let summary = aggregator.aggregate_plan(&plan);
//! logger.log(&AuditEntry::calculation(
//!     run_id,
//!     Operation::Aggregate,
//!     "plan.json",
//!     &plan,
//!     &summary,
//!     None,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::{AuditLogger, JournalQuery};
