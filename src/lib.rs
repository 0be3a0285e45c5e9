//! profit-calc - Project profitability calculator
//!
//! This library computes the profitability of a project plan. It has two
//! calculators:
//!
//! - The **aggregator** rolls labor allocations, product sales and expenses
//!   up into a categorized profit-and-loss summary (company vs. outsourced
//!   services, own vs. third-party products, extra revenue and expense).
//! - The **scenario calculator** turns a revenue estimate, itemized costs
//!   and effort into an operating-profit waterfall with a risk cost and up
//!   to two external-purchase deductions, for Worst and Best cases.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `numeric`: Amount parsing, rounding and rate helpers
//! - `models`: Input line items, scenario cases and computed results
//! - `services`: The calculators (pure functions, no I/O)
//! - `reports`: Terminal tables and CSV exports
//! - `export`: Versioned JSON/YAML result documents
//! - `storage`: Reading input documents, atomic writes
//! - `audit`: Calculation journal
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `cli`: Command handlers for the `profit` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use profit_calc::models::{CaseInput, RevenueBreakdown};
//! use profit_calc::services::evaluate;
//!
//! let case = CaseInput::new(RevenueBreakdown::new(100_000.0, 0.0, 50_000.0));
//! let result = evaluate(&case);
//! println!("operating profit: {}", result.operating_profit.amount);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod numeric;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ProfitError, ProfitResult};
