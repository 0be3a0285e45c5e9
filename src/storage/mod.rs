//! File access for profit-calc
//!
//! Input documents (plans, cases, reviews) are read from JSON or YAML files;
//! computed results are written with atomic temp-file-and-rename writes.

pub mod file_io;

pub use file_io::{read_document, write_atomic, write_json_atomic, DocumentFormat};
