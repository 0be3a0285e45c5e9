//! Custom error types for profit-calc
//!
//! The computation core never fails; these errors cover the boundary around
//! it: reading input documents, settings, exports and the calculation journal.

use thiserror::Error;

/// The main error type for profit-calc operations
#[derive(Error, Debug)]
pub enum ProfitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for input documents
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed numeric input at the boundary
    #[error("Invalid number '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ProfitError {
    /// Create a parse error for a rejected numeric string
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a validation error (test helper)
    #[cfg(test)]
    pub(crate) fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ProfitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ProfitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ProfitError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<crate::numeric::NumberParseError> for ProfitError {
    fn from(err: crate::numeric::NumberParseError) -> Self {
        use crate::numeric::NumberParseError;
        match err {
            NumberParseError::UnexpectedCharacter(input, c) => {
                Self::parse(input, format!("unexpected character '{}'", c))
            }
            NumberParseError::InvalidFormat(input) => Self::parse(input, "malformed number"),
        }
    }
}

impl From<csv::Error> for ProfitError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for profit-calc operations
pub type ProfitResult<T> = Result<T, ProfitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProfitError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_parse_error() {
        let err = ProfitError::parse("12a", "unexpected character 'a'");
        assert_eq!(
            err.to_string(),
            "Invalid number '12a': unexpected character 'a'"
        );
    }

    #[test]
    fn test_from_number_parse_error() {
        let err: ProfitError = crate::numeric::parse_amount("1.2.3").unwrap_err().into();
        assert_eq!(err.to_string(), "Invalid number '1.2.3': malformed number");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProfitError = io_err.into();
        assert!(matches!(err, ProfitError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ProfitError = json_err.into();
        assert!(matches!(err, ProfitError::Json(_)));
    }
}
