//! Error types for occupancy analysis.
//!
//! Three failure families are distinguished:
//!
//! - [`ParseError`]: a single reservation's time text could not be read. The
//!   record is excluded from the run and reported, never defaulted.
//! - [`AnalysisError::Configuration`]: the request itself is unusable (for
//!   example an operating window whose start is not before its end). Nothing
//!   is computed.
//! - [`AnalysisError::Ingestion`]: the input batch is structurally broken
//!   (missing required column or value, duplicated id). The batch is rejected
//!   wholesale.

use polars::prelude::PolarsError;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failure to read an `HH:MM` clock-time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty time value")]
    Empty,

    #[error("Malformed time '{0}': expected HH:MM")]
    Malformed(String),

    #[error("Hour out of range in '{0}': expected 0-23")]
    HourOutOfRange(String),

    #[error("Minute out of range in '{0}': expected 0-59")]
    MinuteOutOfRange(String),
}

/// Error type for analysis requests
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl AnalysisError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        AnalysisError::Configuration(msg.into())
    }

    pub fn ingestion(msg: impl Into<String>) -> Self {
        AnalysisError::Ingestion(msg.into())
    }
}

impl From<PolarsError> for AnalysisError {
    fn from(err: PolarsError) -> Self {
        AnalysisError::Ingestion(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_converts_into_analysis_error() {
        let err: AnalysisError = ParseError::Malformed("abc".to_string()).into();
        assert!(matches!(err, AnalysisError::Parse(ParseError::Malformed(_))));
        assert_eq!(
            err.to_string(),
            "Parse error: Malformed time 'abc': expected HH:MM"
        );
    }

    #[test]
    fn test_configuration_helper() {
        let err = AnalysisError::configuration("start_hour must be before end_hour");
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }
}
