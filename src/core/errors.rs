//! Shared error types for the application

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for reefmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The requested date range ends before it starts
    #[error("invalid date range: end {end} precedes start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Series generation was asked to cover no regions at all
    #[error("region set is empty")]
    EmptyRegionSet,

    /// Classification was asked to label a dataset with no rows
    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Quantile rules only accept the open interval (0, 1)
    #[error("quantile must lie strictly between 0 and 1, got {0}")]
    InvalidQuantile(f64),

    /// A named column is missing from the dataset header
    #[error("unknown column: {0:?}")]
    UnknownColumn(String),

    /// A cell in the metric column failed to parse as a number
    #[error("row {row}: column {column:?} holds non-numeric value {value:?}")]
    InvalidMetric {
        row: usize,
        column: String,
        value: String,
    },

    /// Structural CSV failures (unterminated quotes, missing header)
    #[error("malformed CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    /// Quiz definition violates its invariants
    #[error("invalid quiz definition: {0}")]
    Quiz(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a CSV error with line context
    pub fn csv(line: usize, message: impl Into<String>) -> Self {
        Self::Csv {
            line,
            message: message.into(),
        }
    }

    /// Create a quiz definition error
    pub fn quiz(message: impl Into<String>) -> Self {
        Self::Quiz(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using the reefmap error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use chrono::NaiveDate;

    #[test]
    fn invalid_range_mentions_both_endpoints() {
        let start = NaiveDate::from_ymd_opt(2002, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let message = Error::InvalidRange { start, end }.to_string();
        assert!(message.contains("2002-01-01"));
        assert!(message.contains("2000-01-01"));
    }

    #[test]
    fn helper_constructors_produce_matching_variants() {
        assert!(matches!(
            Error::csv(3, "bad quote"),
            Error::Csv { line: 3, .. }
        ));
        assert!(matches!(Error::quiz("no questions"), Error::Quiz(_)));
        assert!(matches!(
            Error::configuration("bad quantile"),
            Error::Configuration(_)
        ));
    }
}
