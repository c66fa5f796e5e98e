//! Error types for cycle profiling.

use thiserror::Error;

/// Failures that abort a profiling call.
///
/// Empty date ranges, short histories and unparseable timestamps are not errors:
/// they degrade to zero-filled tables, partial averages and dropped rows.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Required column missing: {column}")]
    MissingColumn { column: String },

    #[error("Column {column} has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Unknown horizon: {0}")]
    UnknownHorizon(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
