//! Error types for the verification engine.
//!
//! Every check either returns its complete result set or fails with a
//! [`VerifyError`]. Malformed data is never repaired inside a check: a
//! non-numeric value in a numeric column or a missing required column
//! propagates to the caller unchanged.
//!
//! Errors are serializable so that JSON reports can embed them.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for verification checks.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Column was not found in the dataset header.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The header names the same column twice.
    #[error("Column '{0}' appears more than once in the header")]
    DuplicateColumn(String),

    /// A row does not carry exactly one value per header column.
    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A field expected to be numeric holds non-numeric text.
    #[error("Failed to convert value '{value}' in column '{column}' (row {row}) to a number")]
    TypeConversionFailed {
        column: String,
        row: usize,
        value: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Check code outside the registry.
    #[error("Unknown check '{0}' (expected one of A, B, C, D, E, G, H, I, J, K)")]
    UnknownCheck(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<VerifyError>,
    },
}

impl VerifyError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        VerifyError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, used in JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::RaggedRow { .. } => "RAGGED_ROW",
            Self::TypeConversionFailed { .. } => "TYPE_CONVERSION_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnknownCheck(_) => "UNKNOWN_CHECK",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the data rather than the environment.
    ///
    /// Data-contract violations are not retried: rerunning the same check on the
    /// same file fails the same way.
    pub fn is_data_error(&self) -> bool {
        match self {
            Self::ColumnNotFound(_)
            | Self::DuplicateColumn(_)
            | Self::RaggedRow { .. }
            | Self::TypeConversionFailed { .. } => true,
            Self::WithContext { source, .. } => source.is_data_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for VerifyError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("VerifyError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| VerifyError::Polars(e).with_context(context))
    }
}
