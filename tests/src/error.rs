//! Errors reported by expectation checks.

use automap_mapper::{MapError, MapErrorKind};
use thiserror::Error;

/// A mapping result did not meet its expectation.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Expected success, got error: {0}")]
    UnexpectedError(MapError),

    #[error("Expected {expected:?} error, but mapping succeeded")]
    UnexpectedSuccess { expected: MapErrorKind },

    #[error("Expected {expected:?} error, got: {actual}")]
    WrongErrorKind {
        expected: MapErrorKind,
        actual: MapError,
    },

    #[error("Expected error at field path {expected:?}, got {actual:?}")]
    WrongFieldPath {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Field '{path}' not found on destination")]
    MissingField { path: String },

    #[error("Field '{path}': expected {expected}, got {actual}")]
    FieldMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

impl CheckError {
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub fn field_mismatch(
        path: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::FieldMismatch {
            path: path.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type for expectation checks.
pub type CheckResult<T> = Result<T, CheckError>;
