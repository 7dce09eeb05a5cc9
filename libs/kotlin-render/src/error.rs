//! Error types for the error-map sidecar format.

use thiserror::Error;

/// Failure reading an error-map sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorMapError {
    #[error("error map is empty, expected the source path on the first line")]
    MissingSourcePath,

    #[error("error map line {line}: expected 8 fields, found {found}")]
    WrongFieldCount { line: usize, found: usize },

    #[error("error map line {line}: `{field}` is not a number")]
    InvalidNumber { line: usize, field: String },
}
