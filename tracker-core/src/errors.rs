use std::path::PathBuf;
use thiserror::Error;

/// A submitted value that violates a field's type, range or enum constraint.
///
/// Raised before any write is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a whole number")]
    NotANumber { field: String, value: String },

    #[error("{field}: `{value}` must not be negative")]
    Negative { field: String, value: String },

    #[error("{field}: `{value}` must be between {min} and {max}")]
    OutOfRange {
        field: String,
        value: String,
        min: i64,
        max: i64,
    },

    #[error("{field}: `{value}` is not a rating (expected bad, neutral or good)")]
    UnknownRating { field: String, value: String },

    #[error("unknown field `{0}`")]
    UnknownField(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot initialise storage at {}: {source}", path.display())]
    Init {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
