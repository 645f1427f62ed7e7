//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur reading or writing the record store.
///
/// Malformed JSON in a stored record is deliberately *not* represented
/// here: the repository logs it and treats the record as absent. Only real
/// storage failures (quota, I/O, backend errors) surface as errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Db(#[from] duckdb::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
