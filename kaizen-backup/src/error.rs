//! Error types for backup import/export.

use thiserror::Error;

pub type BackupResult<T> = Result<T, BackupError>;

/// Errors surfaced to the user when a backup operation fails.
///
/// Import errors always fire *before* any write: a rejected file leaves
/// storage untouched.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unexpected shape: {0}")]
    WrongShape(String),

    #[error(transparent)]
    Storage(#[from] kaizen_storage::StorageError),
}
