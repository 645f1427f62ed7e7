//! Flat exports: the raw notes array and the raw score-history map,
//! importable/exportable independently of the combined backup format.
//! Each matches its storage shape exactly.

use crate::error::{BackupError, BackupResult};
use kaizen_storage::Repository;
use kaizen_types::{Note, ScoreHistory};

/// The notes collection as a flat JSON array.
pub fn export_notes(repo: &Repository) -> BackupResult<String> {
    let notes = repo.load_notes()?;
    serde_json::to_string_pretty(&notes).map_err(|e| BackupError::InvalidJson(e.to_string()))
}

/// Replace the notes collection from a flat JSON array. Anything that is
/// not an array of notes is rejected before any write.
pub fn import_notes(repo: &Repository, json: &str) -> BackupResult<usize> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| BackupError::InvalidJson(e.to_string()))?;
    if !value.is_array() {
        return Err(BackupError::WrongShape("expected a JSON array of notes".into()));
    }
    let notes: Vec<Note> =
        serde_json::from_value(value).map_err(|e| BackupError::WrongShape(e.to_string()))?;
    repo.save_notes(&notes)?;
    Ok(notes.len())
}

/// The score history as a flat date→score JSON object.
pub fn export_score_log(repo: &Repository) -> BackupResult<String> {
    let history = repo.load_score_history()?;
    serde_json::to_string_pretty(&history).map_err(|e| BackupError::InvalidJson(e.to_string()))
}

/// Replace the score history from a flat date→score JSON object. Arrays
/// and scalars are rejected before any write.
pub fn import_score_log(repo: &Repository, json: &str) -> BackupResult<usize> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| BackupError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(BackupError::WrongShape(
            "expected a JSON object mapping dates to scores".into(),
        ));
    }
    let history: ScoreHistory =
        serde_json::from_value(value).map_err(|e| BackupError::WrongShape(e.to_string()))?;
    repo.save_score_history(&history)?;
    Ok(history.len())
}
