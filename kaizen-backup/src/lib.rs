//! Backup export/import for Kaizen.
//!
//! One combined backup format (notes + protocol + score log) plus flat
//! exports of the raw notes array and score-history map. Imports validate
//! the whole payload before any write, so a rejected file never leaves
//! storage partially modified.

mod error;
mod flat;
mod merge;

pub use error::{BackupError, BackupResult};
pub use flat::{export_notes, export_score_log, import_notes, import_score_log};
pub use merge::{merge_backup, merge_notes, merge_protocol, merge_score_log};

use kaizen_storage::Repository;
use kaizen_types::Backup;

/// How an imported backup is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Combine with existing data field by field.
    Merge,
    /// Incoming fields overwrite their existing records wholesale.
    Replace,
}

/// What an import would bring in, shown before applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportPreview {
    pub note_count: usize,
    pub has_protocol: bool,
    pub score_entries: usize,
}

impl ImportPreview {
    pub fn of(backup: &Backup) -> Self {
        Self {
            note_count: backup.notes.as_ref().map_or(0, Vec::len),
            has_protocol: backup.protocol.is_some(),
            score_entries: backup.score_log.as_ref().map_or(0, |log| log.len()),
        }
    }
}

/// Snapshot current storage as a backup. Notes and score log are always
/// present (possibly empty); the protocol is included only when one is
/// active.
pub fn export_backup(repo: &Repository) -> BackupResult<Backup> {
    Ok(Backup {
        notes: Some(repo.load_notes()?),
        protocol: repo.load_protocol()?,
        score_log: Some(repo.load_score_history()?),
    })
}

/// Parse a backup file, rejecting anything that is not a backup-shaped
/// JSON object. Partial objects (missing fields) are accepted.
pub fn parse_backup(json: &str) -> BackupResult<Backup> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| BackupError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(BackupError::WrongShape(
            "backup must be a JSON object".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| BackupError::WrongShape(e.to_string()))
}

/// Apply a parsed backup to storage.
///
/// Merge mode loads the existing snapshot first and applies the documented
/// existing-then-incoming merge; replace mode overwrites each record the
/// incoming backup carries. Either way, validation already happened in
/// [`parse_backup`] and every write is of a fully merged value.
pub fn apply_backup(repo: &Repository, incoming: Backup, mode: ImportMode) -> BackupResult<()> {
    let applied = match mode {
        ImportMode::Replace => incoming,
        ImportMode::Merge => {
            let existing = Backup {
                notes: Some(repo.load_notes()?),
                protocol: repo.load_protocol()?,
                score_log: Some(repo.load_score_history()?),
            };
            merge_backup(existing, incoming)
        }
    };

    if let Some(notes) = &applied.notes {
        repo.save_notes(notes)?;
    }
    if let Some(protocol) = &applied.protocol {
        repo.save_protocol(protocol)?;
    }
    if let Some(score_log) = &applied.score_log {
        repo.save_score_history(score_log)?;
    }

    tracing::info!(
        notes = applied.notes.as_ref().map_or(0, Vec::len),
        protocol = applied.protocol.is_some(),
        score_entries = applied.score_log.as_ref().map_or(0, |l| l.len()),
        "backup applied"
    );
    Ok(())
}

/// Parse and apply in one step: the common import path.
pub fn import_backup(repo: &Repository, json: &str, mode: ImportMode) -> BackupResult<ImportPreview> {
    let backup = parse_backup(json)?;
    let preview = ImportPreview::of(&backup);
    apply_backup(repo, backup, mode)?;
    Ok(preview)
}

/// Serialize a backup the way the export file is written.
pub fn to_json(backup: &Backup) -> BackupResult<String> {
    serde_json::to_string_pretty(backup).map_err(|e| BackupError::InvalidJson(e.to_string()))
}
