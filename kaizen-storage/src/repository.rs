//! Typed repository over the record store.
//!
//! One load/save pair per logical record. Loads tolerate malformed JSON
//! (log + default) so a corrupted record can never crash a view; real
//! storage failures still propagate.

use crate::error::StorageResult;
use crate::protocol::decode_protocol;
use crate::record_store::{RecordKey, RecordStore};
use kaizen_types::{DailyTarget, Note, ProgressState, ProtocolSetup, ScoreHistory, VaultNote};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Typed access to every persisted record, injected into each derivation
/// instead of reached for ambiently.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn RecordStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Decode a stored record, treating malformed JSON as absence.
    fn load_or<T: DeserializeOwned>(&self, key: RecordKey, fallback: T) -> StorageResult<T> {
        match self.store.get(key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(e) => {
                    tracing::warn!(record = %key, error = %e, "stored record is malformed, ignoring");
                    Ok(fallback)
                }
            },
            None => Ok(fallback),
        }
    }

    fn save<T: Serialize>(&self, key: RecordKey, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.put(key, &raw)
    }

    // ── Notes ────────────────────────────────────────────────────

    /// All notes, most recent first.
    pub fn load_notes(&self) -> StorageResult<Vec<Note>> {
        self.load_or(RecordKey::Notes, Vec::new())
    }

    pub fn save_notes(&self, notes: &[Note]) -> StorageResult<()> {
        self.save(RecordKey::Notes, &notes)
    }

    /// Insert a note at the front of the collection.
    pub fn add_note(&self, note: Note) -> StorageResult<()> {
        let mut notes = self.load_notes()?;
        notes.insert(0, note);
        self.save_notes(&notes)
    }

    /// Delete a note by id. Returns whether anything was removed.
    pub fn delete_note(&self, id: &str) -> StorageResult<bool> {
        let mut notes = self.load_notes()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        self.save_notes(&notes)?;
        Ok(true)
    }

    // ── Protocol ─────────────────────────────────────────────────

    /// The active protocol in canonical shape, tolerating the legacy
    /// positional-array record.
    pub fn load_protocol(&self) -> StorageResult<Option<ProtocolSetup>> {
        match self.store.get(RecordKey::Protocol)? {
            Some(raw) => Ok(decode_protocol(&raw)),
            None => Ok(None),
        }
    }

    /// Writes always use the canonical object shape.
    pub fn save_protocol(&self, protocol: &ProtocolSetup) -> StorageResult<()> {
        self.save(RecordKey::Protocol, protocol)
    }

    // ── Progress ─────────────────────────────────────────────────

    pub fn load_progress(&self) -> StorageResult<Option<ProgressState>> {
        self.load_or(RecordKey::Progress, None)
    }

    pub fn save_progress(&self, progress: &ProgressState) -> StorageResult<()> {
        self.save(RecordKey::Progress, progress)
    }

    // ── Score history ────────────────────────────────────────────

    pub fn load_score_history(&self) -> StorageResult<ScoreHistory> {
        self.load_or(RecordKey::ScoreHistory, ScoreHistory::new())
    }

    pub fn save_score_history(&self, history: &ScoreHistory) -> StorageResult<()> {
        self.save(RecordKey::ScoreHistory, history)
    }

    // ── Vault ────────────────────────────────────────────────────

    pub fn load_vault_entries(&self) -> StorageResult<Vec<VaultNote>> {
        self.load_or(RecordKey::VaultEntries, Vec::new())
    }

    pub fn save_vault_entries(&self, entries: &[VaultNote]) -> StorageResult<()> {
        self.save(RecordKey::VaultEntries, &entries)
    }

    /// The stored PIN, plaintext. A known weakness, kept deliberately:
    /// the vault is obfuscation, not access control.
    pub fn load_vault_pin(&self) -> StorageResult<Option<String>> {
        self.store.get(RecordKey::VaultPin)
    }

    pub fn save_vault_pin(&self, pin: &str) -> StorageResult<()> {
        self.store.put(RecordKey::VaultPin, pin)
    }

    // ── Daily target cache ───────────────────────────────────────

    pub fn load_cached_target(&self) -> StorageResult<Option<DailyTarget>> {
        self.load_or(RecordKey::DailyTarget, None)
    }

    pub fn save_cached_target(&self, target: &DailyTarget) -> StorageResult<()> {
        self.save(RecordKey::DailyTarget, target)
    }

    // ── Whole-store ──────────────────────────────────────────────

    /// Remove every record. Used by the settings reset action.
    pub fn reset(&self) -> StorageResult<()> {
        for key in RecordKey::ALL {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
