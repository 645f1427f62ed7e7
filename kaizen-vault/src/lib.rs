//! PIN-gated vault over the record store.
//!
//! Entries are stored with their text base64-encoded. This is reversible
//! obfuscation against shoulder-surfing a raw data file, NOT encryption and
//! NOT access control (the PIN itself is persisted in plaintext). Treat the
//! whole mechanism as a privacy curtain, never a security boundary.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Local};
use kaizen_storage::{Repository, StorageError};
use kaizen_types::{date_key, VaultNote};
use thiserror::Error;

/// Minimum accepted PIN length.
pub const MIN_PIN_LEN: usize = 4;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("no PIN has been set for this vault")]
    PinNotSet,
    #[error("a PIN is already set")]
    AlreadyInitialized,
    #[error("incorrect PIN")]
    PinMismatch,
    #[error("PIN must be at least {MIN_PIN_LEN} characters")]
    PinTooShort,
    #[error("entry not found: {0}")]
    EntryNotFound(String),
    #[error("entry text is not valid encoded data: {0}")]
    Encoding(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type VaultResult<T> = Result<T, VaultError>;

/// A vault entry with its text decoded back to plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub id: String,
    pub raw_date: String,
    pub date: String,
    pub text: String,
}

/// The PIN gate plus entry CRUD. All mutation and plaintext reads go
/// through [`Vault::unlock`]; the raw (still-encoded) entries stay readable
/// without a PIN because derivations only need their dates.
pub struct Vault {
    repo: Repository,
}

impl Vault {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Whether a PIN has ever been set.
    pub fn is_initialized(&self) -> VaultResult<bool> {
        Ok(self.repo.load_vault_pin()?.is_some())
    }

    /// First-time PIN setup. Rejects short PINs and re-initialization.
    pub fn set_pin(&self, pin: &str) -> VaultResult<VaultSession<'_>> {
        if pin.trim().len() < MIN_PIN_LEN {
            return Err(VaultError::PinTooShort);
        }
        if self.is_initialized()? {
            return Err(VaultError::AlreadyInitialized);
        }
        self.repo.save_vault_pin(pin.trim())?;
        tracing::info!("vault initialized");
        Ok(VaultSession { repo: &self.repo })
    }

    /// Check the PIN and open a session. No lockout, no retry limit.
    pub fn unlock(&self, pin: &str) -> VaultResult<VaultSession<'_>> {
        let saved = self.repo.load_vault_pin()?.ok_or(VaultError::PinNotSet)?;
        if pin != saved {
            tracing::warn!("vault unlock rejected, PIN mismatch");
            return Err(VaultError::PinMismatch);
        }
        Ok(VaultSession { repo: &self.repo })
    }

    /// Stored entries with text still encoded. Used by the score engine,
    /// which only inspects dates.
    pub fn raw_entries(&self) -> VaultResult<Vec<VaultNote>> {
        Ok(self.repo.load_vault_entries()?)
    }
}

/// An unlocked vault. Only obtainable through the PIN gate.
pub struct VaultSession<'a> {
    repo: &'a Repository,
}

impl VaultSession<'_> {
    /// Add an entry stamped with the given creation instant. The plaintext
    /// is encoded before it ever touches storage.
    pub fn add_entry(&self, text: &str, created: DateTime<Local>) -> VaultResult<VaultNote> {
        let entry = VaultNote {
            id: created.timestamp_millis().to_string(),
            raw_date: date_key(created.date_naive()),
            date: created.format("%a %d %b, %H:%M").to_string(),
            text: encode(text.trim()),
        };
        let mut entries = self.repo.load_vault_entries()?;
        entries.insert(0, entry.clone());
        self.repo.save_vault_entries(&entries)?;
        Ok(entry)
    }

    /// All entries decoded to plaintext, most recent first.
    pub fn entries(&self) -> VaultResult<Vec<DecodedEntry>> {
        self.repo
            .load_vault_entries()?
            .into_iter()
            .map(|e| {
                Ok(DecodedEntry {
                    text: decode(&e.text)?,
                    id: e.id,
                    raw_date: e.raw_date,
                    date: e.date,
                })
            })
            .collect()
    }

    /// Delete an entry by id.
    pub fn delete_entry(&self, id: &str) -> VaultResult<()> {
        let mut entries = self.repo.load_vault_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(VaultError::EntryNotFound(id.to_string()));
        }
        self.repo.save_vault_entries(&entries)?;
        Ok(())
    }
}

/// Reversible obfuscation of entry text: base64 over UTF-8.
pub fn encode(text: &str) -> String {
    BASE64.encode(text.as_bytes())
}

/// Inverse of [`encode`].
pub fn decode(encoded: &str) -> VaultResult<String> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| VaultError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| VaultError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips() {
        let plain = "quiet ambition, loud results 🚀";
        assert_eq!(decode(&encode(plain)).unwrap(), plain);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("!!not-base64!!"), Err(VaultError::Encoding(_))));
    }
}
