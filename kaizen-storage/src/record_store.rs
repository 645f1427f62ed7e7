//! The `RecordStore` seam and its two implementations.
//!
//! A record store is a flat key → JSON-string map. The DuckDB-backed store
//! persists records in a single `records` table; the in-memory store backs
//! unit tests of everything built on top.

use crate::error::StorageResult;
use duckdb::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Typed names for every logical record the app persists.
///
/// Implementers may rename the underlying strings, but each variant must
/// stay an independently readable/writable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Notes,
    Protocol,
    VaultEntries,
    VaultPin,
    Progress,
    ScoreHistory,
    DailyTarget,
}

impl RecordKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notes => "kaizen_notes",
            Self::Protocol => "kaizen_target_protocol",
            Self::VaultEntries => "kaizen_vault_notes",
            Self::VaultPin => "kaizen_vault_pin",
            Self::Progress => "kaizen_progress",
            Self::ScoreHistory => "kaizen_score_history",
            Self::DailyTarget => "kaizen_today_target",
        }
    }

    /// Every key, for whole-store operations like reset.
    pub const ALL: [RecordKey; 7] = [
        RecordKey::Notes,
        RecordKey::Protocol,
        RecordKey::VaultEntries,
        RecordKey::VaultPin,
        RecordKey::Progress,
        RecordKey::ScoreHistory,
        RecordKey::DailyTarget,
    ];
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous, immediately-consistent key-value storage.
pub trait RecordStore: Send + Sync {
    /// Read a record. `None` means the key has never been written (or was
    /// removed); callers treat that as a normal, handled state.
    fn get(&self, key: RecordKey) -> StorageResult<Option<String>>;

    /// Write (upsert) a record.
    fn put(&self, key: RecordKey, value: &str) -> StorageResult<()>;

    /// Remove a record. Removing an absent key is a no-op.
    fn remove(&self, key: RecordKey) -> StorageResult<()>;
}

// ── DuckDB-backed store ──────────────────────────────────────────

/// Persistent record store backed by a single-table DuckDB database.
#[derive(Clone)]
pub struct DuckDbStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbStore {
    /// Opens or creates the store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = crate::open_db_with_wal_recovery(path, "64MB", 1)?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory store (for testing the DuckDB path itself).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl RecordStore for DuckDbStore {
    fn get(&self, key: RecordKey) -> StorageResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT value FROM records WHERE record_key = ?",
            params![key.as_str()],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: RecordKey, value: &str) -> StorageResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO records (record_key, value, updated_at) VALUES (?, ?, ?)",
            params![key.as_str(), value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: RecordKey) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM records WHERE record_key = ?",
            params![key.as_str()],
        )?;
        Ok(())
    }
}

fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            record_key VARCHAR PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at BIGINT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

// ── In-memory store ──────────────────────────────────────────────

/// In-memory record store for tests.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: RecordKey) -> StorageResult<Option<String>> {
        Ok(self.records.lock().unwrap().get(key.as_str()).cloned())
    }

    fn put(&self, key: RecordKey, value: &str) -> StorageResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(key.as_str(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: RecordKey) -> StorageResult<()> {
        self.records.lock().unwrap().remove(key.as_str());
        Ok(())
    }
}
