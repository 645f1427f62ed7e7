//! Key-addressed storage layer for Kaizen.
//!
//! Every logical record (notes, protocol, vault entries, progress, score
//! history, cached daily target) is an independently readable/writable JSON
//! value behind a [`RecordKey`]. The store itself is deliberately dumb:
//! typed decoding, legacy-shape tolerance, and defaulting all live in
//! [`Repository`], so derivation code never sees raw JSON.
//!
//! # Architecture
//!
//! - [`RecordStore`] is the seam: DuckDB-backed for the app, in-memory for
//!   tests.
//! - Absence of a key is a valid state, never an error.
//! - One logical writer at a time; concurrent writers are last-write-wins.

mod error;
mod protocol;
mod record_store;
mod repository;

pub use error::{StorageError, StorageResult};
pub use protocol::decode_protocol;
pub use record_store::{DuckDbStore, MemoryStore, RecordKey, RecordStore};
pub use repository::Repository;

/// Open a DuckDB connection with stale WAL recovery and resource limits.
///
/// If the initial open fails and a `.wal` file exists alongside the
/// database, it is removed and the open retried once; an unclean shutdown
/// can leave a WAL file that prevents reopening. Memory and thread caps are
/// applied because DuckDB's defaults assume it owns the machine.
pub fn open_db_with_wal_recovery(
    path: &std::path::Path,
    memory_limit: &str,
    threads: u32,
) -> StorageResult<duckdb::Connection> {
    let conn = match duckdb::Connection::open(path) {
        Ok(c) => c,
        Err(first_err) => {
            let wal_path = path.with_extension(
                path.extension()
                    .map(|ext| format!("{}.wal", ext.to_string_lossy()))
                    .unwrap_or_else(|| "wal".to_string()),
            );
            if wal_path.exists() {
                tracing::warn!(
                    wal = %wal_path.display(),
                    "database open failed, removing stale WAL and retrying"
                );
                if std::fs::remove_file(&wal_path).is_ok() {
                    let c = duckdb::Connection::open(path)?;
                    apply_resource_limits(&c, memory_limit, threads)?;
                    return Ok(c);
                }
            }
            return Err(first_err.into());
        }
    };
    apply_resource_limits(&conn, memory_limit, threads)?;
    Ok(conn)
}

fn apply_resource_limits(
    conn: &duckdb::Connection,
    memory_limit: &str,
    threads: u32,
) -> StorageResult<()> {
    conn.execute_batch(&format!(
        "PRAGMA memory_limit='{}'; PRAGMA threads={};",
        memory_limit, threads
    ))?;
    Ok(())
}
