// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Durable key-value storage for the check ledger.
//
// The ledger writes its whole snapshot under one key on every append, so the
// port only needs `get` and `set`.  The SQLite store performs each `set` as a
// single upsert statement: a crash mid-write leaves the previous value.
//
// Schema:
//   kv(
//     key        TEXT PRIMARY KEY,
//     value      BLOB NOT NULL,
//     updated_at TEXT NOT NULL     -- RFC 3339
//   )

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use echeque_core::error::{EchequeError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, instrument};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS kv (
        key        TEXT PRIMARY KEY,
        value      BLOB NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

/// Convert a `rusqlite::Error` into an `EchequeError::Database`.
fn db_err(e: rusqlite::Error) -> EchequeError {
    EchequeError::Database(e.to_string())
}

/// Persistence port used by the ledger.
pub trait KeyValueStore {
    /// Read the bytes stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace whatever is stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Key-value store backed by a SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(db_err)?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        info!("key-value store opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory key-value store opened");
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_err)
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(db_err)?;

        debug!("value stored");
        Ok(())
    }
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("checks").unwrap(), None);

        store.set("checks", b"[1]").unwrap();
        assert_eq!(store.get("checks").unwrap().as_deref(), Some(&b"[1]"[..]));

        store.set("checks", b"[1,2]").unwrap();
        assert_eq!(store.get("checks").unwrap().as_deref(), Some(&b"[1,2]"[..]));

        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn memory_store_overwrites() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn sqlite_store_overwrites() {
        let mut store = SqliteStore::open_in_memory().expect("open in-memory store");
        exercise(&mut store);
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("checks.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set("checks", "[\"شيك\"]".as_bytes()).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("checks").unwrap().as_deref(),
            Some("[\"شيك\"]".as_bytes())
        );
    }
}
