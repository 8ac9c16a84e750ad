// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// echeque-security — Signing primitives and durable storage.
//
// Builds the canonical signing string of a check, binds it to the holder PIN
// with SHA-256, and provides the key-value persistence port (SQLite and
// in-memory) that the ledger snapshots into.

pub mod canonical;
pub mod integrity;
pub mod storage;

pub use canonical::{CanonicalFields, canonicalize, canonicalize_record};
pub use integrity::{is_signature_hex, sign, verify_signature};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
