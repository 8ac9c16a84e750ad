// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Check ledger — the ordered collection of every issued check.
//
// The whole ledger is stored as one JSON array under a single key and
// rewritten in full on every append.  The new snapshot is written before it
// is committed in memory, so a failed write changes nothing.
//
// Single writer: two processes appending to the same store race, and the
// later snapshot silently replaces the earlier one.

use echeque_core::error::{Result, ValidationError};
use echeque_core::CheckRecord;
use echeque_security::KeyValueStore;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument};

/// Totals shown alongside the check history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub total_checks: usize,
    pub active_checks: usize,
    pub total_amount: Decimal,
}

/// Append-only check register persisted through a `KeyValueStore`.
pub struct Ledger<S> {
    store: S,
    key: String,
    records: Vec<CheckRecord>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the snapshot stored under `key`; nothing stored means an empty
    /// ledger.
    #[instrument(skip_all, fields(key = %key.as_ref()))]
    pub fn open(store: S, key: impl AsRef<str>) -> Result<Self> {
        let key = key.as_ref().to_owned();
        let records: Vec<CheckRecord> = match store.get(&key)? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };

        info!(count = records.len(), "ledger loaded");
        Ok(Self {
            store,
            key,
            records,
        })
    }

    /// Add a record and durably rewrite the snapshot.
    ///
    /// Rejects a check number that is already present.
    #[instrument(skip_all, fields(check_number = %record.check_number))]
    pub fn append(&mut self, record: CheckRecord) -> Result<&CheckRecord> {
        if self.lookup(record.check_number.as_str()).is_some() {
            return Err(ValidationError::DuplicateCheckNumber(record.check_number.to_string()).into());
        }

        let snapshot = serde_json::to_vec(&Appended {
            existing: &self.records,
            new: &record,
        })?;
        self.store.set(&self.key, &snapshot)?;

        self.records.push(record);
        debug!(count = self.records.len(), bytes = snapshot.len(), "snapshot written");
        Ok(&self.records[self.records.len() - 1])
    }

    /// First record with this check number.  Surrounding whitespace in
    /// `check_number` is ignored, matching how numbers are stored.
    pub fn lookup(&self, check_number: &str) -> Option<&CheckRecord> {
        let wanted = check_number.trim();
        self.records
            .iter()
            .find(|record| record.check_number == *wanted)
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[CheckRecord] {
        &self.records
    }

    /// Newest first.
    pub fn recent(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().rev()
    }

    pub fn total_amount(&self) -> Decimal {
        self.records.iter().map(|record| record.amount.value()).sum()
    }

    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&CheckRecord) -> bool,
    {
        self.records.iter().filter(|&record| predicate(record)).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            total_checks: self.len(),
            active_checks: self.count(CheckRecord::is_active),
            total_amount: self.total_amount(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Existing records followed by one new record, serialized as one array.
struct Appended<'a> {
    existing: &'a [CheckRecord],
    new: &'a CheckRecord,
}

impl Serialize for Appended<'_> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.existing.iter().chain(std::iter::once(self.new)))
    }
}
