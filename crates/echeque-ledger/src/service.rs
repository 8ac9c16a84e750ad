// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Check service — the issuer- and holder-facing operations over one ledger.
//
// Owns the ledger and the active `AppConfig`.  Every operation is a single
// synchronous request/response; the caller decides where the store lives.

use chrono::{DateTime, Utc};
use echeque_core::config::AppConfig;
use echeque_core::error::{Result, ValidationError};
use echeque_core::timestamp;
use echeque_core::CheckRecord;
use echeque_document::payload;
use echeque_security::KeyValueStore;
use tracing::{info, instrument, warn};

use crate::issuance::{CheckDraft, sign_terms};
use crate::ledger::{Ledger, LedgerSummary};
use crate::verifier::{self, VerificationOutcome};

/// A freshly issued check and the text for its scan code.
#[derive(Debug, Clone, PartialEq)]
pub struct Issuance {
    pub record: CheckRecord,
    pub payload: String,
}

/// Verification result plus, on success, the re-encoded scan code text.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub outcome: VerificationOutcome,
    pub payload: Option<String>,
}

pub struct CheckService<S> {
    ledger: Ledger<S>,
    config: AppConfig,
}

impl<S: KeyValueStore> CheckService<S> {
    /// Load the ledger stored under `config.storage_key`.
    pub fn open(store: S, config: AppConfig) -> Result<Self> {
        let ledger = Ledger::open(store, &config.storage_key)?;
        Ok(Self { ledger, config })
    }

    pub fn issue(&mut self, draft: &CheckDraft) -> Result<Issuance> {
        self.issue_at(draft, timestamp::now())
    }

    /// Validate, sign and record a check issued at `issued_at`.
    ///
    /// A duplicate check number is rejected before anything is signed.
    #[instrument(skip_all, fields(check_number = %draft.check_number.trim()))]
    pub fn issue_at(&mut self, draft: &CheckDraft, issued_at: DateTime<Utc>) -> Result<Issuance> {
        let terms = draft.validate(&self.config.currency_suffix)?;
        if self.ledger.lookup(terms.check_number.as_str()).is_some() {
            warn!("check number already issued");
            return Err(ValidationError::DuplicateCheckNumber(terms.check_number.to_string()).into());
        }

        let record = sign_terms(terms, issued_at)?;
        let payload = payload::encode(&record, &self.config.jurisdiction)?;
        let record = self.ledger.append(record)?.clone();

        info!(
            amount = %record.amount,
            bank = record.bank_name.name(),
            issued_at = %timestamp::format(&record.issued_at),
            "check issued"
        );
        Ok(Issuance { record, payload })
    }

    pub fn verify(&self, check_number: &str, supplied_pin: &str) -> Result<Verification> {
        self.verify_at(check_number, supplied_pin, Utc::now())
    }

    #[instrument(skip_all, fields(check_number = %check_number.trim()))]
    pub fn verify_at(
        &self,
        check_number: &str,
        supplied_pin: &str,
        now: DateTime<Utc>,
    ) -> Result<Verification> {
        let outcome = verifier::verify(
            &self.ledger,
            check_number,
            supplied_pin,
            self.config.verification_policy,
            now,
        )?;

        let payload = match &outcome {
            VerificationOutcome::Valid(verified) => {
                Some(payload::encode(&verified.record, &self.config.jurisdiction)?)
            }
            _ => None,
        };

        info!(outcome = outcome.label(), "verification finished");
        Ok(Verification { outcome, payload })
    }

    pub fn lookup(&self, check_number: &str) -> Option<&CheckRecord> {
        self.ledger.lookup(check_number)
    }

    /// Issued checks, newest first.
    pub fn history(&self) -> impl Iterator<Item = &CheckRecord> {
        self.ledger.recent()
    }

    pub fn summary(&self) -> LedgerSummary {
        self.ledger.summary()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }
}
