// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verifier — single-shot classification of a holder's claim.
//
// Under the default `PinOnly` policy the supplied PIN is compared with the
// stored one and the stored signature is not re-derived: a record edited in
// storage still verifies.  `RecomputeSignature` closes that gap by
// re-signing the stored fields with the supplied PIN.

use chrono::{DateTime, Utc};
use echeque_core::config::VerificationPolicy;
use echeque_core::error::{Result, ValidationError};
use echeque_core::human_errors::{self, HumanError};
use echeque_core::CheckRecord;
use echeque_security::{KeyValueStore, canonicalize_record, verify_signature};

use crate::ledger::Ledger;

/// A check that passed verification.  `verified_at` is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedCheck {
    pub record: CheckRecord,
    pub verified_at: DateTime<Utc>,
}

/// Result of checking a (check number, PIN) claim.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// No check with that number exists.
    NotFound,
    /// The check exists but the PIN differs.
    SecretMismatch,
    /// PIN matches but the stored fields no longer produce the stored
    /// signature.  Only reported under `RecomputeSignature`.
    SignatureMismatch,
    Valid(VerifiedCheck),
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Short machine-readable label for logs and responses.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::SecretMismatch => "secret_mismatch",
            Self::SignatureMismatch => "signature_mismatch",
            Self::Valid(_) => "valid",
        }
    }

    /// What to tell the holder when verification failed.
    pub fn human_message(&self) -> Option<HumanError> {
        match self {
            Self::NotFound => Some(human_errors::check_not_found()),
            Self::SecretMismatch => Some(human_errors::pin_mismatch()),
            Self::SignatureMismatch => Some(human_errors::signature_mismatch()),
            Self::Valid(_) => None,
        }
    }
}

/// Classify a claim against the ledger.
///
/// Blank input is a validation error rather than an outcome.
pub fn verify<S: KeyValueStore>(
    ledger: &Ledger<S>,
    check_number: &str,
    supplied_pin: &str,
    policy: VerificationPolicy,
    now: DateTime<Utc>,
) -> Result<VerificationOutcome> {
    if check_number.trim().is_empty() {
        return Err(ValidationError::MissingField("checkNumber").into());
    }
    if supplied_pin.trim().is_empty() {
        return Err(ValidationError::MissingField("securityPin").into());
    }

    let Some(record) = ledger.lookup(check_number) else {
        return Ok(VerificationOutcome::NotFound);
    };

    if !record.security_pin.matches(supplied_pin) {
        return Ok(VerificationOutcome::SecretMismatch);
    }

    if policy == VerificationPolicy::RecomputeSignature {
        let canonical = canonicalize_record(record)?;
        if !verify_signature(&canonical, supplied_pin, &record.signature) {
            return Ok(VerificationOutcome::SignatureMismatch);
        }
    }

    Ok(VerificationOutcome::Valid(VerifiedCheck {
        record: record.clone(),
        verified_at: now,
    }))
}
