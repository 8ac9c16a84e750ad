// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// echeque-ledger — Check issuance, the persisted check ledger, and holder
// verification.

pub mod issuance;
pub mod ledger;
pub mod service;
pub mod verifier;

#[cfg(test)]
mod test_support;

pub use issuance::{CheckDraft, sign_terms};
pub use ledger::{Ledger, LedgerSummary};
pub use service::{CheckService, Issuance, Verification};
pub use verifier::{VerificationOutcome, VerifiedCheck, verify};
