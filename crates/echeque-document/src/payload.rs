// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verification payload — the text embedded in a check's scan code.
//
// Wire format (compact JSON, keys in this order):
//
//   {"checkNumber":"000123","signature":"<64 hex>","timestamp":"<RFC 3339>","country":"Sudan"}
//
// Amount, names, and the PIN are not carried: a photographed code
// reveals nothing beyond what is needed to look the check up.

use chrono::{DateTime, Utc};
use echeque_core::error::{EchequeError, Result};
use echeque_core::{CheckNumber, CheckRecord};
use echeque_security::is_signature_hex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The minimal field set carried by a scan code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationPayload {
    #[serde(rename = "checkNumber")]
    pub check_number: CheckNumber,
    pub signature: String,
    #[serde(rename = "timestamp", with = "echeque_core::timestamp")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "country")]
    pub jurisdiction: String,
}

impl VerificationPayload {
    pub fn from_record(record: &CheckRecord, jurisdiction: &str) -> Self {
        Self {
            check_number: record.check_number.clone(),
            signature: record.signature.clone(),
            issued_at: record.issued_at,
            jurisdiction: jurisdiction.to_owned(),
        }
    }

    /// Whether this payload was produced from `record`.
    pub fn describes(&self, record: &CheckRecord) -> bool {
        self.check_number == record.check_number
            && self.signature == record.signature
            && self.issued_at == record.issued_at
    }
}

/// Build the scan code text for `record`.  Same record, same bytes.
pub fn encode(record: &CheckRecord, jurisdiction: &str) -> Result<String> {
    Ok(serde_json::to_string(&VerificationPayload::from_record(
        record,
        jurisdiction,
    ))?)
}

/// Parse scanned text back into a payload.
///
/// Malformed JSON, missing or extra fields, a signature that is not 64
/// lowercase hex characters, and an unparsable timestamp are all reported as
/// `EchequeError::Encoding`.
pub fn decode(raw: &str) -> Result<VerificationPayload> {
    let payload: VerificationPayload = serde_json::from_str(raw.trim())
        .map_err(|e| EchequeError::Encoding(e.to_string()))?;

    if !is_signature_hex(&payload.signature) {
        return Err(EchequeError::Encoding(format!(
            "signature is not a SHA-256 hex digest: {:?}",
            payload.signature
        )));
    }
    if payload.jurisdiction.trim().is_empty() {
        return Err(EchequeError::Encoding("country tag is empty".into()));
    }

    debug!(check_number = %payload.check_number, "payload decoded");
    Ok(payload)
}
