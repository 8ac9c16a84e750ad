// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::numerals::CURRENCY_SUFFIX;

/// Key under which the whole ledger snapshot is stored.
pub const DEFAULT_STORAGE_KEY: &str = "sudaneseElectronicChecks";

/// Jurisdiction tag embedded in every verification payload.
pub const DEFAULT_JURISDICTION: &str = "Sudan";

/// Edge length of the rendered scan code, in pixels.
pub const DEFAULT_SCAN_CODE_SIZE_PX: u32 = 250;

/// How strictly a holder's claim is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPolicy {
    /// Compare the supplied PIN with the stored one.  The stored signature
    /// is not re-derived, so edits to other stored fields go unnoticed.
    #[default]
    PinOnly,
    /// Additionally recompute the signature from the stored fields and the
    /// supplied PIN, and reject the check if it differs from the stored one.
    RecomputeSignature,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage key holding the JSON array of all issued checks.
    pub storage_key: String,
    /// Country tag written into verification payloads.
    pub jurisdiction: String,
    /// Currency name appended to the amount in words.
    pub currency_suffix: String,
    /// Verification strictness.
    pub verification_policy: VerificationPolicy,
    /// Requested scan code size (square, pixels).
    pub scan_code_size_px: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            jurisdiction: DEFAULT_JURISDICTION.to_owned(),
            currency_suffix: CURRENCY_SUFFIX.to_owned(),
            verification_policy: VerificationPolicy::PinOnly,
            scan_code_size_px: DEFAULT_SCAN_CODE_SIZE_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"verification_policy":"recompute_signature"}"#).unwrap();
        assert_eq!(config.verification_policy, VerificationPolicy::RecomputeSignature);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.jurisdiction, "Sudan");
        assert_eq!(config.scan_code_size_px, 250);
    }
}
