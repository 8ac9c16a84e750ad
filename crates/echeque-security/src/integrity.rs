// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Check integrity — SHA-256 signatures binding a canonical string to a PIN.
//
// LIMITATION: the PIN has only 10^4 values.  Anyone holding a canonical
// string and its signature can recover the PIN by trying them all.  The PIN
// is a low-friction shared check between issuer and holder, not a key, and
// the issuer (who knows it) can always produce a valid signature.

use echeque_core::SecurityPin;
use sha2::{Digest, Sha256};

/// Sign a canonical string: `hex(SHA-256(canonical ‖ pin))`.
///
/// Deterministic; no keying material other than the PIN is involved.
pub fn sign(canonical: &str, pin: &SecurityPin) -> String {
    sign_raw(canonical, pin.as_str())
}

/// Recompute the signature with a holder-supplied PIN and compare it with
/// the stored one.
pub fn verify_signature(canonical: &str, supplied_pin: &str, expected_hex: &str) -> bool {
    sign_raw(canonical, supplied_pin) == expected_hex
}

/// Whether `candidate` has the shape of a signature (64 lowercase hex chars).
pub fn is_signature_hex(candidate: &str) -> bool {
    candidate.len() == 64
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn sign_raw(canonical: &str, pin: &str) -> String {
    sha256_hex(&[canonical.as_bytes(), pin.as_bytes()])
}

/// Lowercase hex SHA-256 over the concatenation of `parts`.
fn sha256_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SHA-256 of the empty byte slice (well-known constant).
    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn pin(s: &str) -> SecurityPin {
        SecurityPin::new(s).unwrap()
    }

    #[test]
    fn hash_empty_input() {
        assert_eq!(sha256_hex(&[]), EMPTY_SHA256);
        assert_eq!(sha256_hex(&["".as_bytes(), "".as_bytes()]), EMPTY_SHA256);
    }

    #[test]
    fn hash_known_value() {
        // SHA-256("hello"), as printed by coreutils sha256sum.
        let expected = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
        assert_eq!(sha256_hex(&["hello".as_bytes()]), expected);
        assert_eq!(sha256_hex(&["he".as_bytes(), "llo".as_bytes()]), expected);
    }

    #[test]
    fn signature_is_hash_of_concatenation() {
        let canonical = r#"{"checkNumber":"1"}"#;
        let expected = sha256_hex(&[format!("{canonical}1234").as_bytes()]);
        assert_eq!(sign(canonical, &pin("1234")), expected);
    }

    #[test]
    fn signing_is_deterministic() {
        let a = sign("same input", &pin("0420"));
        let b = sign("same input", &pin("0420"));
        assert_eq!(a, b);
        assert!(is_signature_hex(&a));
    }

    #[test]
    fn pin_changes_signature() {
        assert_ne!(sign("input", &pin("1234")), sign("input", &pin("1235")));
    }

    #[test]
    fn verify_with_right_and_wrong_pin() {
        let sig = sign("input", &pin("1234"));
        assert!(verify_signature("input", "1234", &sig));
        assert!(!verify_signature("input", "0000", &sig));
        assert!(!verify_signature("input!", "1234", &sig));
    }

    #[test]
    fn signature_shape() {
        assert!(is_signature_hex(EMPTY_SHA256));
        assert!(!is_signature_hex(&EMPTY_SHA256.to_uppercase()));
        assert!(!is_signature_hex("abc"));
        assert!(!is_signature_hex(&"g".repeat(64)));
    }
}
