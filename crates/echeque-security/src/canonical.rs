// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canonical signing string for a check.
//
// Format: a compact JSON object whose keys appear in this fixed order:
//
//   checkNumber, issuerName, issuerAccount, beneficiaryName, amount,
//   amountInWords, issueDate, bankName, branchName, securityPin, issuedAt
//
// Value forms:
//   amount      normalised decimal string, no exponent, no trailing
//               fractional zeros ("100.00" -> "100")
//   issueDate   YYYY-MM-DD
//   bankName    official Arabic name
//   branchName  "" when absent
//   issuedAt    RFC 3339 UTC with milliseconds, "Z" suffix
//
// Strings are JSON-escaped verbatim, so whitespace-only edits change the
// output and no two field tuples can collide.

use chrono::{DateTime, Utc};
use echeque_core::error::Result;
use echeque_core::{CheckRecord, CheckTerms, timestamp};
use serde::Serialize;

/// Borrowed view of everything a signature covers.  Field order here is the
/// serialization order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalFields<'a> {
    check_number: &'a str,
    issuer_name: &'a str,
    issuer_account: &'a str,
    beneficiary_name: &'a str,
    amount: String,
    amount_in_words: &'a str,
    issue_date: String,
    bank_name: &'static str,
    branch_name: &'a str,
    security_pin: &'a str,
    issued_at: String,
}

impl<'a> CanonicalFields<'a> {
    /// Fields of a check that is about to be signed.
    pub fn from_terms(terms: &'a CheckTerms, issued_at: &DateTime<Utc>) -> Self {
        Self {
            check_number: terms.check_number.as_str(),
            issuer_name: &terms.issuer_name,
            issuer_account: &terms.issuer_account,
            beneficiary_name: &terms.beneficiary_name,
            amount: terms.amount.canonical_string(),
            amount_in_words: &terms.amount_in_words,
            issue_date: terms.issue_date.format("%Y-%m-%d").to_string(),
            bank_name: terms.bank_name.name(),
            branch_name: terms.branch_name.as_deref().unwrap_or(""),
            security_pin: terms.security_pin.as_str(),
            issued_at: timestamp::format(issued_at),
        }
    }

    /// Fields of a stored check; `signature`, `status` and `id` are excluded.
    pub fn from_record(record: &'a CheckRecord) -> Self {
        Self {
            check_number: record.check_number.as_str(),
            issuer_name: &record.issuer_name,
            issuer_account: &record.issuer_account,
            beneficiary_name: &record.beneficiary_name,
            amount: record.amount.canonical_string(),
            amount_in_words: &record.amount_in_words,
            issue_date: record.issue_date.format("%Y-%m-%d").to_string(),
            bank_name: record.bank_name.name(),
            branch_name: record.branch_name.as_deref().unwrap_or(""),
            security_pin: record.security_pin.as_str(),
            issued_at: timestamp::format(&record.issued_at),
        }
    }
}

/// Serialize the fields into the canonical string.
pub fn canonicalize(fields: &CanonicalFields<'_>) -> Result<String> {
    Ok(serde_json::to_string(fields)?)
}

/// Canonical string of a stored record.
pub fn canonicalize_record(record: &CheckRecord) -> Result<String> {
    canonicalize(&CanonicalFields::from_record(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrity::sign;
    use chrono::{NaiveDate, TimeZone};
    use echeque_core::{Amount, Bank, CheckNumber, SecurityPin};

    fn terms() -> CheckTerms {
        CheckTerms {
            check_number: CheckNumber::new("000123").unwrap(),
            issuer_name: "Khawla".into(),
            issuer_account: "1002003004".into(),
            beneficiary_name: "Rana".into(),
            amount: Amount::parse("100").unwrap(),
            amount_in_words: "مائة جنيه سوداني".into(),
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            bank_name: Bank::Nilein,
            branch_name: None,
            security_pin: SecurityPin::new("1234").unwrap(),
        }
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn canonical(terms: &CheckTerms) -> String {
        canonicalize(&CanonicalFields::from_terms(terms, &issued_at())).unwrap()
    }

    #[test]
    fn exact_field_order_and_forms() {
        let expected = concat!(
            r#"{"checkNumber":"000123","issuerName":"Khawla","issuerAccount":"1002003004","#,
            r#""beneficiaryName":"Rana","amount":"100","amountInWords":"مائة جنيه سوداني","#,
            r#""issueDate":"2026-03-01","bankName":"بنك النيلين","branchName":"","#,
            r#""securityPin":"1234","issuedAt":"2026-03-01T09:30:00.000Z"}"#,
        );
        assert_eq!(canonical(&terms()), expected);
    }

    #[test]
    fn terms_and_record_canonicalize_identically() {
        let t = terms();
        let from_terms = canonical(&t);
        let record = CheckRecord::from_terms(t, issued_at(), "ff".repeat(32));
        assert_eq!(canonicalize_record(&record).unwrap(), from_terms);
    }

    #[test]
    fn signature_and_id_are_not_covered() {
        let mut a = CheckRecord::from_terms(terms(), issued_at(), "aa".repeat(32));
        let b = CheckRecord::from_terms(terms(), issued_at(), "bb".repeat(32));
        a.id = b.id;
        assert_ne!(a.signature, b.signature);
        assert_eq!(canonicalize_record(&a).unwrap(), canonicalize_record(&b).unwrap());
    }

    #[test]
    fn every_field_is_covered() {
        let base = terms();
        let pin = SecurityPin::new("1234").unwrap();
        let base_sig = sign(&canonical(&base), &pin);

        let mut variants: Vec<CheckTerms> = Vec::new();
        let mut t = base.clone();
        t.check_number = CheckNumber::new("000124").unwrap();
        variants.push(t);
        let mut t = base.clone();
        t.issuer_name.push(' ');
        variants.push(t);
        let mut t = base.clone();
        t.issuer_account = "1002003005".into();
        variants.push(t);
        let mut t = base.clone();
        t.beneficiary_name = " Rana".into();
        variants.push(t);
        let mut t = base.clone();
        t.amount = Amount::parse("100.01").unwrap();
        variants.push(t);
        let mut t = base.clone();
        t.amount_in_words.push('.');
        variants.push(t);
        let mut t = base.clone();
        t.issue_date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        variants.push(t);
        let mut t = base.clone();
        t.bank_name = Bank::Khartoum;
        variants.push(t);
        let mut t = base.clone();
        t.branch_name = Some("Bahri".into());
        variants.push(t);
        let mut t = base.clone();
        t.security_pin = SecurityPin::new("4321").unwrap();
        variants.push(t);

        for variant in &variants {
            assert_ne!(sign(&canonical(variant), &pin), base_sig, "{variant:?}");
        }

        let later = issued_at() + chrono::Duration::milliseconds(1);
        let shifted = canonicalize(&CanonicalFields::from_terms(&base, &later)).unwrap();
        assert_ne!(sign(&shifted, &pin), base_sig);
    }

    #[test]
    fn equal_amounts_in_different_notation_agree() {
        let mut a = terms();
        a.amount = Amount::parse("100.00").unwrap();
        assert_eq!(canonical(&a), canonical(&terms()));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let mut a = terms();
        a.issuer_name = "ab".into();
        a.issuer_account = "c".into();
        let mut b = terms();
        b.issuer_name = "a".into();
        b.issuer_account = "bc".into();
        assert_ne!(canonical(&a), canonical(&b));
    }
}
