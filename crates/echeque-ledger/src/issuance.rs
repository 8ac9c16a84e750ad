// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Issuance — from typed-in form fields to a signed check record.
//
//   CheckDraft --validate--> CheckTerms --sign_terms--> CheckRecord
//
// Validation happens first and completely; nothing is hashed for a draft
// that is going to be rejected.

use chrono::{DateTime, NaiveDate, Utc};
use echeque_core::error::{Result, ValidationError};
use echeque_core::numerals;
use echeque_core::{Amount, Bank, CheckNumber, CheckRecord, CheckTerms, SecurityPin, timestamp};
use echeque_security::{CanonicalFields, canonicalize, sign};

/// Raw issuance input, exactly as entered on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDraft {
    pub check_number: String,
    pub issuer_name: String,
    pub issuer_account: String,
    pub beneficiary_name: String,
    /// Figures, e.g. `"1500"` or `"99.50"`.
    pub amount: String,
    pub issue_date: NaiveDate,
    /// Official Arabic bank name.
    pub bank_name: String,
    /// Optional; blank means no branch.
    pub branch_name: String,
    pub security_pin: String,
}

impl CheckDraft {
    /// Check every field and derive the amount in words.
    ///
    /// Required fields are checked before formats, so an incomplete form is
    /// always reported as incomplete.
    pub fn validate(&self, currency_suffix: &str) -> std::result::Result<CheckTerms, ValidationError> {
        let required = [
            ("checkNumber", &self.check_number),
            ("issuerName", &self.issuer_name),
            ("issuerAccount", &self.issuer_account),
            ("beneficiaryName", &self.beneficiary_name),
            ("amount", &self.amount),
            ("bankName", &self.bank_name),
            ("securityPin", &self.security_pin),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        let security_pin = SecurityPin::new(self.security_pin.clone())?;
        let amount = Amount::parse(&self.amount)?;
        let bank_name: Bank = self.bank_name.parse()?;

        let words = numerals::to_words(amount.whole_units());
        let branch = self.branch_name.trim();

        Ok(CheckTerms {
            check_number: CheckNumber::new(self.check_number.clone())?,
            issuer_name: self.issuer_name.clone(),
            issuer_account: self.issuer_account.clone(),
            beneficiary_name: self.beneficiary_name.clone(),
            amount,
            amount_in_words: numerals::with_currency(&words, currency_suffix),
            issue_date: self.issue_date,
            bank_name,
            branch_name: (!branch.is_empty()).then(|| self.branch_name.clone()),
            security_pin,
        })
    }
}

/// Stamp validated terms with `issued_at` and sign them.
///
/// `issued_at` is truncated to milliseconds so that the stored, signed, and
/// scanned forms of the timestamp are identical.
pub fn sign_terms(terms: CheckTerms, issued_at: DateTime<Utc>) -> Result<CheckRecord> {
    let issued_at = timestamp::truncate(issued_at);
    let canonical = canonicalize(&CanonicalFields::from_terms(&terms, &issued_at))?;
    let signature = sign(&canonical, &terms.security_pin);
    Ok(CheckRecord::from_terms(terms, issued_at, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::draft;
    use chrono::TimeZone;
    use echeque_core::numerals::CURRENCY_SUFFIX;
    use echeque_security::canonicalize_record;

    #[test]
    fn amount_in_words_is_derived() {
        let terms = draft("1", "1500", "1234").validate(CURRENCY_SUFFIX).unwrap();
        assert_eq!(terms.amount_in_words, "ألف وخمسمائة جنيه سوداني");
    }

    #[test]
    fn fraction_is_dropped_from_words_but_kept_in_amount() {
        let terms = draft("1", "1500.75", "1234").validate(CURRENCY_SUFFIX).unwrap();
        assert_eq!(terms.amount_in_words, "ألف وخمسمائة جنيه سوداني");
        assert_eq!(terms.amount.to_string(), "1500.75");
    }

    #[test]
    fn missing_fields_reported_first() {
        let mut d = draft("1", "100", "12");
        d.beneficiary_name = "  ".into();
        assert_eq!(
            d.validate(CURRENCY_SUFFIX),
            Err(ValidationError::MissingField("beneficiaryName"))
        );

        let mut d = draft("1", "100", "1234");
        d.security_pin.clear();
        assert_eq!(
            d.validate(CURRENCY_SUFFIX),
            Err(ValidationError::MissingField("securityPin"))
        );
    }

    #[test]
    fn branch_is_optional() {
        let mut d = draft("1", "100", "1234");
        d.branch_name = "   ".into();
        assert_eq!(d.validate(CURRENCY_SUFFIX).unwrap().branch_name, None);

        d.branch_name = "أم درمان".into();
        assert_eq!(
            d.validate(CURRENCY_SUFFIX).unwrap().branch_name.as_deref(),
            Some("أم درمان")
        );
    }

    #[test]
    fn pin_amount_and_bank_formats() {
        assert_eq!(
            draft("1", "100", "123").validate(CURRENCY_SUFFIX),
            Err(ValidationError::PinLength(3))
        );
        assert_eq!(
            draft("1", "100", "12ab").validate(CURRENCY_SUFFIX),
            Err(ValidationError::PinNotNumeric)
        );
        assert_eq!(
            draft("1", "0", "1234").validate(CURRENCY_SUFFIX),
            Err(ValidationError::AmountNotPositive)
        );
        assert!(matches!(
            draft("1", "1,500", "1234").validate(CURRENCY_SUFFIX),
            Err(ValidationError::InvalidAmount(_))
        ));

        let mut d = draft("1", "100", "1234");
        d.bank_name = "Bank of Mars".into();
        assert!(matches!(
            d.validate(CURRENCY_SUFFIX),
            Err(ValidationError::UnknownBank(_))
        ));
    }

    #[test]
    fn signature_reproduces_from_stored_record() {
        let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let terms = draft("1", "1500", "1234").validate(CURRENCY_SUFFIX).unwrap();
        let record = sign_terms(terms, issued_at).unwrap();

        let canonical = canonicalize_record(&record).unwrap();
        assert_eq!(sign(&canonical, &record.security_pin), record.signature);
    }

    #[test]
    fn same_inputs_same_signature() {
        let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let a = sign_terms(draft("1", "100", "1234").validate(CURRENCY_SUFFIX).unwrap(), issued_at).unwrap();
        let b = sign_terms(draft("1", "100", "1234").validate(CURRENCY_SUFFIX).unwrap(), issued_at).unwrap();
        assert_eq!(a.signature, b.signature);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn amount_change_changes_signature() {
        let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let a = sign_terms(draft("1", "100", "1234").validate(CURRENCY_SUFFIX).unwrap(), issued_at).unwrap();
        let b = sign_terms(draft("1", "100.01", "1234").validate(CURRENCY_SUFFIX).unwrap(), issued_at).unwrap();
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn issued_at_is_truncated_to_millis() {
        let precise = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(1_234_567);
        let record = sign_terms(draft("1", "100", "1234").validate(CURRENCY_SUFFIX).unwrap(), precise).unwrap();
        assert_eq!(
            timestamp::format(&record.issued_at),
            "2026-03-01T09:30:00.001Z"
        );
        assert_eq!(timestamp::parse("2026-03-01T09:30:00.001Z").unwrap(), record.issued_at);
    }
}
