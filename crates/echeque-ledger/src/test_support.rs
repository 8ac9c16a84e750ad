// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the ledger crate's tests.

use chrono::{NaiveDate, TimeZone, Utc};
use echeque_core::CheckRecord;
use echeque_core::numerals::CURRENCY_SUFFIX;

use crate::issuance::{CheckDraft, sign_terms};

/// A complete draft drawn on Bank of Khartoum.
pub fn draft(check_number: &str, amount: &str, pin: &str) -> CheckDraft {
    CheckDraft {
        check_number: check_number.into(),
        issuer_name: "خولة عبدالله الطيب".into(),
        issuer_account: "1002003004".into(),
        beneficiary_name: "رنا صلاح محمد علي".into(),
        amount: amount.into(),
        issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        bank_name: "بنك الخرطوم".into(),
        branch_name: String::new(),
        security_pin: pin.into(),
    }
}

pub fn record_with_pin(check_number: &str, amount: &str, pin: &str) -> CheckRecord {
    let terms = draft(check_number, amount, pin)
        .validate(CURRENCY_SUFFIX)
        .unwrap();
    let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    sign_terms(terms, issued_at).unwrap()
}

pub fn record(check_number: &str, amount: &str) -> CheckRecord {
    record_with_pin(check_number, amount, "1234")
}
