// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for check issuers and holders.
//
// Every technical error and every failed verification maps to a plain
// message with a suggestion.  Where the check desk has an established Arabic
// wording it is carried alongside the English text.

use crate::error::{EchequeError, ValidationError};

/// Severity of a failure from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something went wrong locally; trying again may help.
    Transient,
    /// The user must correct what they typed.
    ActionRequired,
    /// Retrying with the same input will not help.
    Permanent,
}

/// A message ready for display.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// Arabic wording shown at the check desk, when one exists.
    pub message_ar: Option<String>,
    /// What the user should try.
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

const FILL_REQUIRED_AR: &str = "الرجاء ملء جميع الحقول المطلوبة";
const PIN_FORMAT_AR: &str = "رمز الأمان يجب أن يكون 4 أرقام";
const NOT_FOUND_AR: &str = "الشيك غير موجود";
const PIN_WRONG_AR: &str = "رمز الأمان غير صحيح";

pub fn humanize_error(err: &EchequeError) -> HumanError {
    match err {
        EchequeError::Validation(v) => humanize_validation(v),

        EchequeError::Encoding(_) => HumanError {
            message: "This code couldn't be read as a check.".into(),
            message_ar: None,
            suggestion: "Make sure you scanned the code printed on the check, then try again.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        EchequeError::Render(_) => HumanError {
            message: "The check's scan code couldn't be drawn.".into(),
            message_ar: None,
            suggestion: "The check was saved. Open it from the history to show the code again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        EchequeError::Database(_) => HumanError {
            message: "The check register had a storage problem.".into(),
            message_ar: None,
            suggestion: "Try again. Checks issued earlier are not affected.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        EchequeError::Io(io_err) if io_err.kind() == std::io::ErrorKind::PermissionDenied => {
            HumanError {
                message: "The app doesn't have permission to use its data folder.".into(),
                message_ar: None,
                suggestion: "Check the folder permissions, or set XDG_DATA_HOME to a writable location.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            }
        }

        EchequeError::Io(_) => HumanError {
            message: "There was a problem reading or writing a file.".into(),
            message_ar: None,
            suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        EchequeError::Serialization(_) => HumanError {
            message: "The stored check register couldn't be read.".into(),
            message_ar: None,
            suggestion: "The register file may be damaged. Please report it before issuing new checks.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_validation(err: &ValidationError) -> HumanError {
    match err {
        ValidationError::MissingField(field) => HumanError {
            message: "Please fill in all required fields.".into(),
            message_ar: Some(FILL_REQUIRED_AR.into()),
            suggestion: format!("The field \"{field}\" is empty."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ValidationError::PinLength(_) | ValidationError::PinNotNumeric => HumanError {
            message: "The security PIN must be 4 digits.".into(),
            message_ar: Some(PIN_FORMAT_AR.into()),
            suggestion: "Enter exactly four numbers, for example 4821.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ValidationError::InvalidAmount(_)
        | ValidationError::AmountNotPositive
        | ValidationError::AmountTooLarge => HumanError {
            message: "The amount doesn't look right.".into(),
            message_ar: None,
            suggestion: "Enter the amount in figures, greater than zero, for example 1500 or 99.50.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ValidationError::UnknownBank(name) => HumanError {
            message: "That bank isn't on the list.".into(),
            message_ar: None,
            suggestion: format!("Choose one of the listed banks. (Got: {name})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ValidationError::DuplicateCheckNumber(number) => HumanError {
            message: "A check with this number was already issued.".into(),
            message_ar: None,
            suggestion: format!("Use the next number in the checkbook instead of {number}."),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

/// No check with the claimed number exists.
pub fn check_not_found() -> HumanError {
    HumanError {
        message: "This check doesn't exist.".into(),
        message_ar: Some(NOT_FOUND_AR.into()),
        suggestion: "Check the number printed on the check and try again.".into(),
        retriable: false,
        severity: Severity::ActionRequired,
    }
}

/// The check exists but the PIN was wrong.
pub fn pin_mismatch() -> HumanError {
    HumanError {
        message: "The security PIN is incorrect.".into(),
        message_ar: Some(PIN_WRONG_AR.into()),
        suggestion: "Ask the issuer to confirm the 4-digit PIN.".into(),
        retriable: false,
        severity: Severity::ActionRequired,
    }
}

/// The stored record no longer matches its signature.
pub fn signature_mismatch() -> HumanError {
    HumanError {
        message: "This check's details have been altered since it was issued.".into(),
        message_ar: None,
        suggestion: "Do not accept this check. Contact the issuing bank.".into(),
        retriable: false,
        severity: Severity::Permanent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_uses_desk_wording() {
        let err = EchequeError::Validation(ValidationError::MissingField("amount"));
        let human = humanize_error(&err);
        assert_eq!(human.message_ar.as_deref(), Some(FILL_REQUIRED_AR));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("amount"));
    }

    #[test]
    fn both_pin_errors_share_one_message() {
        let a = humanize_error(&ValidationError::PinLength(3).into());
        let b = humanize_error(&ValidationError::PinNotNumeric.into());
        assert_eq!(a.message, b.message);
        assert_eq!(a.message_ar.as_deref(), Some(PIN_FORMAT_AR));
    }

    #[test]
    fn storage_failure_is_transient() {
        let human = humanize_error(&EchequeError::Database("disk I/O error".into()));
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn duplicate_number_is_permanent() {
        let human = humanize_error(&ValidationError::DuplicateCheckNumber("7".into()).into());
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn verification_failures_are_distinct() {
        assert_ne!(check_not_found().message, pin_mismatch().message);
        assert_eq!(pin_mismatch().message_ar.as_deref(), Some(PIN_WRONG_AR));
    }
}
