// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for electronic checks.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Unique identifier for an issued check.
///
/// UUID v7, so identifiers assigned later sort after earlier ones.
///
/// Older snapshots stored a Unix-millisecond number instead; those load as
/// a v7 UUID carrying the same millisecond, so ordering is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawCheckId")]
pub struct CheckId(pub Uuid);

impl CheckId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_unix_millis(millis: u64) -> Self {
        Self(uuid::Builder::from_unix_timestamp_millis(millis, &[0; 10]).into_uuid())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCheckId {
    Uuid(Uuid),
    UnixMillis(u64),
}

impl From<RawCheckId> for CheckId {
    fn from(raw: RawCheckId) -> Self {
        match raw {
            RawCheckId::Uuid(uuid) => Self(uuid),
            RawCheckId::UnixMillis(millis) => Self::from_unix_millis(millis),
        }
    }
}

impl Default for CheckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The printed number of a check.  Never blank, never padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CheckNumber(String);

impl CheckNumber {
    /// Surrounding whitespace is dropped, so `" 42"` and `"42"` name the
    /// same check everywhere: storage, signing, lookup and the payload.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField("checkNumber"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CheckNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CheckNumber> for String {
    fn from(number: CheckNumber) -> Self {
        number.0
    }
}

impl PartialEq<str> for CheckNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for CheckNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of digits in a security PIN.
pub const PIN_LENGTH: usize = 4;

/// The 4-digit shared secret bound into a check's signature.
///
/// Ten thousand possible values: this is a low-friction holder check, not a
/// cryptographic key.  `Debug` never prints the digits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecurityPin(String);

impl SecurityPin {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let len = value.chars().count();
        if len != PIN_LENGTH {
            return Err(ValidationError::PinLength(len));
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::PinNotNumeric);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain string equality against a holder-supplied PIN.
    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied
    }
}

impl TryFrom<String> for SecurityPin {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SecurityPin> for String {
    fn from(pin: SecurityPin) -> Self {
        pin.0
    }
}

impl fmt::Debug for SecurityPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecurityPin(****)")
    }
}

/// A strictly positive currency amount.
///
/// # Invariant
/// The value is > 0 and its whole part fits in a `u64`, so it can always be
/// expanded into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::AmountNotPositive);
        }
        if value.floor().to_u64().is_none() {
            return Err(ValidationError::AmountTooLarge);
        }
        Ok(Self(value))
    }

    /// Parse user input such as `"1500"` or `" 99.95 "`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| ValidationError::InvalidAmount(trimmed.to_owned()))?;
        Self::new(value)
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Whole currency units; fractional subunits are dropped, not rounded.
    pub fn whole_units(&self) -> u64 {
        // Bounded by the constructor.
        self.0.floor().to_u64().unwrap_or(u64::MAX)
    }

    /// The single textual form used when signing: no exponent, no trailing
    /// fractional zeros (`100.00` and `100` both render as `100`).
    pub fn canonical_string(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Institutions a check may be drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Bank {
    Khartoum,
    FaisalIslamic,
    OmdurmanNational,
    Nilein,
    CentralBankOfSudan,
    SudaneseIndustrial,
    FarmersCommercial,
    SavingsAndSocialDevelopment,
    AlBaraka,
    TadamonIslamic,
    AnimalResources,
    SudaneseInvestment,
    CooperativeDevelopmentIslamic,
    QatarNational,
    AbuDhabiIslamic,
}

impl Bank {
    pub const ALL: [Bank; 15] = [
        Self::Khartoum,
        Self::FaisalIslamic,
        Self::OmdurmanNational,
        Self::Nilein,
        Self::CentralBankOfSudan,
        Self::SudaneseIndustrial,
        Self::FarmersCommercial,
        Self::SavingsAndSocialDevelopment,
        Self::AlBaraka,
        Self::TadamonIslamic,
        Self::AnimalResources,
        Self::SudaneseInvestment,
        Self::CooperativeDevelopmentIslamic,
        Self::QatarNational,
        Self::AbuDhabiIslamic,
    ];

    /// Official Arabic name; this is the form that is stored and signed.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Khartoum => "بنك الخرطوم",
            Self::FaisalIslamic => "بنك فيصل الإسلامي السوداني",
            Self::OmdurmanNational => "بنك أم درمان الوطني",
            Self::Nilein => "بنك النيلين",
            Self::CentralBankOfSudan => "بنك السودان المركزي",
            Self::SudaneseIndustrial => "المصرف الصناعي السوداني",
            Self::FarmersCommercial => "بنك المزارع التجاري",
            Self::SavingsAndSocialDevelopment => "بنك الإدخار والتنمية الاجتماعية",
            Self::AlBaraka => "بنك البركة السوداني",
            Self::TadamonIslamic => "بنك التضامن الإسلامي",
            Self::AnimalResources => "بنك الثروة الحيوانية والتعاوني",
            Self::SudaneseInvestment => "بنك الإستثمار السوداني",
            Self::CooperativeDevelopmentIslamic => "بنك التنمية التعاوني الإسلامي",
            Self::QatarNational => "بنك قطر الوطني - السودان",
            Self::AbuDhabiIslamic => "بنك أبو ظبي الإسلامي - السودان",
        }
    }
}

impl FromStr for Bank {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|bank| bank.name() == wanted)
            .ok_or_else(|| ValidationError::UnknownBank(wanted.to_owned()))
    }
}

impl TryFrom<String> for Bank {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Bank> for String {
    fn from(bank: Bank) -> Self {
        bank.name().to_owned()
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state of a check.  Issuance only ever produces `Active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Active,
}

/// Validated issuance input: everything the issuer chooses, before a
/// timestamp and signature are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckTerms {
    pub check_number: CheckNumber,
    pub issuer_name: String,
    pub issuer_account: String,
    pub beneficiary_name: String,
    pub amount: Amount,
    /// Derived from `amount`, never entered by hand.
    pub amount_in_words: String,
    pub issue_date: NaiveDate,
    pub bank_name: Bank,
    pub branch_name: Option<String>,
    pub security_pin: SecurityPin,
}

/// A complete issued check as stored in the ledger.
///
/// Records are immutable once appended; no operation edits or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecord {
    pub check_number: CheckNumber,
    pub issuer_name: String,
    pub issuer_account: String,
    pub beneficiary_name: String,
    pub amount: Amount,
    pub amount_in_words: String,
    pub issue_date: NaiveDate,
    pub bank_name: Bank,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub branch_name: Option<String>,
    pub security_pin: SecurityPin,
    /// Older snapshots call this `timestamp`.
    #[serde(with = "crate::timestamp", alias = "timestamp")]
    pub issued_at: DateTime<Utc>,
    /// Lowercase hex SHA-256 over the canonical string and the PIN.
    pub signature: String,
    #[serde(default)]
    pub status: CheckStatus,
    pub id: CheckId,
}

impl CheckRecord {
    /// Attach the issuance metadata to validated terms.
    pub fn from_terms(terms: CheckTerms, issued_at: DateTime<Utc>, signature: String) -> Self {
        Self {
            check_number: terms.check_number,
            issuer_name: terms.issuer_name,
            issuer_account: terms.issuer_account,
            beneficiary_name: terms.beneficiary_name,
            amount: terms.amount,
            amount_in_words: terms.amount_in_words,
            issue_date: terms.issue_date,
            bank_name: terms.bank_name,
            branch_name: terms.branch_name,
            security_pin: terms.security_pin,
            issued_at,
            signature,
            status: CheckStatus::Active,
            id: CheckId::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CheckStatus::Active
    }
}

/// Blank branch names are stored as "no branch".
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
