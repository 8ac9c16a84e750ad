// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the electronic check system.

use thiserror::Error;

/// Rejected user input.  Raised before any signature is computed, so a
/// failed issuance never leaves a partial record behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field is missing: {0}")]
    MissingField(&'static str),

    #[error("security PIN must be exactly 4 digits (got {0})")]
    PinLength(usize),

    #[error("security PIN must contain only digits")]
    PinNotNumeric,

    #[error("amount is not a decimal number: {0}")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    AmountNotPositive,

    #[error("amount is too large to express in words")]
    AmountTooLarge,

    #[error("unknown bank: {0}")]
    UnknownBank(String),

    #[error("check number already issued: {0}")]
    DuplicateCheckNumber(String),
}

/// Top-level error type for all electronic check operations.
#[derive(Debug, Error)]
pub enum EchequeError {
    // -- Input --
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    // -- Scannable payload --
    #[error("payload encoding error: {0}")]
    Encoding(String),

    #[error("scan code rendering failed: {0}")]
    Render(String),

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EchequeError>;
