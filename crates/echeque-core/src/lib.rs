// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// echeque-core — Check record types, numeral expansion, and error definitions
// shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod numerals;
pub mod timestamp;
pub mod types;

pub use config::{AppConfig, VerificationPolicy};
pub use error::{EchequeError, ValidationError};
pub use types::*;
