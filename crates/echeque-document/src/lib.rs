// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// echeque-document — What gets printed on, and scanned from, a check.
//
// Provides the verification payload codec (the text inside the scan code) and
// scan code rendering to PNG.

pub mod payload;
pub mod scan_code;

pub use payload::{VerificationPayload, decode, encode};
pub use scan_code::{
    CodeRenderer, ErrorCorrection, ModuleEncoder, ModuleMatrix, QrModuleEncoder, RasterRenderer,
    SCAN_CODE_SIZE_PX, render_payload, save_png,
};
