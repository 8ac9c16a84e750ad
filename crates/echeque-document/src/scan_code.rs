// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan code rendering.
//
// Payload text becomes a grid of QR modules through a `ModuleEncoder`
// (`QrModuleEncoder` wraps the `qrcode` crate).  The raster side scales the
// grid into a fixed-size square image with a quiet zone, in the check's ink
// colour, and writes it out as PNG.

use std::path::Path;

use echeque_core::error::{EchequeError, Result};
use image::{ImageFormat, Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};
use tracing::{debug, info, instrument};

/// Square edge length requested for every check.
pub const SCAN_CODE_SIZE_PX: u32 = 250;

/// Light border around the code, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Slate ink used for dark modules.
pub const FOREGROUND: Rgb<u8> = Rgb([0x1e, 0x29, 0x3b]);
pub const BACKGROUND: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// QR error-correction tiers.  Checks always use `High`, so a creased or
/// stamped printout still scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

/// A square grid of dark (`true`) and light modules, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    width: u32,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    pub fn new(width: u32, modules: Vec<bool>) -> Result<Self> {
        let expected = (width as usize) * (width as usize);
        if width == 0 || modules.len() != expected {
            return Err(EchequeError::Render(format!(
                "module matrix of width {width} needs {expected} modules, got {}",
                modules.len()
            )));
        }
        Ok(Self { width, modules })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.width && self.modules[(y * self.width + x) as usize]
    }
}

/// QR encoder: payload text to module grid.
pub trait ModuleEncoder {
    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<ModuleMatrix>;
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// `ModuleEncoder` backed by the `qrcode` crate.  Picks the smallest QR
/// version that fits the payload at the requested level.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrModuleEncoder;

impl ModuleEncoder for QrModuleEncoder {
    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<ModuleMatrix> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into())
            .map_err(|e| EchequeError::Render(format!("QR encoding failed: {e}")))?;
        let width = u32::try_from(code.width())
            .map_err(|_| EchequeError::Render("QR code too wide".into()))?;
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        ModuleMatrix::new(width, modules)
    }
}

/// Anything that can turn payload text into a scannable image.
pub trait CodeRenderer {
    fn render(&self, payload: &str, size_px: u32, level: ErrorCorrection) -> Result<RgbImage>;
}

/// Rasterizes the grid produced by an external `ModuleEncoder`.
pub struct RasterRenderer<E> {
    encoder: E,
}

impl<E: ModuleEncoder> RasterRenderer<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }
}

impl<E: ModuleEncoder> CodeRenderer for RasterRenderer<E> {
    #[instrument(skip_all, fields(payload_len = payload.len(), size_px = size_px, level = ?level))]
    fn render(&self, payload: &str, size_px: u32, level: ErrorCorrection) -> Result<RgbImage> {
        let matrix = self.encoder.encode(payload, level)?;
        let span = matrix.width() + 2 * QUIET_ZONE_MODULES;
        if size_px < span {
            return Err(EchequeError::Render(format!(
                "{size_px}px is too small for a {span}-module code"
            )));
        }

        // Whole pixels per module; leftover pixels are split evenly as margin.
        let scale = size_px / span;
        let origin = (size_px - scale * span) / 2 + QUIET_ZONE_MODULES * scale;

        let image = RgbImage::from_fn(size_px, size_px, |x, y| {
            if x < origin || y < origin {
                return BACKGROUND;
            }
            if matrix.is_dark((x - origin) / scale, (y - origin) / scale) {
                FOREGROUND
            } else {
                BACKGROUND
            }
        });

        debug!(modules = matrix.width(), scale, "scan code rendered");
        Ok(image)
    }
}

/// Render a check's payload at the given size with the highest
/// error-correction tier.
pub fn render_payload<R: CodeRenderer + ?Sized>(
    renderer: &R,
    payload: &str,
    size_px: u32,
) -> Result<RgbImage> {
    renderer.render(payload, size_px, ErrorCorrection::High)
}

/// Write a rendered scan code to `path` as PNG.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| EchequeError::Render(format!("cannot write {}: {e}", path.display())))?;
    info!(size_px = image.width(), "scan code saved");
    Ok(())
}
