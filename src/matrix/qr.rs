//! # QR Codes
//!
//! A QR symbol over the [`Matrix`] geometry. Encoding is delegated to the
//! `qrcode` crate; this module only walks the module grid and hands dark
//! modules to the matrix primitives, so labels, scales, and offsets behave
//! exactly as they do for 1D codes.

use log::debug;
use qrcode::{EcLevel, QrCode};

use crate::canvas::Surface;
use crate::color::Color;
use crate::drawing::Symbol;
use crate::error::BarraError;
use crate::label::Label;
use crate::layout::PaintRole;
use crate::matrix::Matrix;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl ErrorLevel {
    fn ec_level(self) -> EcLevel {
        match self {
            ErrorLevel::L => EcLevel::L,
            ErrorLevel::M => EcLevel::M,
            ErrorLevel::Q => EcLevel::Q,
            ErrorLevel::H => EcLevel::H,
        }
    }
}

/// A QR barcode.
pub struct Qr {
    matrix: Matrix,
    text: String,
    error_level: ErrorLevel,
    code: Option<QrCode>,
}

impl Qr {
    pub fn new() -> Self {
        Self {
            matrix: Matrix::new(),
            text: String::new(),
            error_level: ErrorLevel::M,
            code: None,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut Matrix {
        &mut self.matrix
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error_level(&self) -> ErrorLevel {
        self.error_level
    }

    /// Choose the error correction level. Takes effect at the next parse.
    pub fn set_error_level(&mut self, level: ErrorLevel) {
        self.error_level = level;
    }

    /// Set both module scales at once, making modules square blocks of
    /// `size` × `size` pixels.
    pub fn set_module_size(&mut self, size: u32) -> Result<(), BarraError> {
        self.matrix.set_scale_x(size)?;
        self.matrix.set_scale_y(size)
    }

    pub fn set_scale(&mut self, scale: u32) -> Result<(), BarraError> {
        self.matrix.layout_mut().set_scale(scale)
    }

    pub fn set_color(&mut self, fg: impl Into<Color>, bg: impl Into<Color>) {
        self.matrix.layout_mut().set_color(fg, bg);
    }

    pub fn add_label(&mut self, label: Label) {
        self.matrix.layout_mut().add_label(label);
    }

    /// Modules per side of the encoded symbol; zero before a parse.
    fn side(&self) -> u32 {
        self.code.as_ref().map(|c| c.width() as u32).unwrap_or(0)
    }
}

impl Default for Qr {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbol for Qr {
    fn parse(&mut self, text: &str) -> Result<(), BarraError> {
        let code = QrCode::with_error_correction_level(text, self.error_level.ec_level())
            .map_err(|e| BarraError::parse(text, format!("QR encoding failed: {e}")))?;
        debug!("encoded {} bytes into a {}-module QR symbol", text.len(), code.width());

        self.text = text.to_string();
        self.code = Some(code);
        Ok(())
    }

    fn dimension(&mut self, extra_w: u32, extra_h: u32) -> (u32, u32) {
        let side = self.side();
        self.matrix.get_dimension(extra_w + side, extra_h + side)
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        let Some(code) = &self.code else {
            return;
        };

        let side = code.width();
        for y in 0..side {
            for x in 0..side {
                if code[(x, y)] == qrcode::Color::Dark {
                    self.matrix
                        .draw_pixel(surface, x as i32, y as i32, PaintRole::Foreground);
                }
            }
        }

        let side = side as i32;
        self.matrix.draw_labels(surface, 0, 0, side, side);
    }
}
