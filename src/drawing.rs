//! # Drawing
//!
//! Render orchestration: measure a barcode, allocate a surface, run its
//! draw pass once, and encode the pixels.
//!
//! ## Example
//!
//! ```no_run
//! use barra::{Drawing, Linear, OutputFormat};
//!
//! let mut barcode = Linear::code39();
//! barcode.parse("HELLO-123")?;
//!
//! let drawing = Drawing::new();
//! drawing.save(&mut barcode, "hello.png")?;
//! let png_bytes = drawing.buffer(&mut barcode, OutputFormat::Png)?;
//! # Ok::<(), barra::BarraError>(())
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::canvas::{ImageSurface, OutputFormat, Surface};
use crate::color::Color;
use crate::error::BarraError;

/// Capability interface every renderable barcode provides.
///
/// `parse` validates and commits the payload; `dimension` reports the full
/// pixel footprint (the arguments add extra content pixels and are usually
/// zero); `draw` emits one render pass. Drawing is infallible by design: it
/// runs on already-validated, already-encoded data.
pub trait Symbol {
    /// Validate and store the payload, computing the checksum and
    /// refreshing the automatic label.
    fn parse(&mut self, text: &str) -> Result<(), BarraError>;

    /// Total pixel footprint, labels and padding included. Also derives
    /// the label inset used by the following draw pass.
    fn dimension(&mut self, extra_w: u32, extra_h: u32) -> (u32, u32);

    /// Emit one render pass onto the surface.
    ///
    /// A pass paints unconditionally; drawing twice on the same surface
    /// paints twice. Callers keep one pass per surface.
    fn draw(&mut self, surface: &mut dyn Surface);
}

/// Renders a [`Symbol`] to encoded image bytes or a file.
pub struct Drawing {
    background: Color,
}

impl Drawing {
    /// A drawing with a white background.
    pub fn new() -> Self {
        Self {
            background: Color::from_name("white"),
        }
    }

    pub fn with_background(background: impl Into<Color>) -> Self {
        Self {
            background: background.into(),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Render and encode into an in-memory byte buffer.
    pub fn buffer(
        &self,
        symbol: &mut dyn Symbol,
        format: OutputFormat,
    ) -> Result<Vec<u8>, BarraError> {
        let surface = self.rasterize(symbol);
        surface.encode(format)
    }

    /// Render and write to `path`, picking the format from the extension.
    pub fn save(&self, symbol: &mut dyn Symbol, path: impl AsRef<Path>) -> Result<(), BarraError> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;
        let bytes = self.buffer(symbol, format)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Render onto a fresh surface: measure, fill the background, draw.
    pub fn rasterize(&self, symbol: &mut dyn Symbol) -> ImageSurface {
        let (w, h) = symbol.dimension(0, 0);
        let (w, h) = (w.max(1), h.max(1));
        debug!("rasterizing symbol at {w}x{h}");

        let mut surface = ImageSurface::new(w, h);
        let background = self.background.allocate(&mut surface);
        surface.fill_rect(0, 0, w as i32 - 1, h as i32 - 1, background);
        symbol.draw(&mut surface);
        surface
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}
