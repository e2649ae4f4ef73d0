//! # Raster Canvas Backend
//!
//! The drawing pipeline never touches pixels directly: it talks to a
//! [`Surface`], which allocates color handles and fills inclusive integer
//! rectangles. [`ImageSurface`] is the bundled implementation on top of an
//! RGBA buffer from the `image` crate, with PNG/JPEG/GIF encoding.
//!
//! Coordinates handed to `fill_rect` are inclusive on both ends and already
//! normalized (`x1 <= x2`, `y1 <= y2`) by the caller; rectangles reaching
//! outside the surface are clipped.

use std::io::Cursor;
use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::BarraError;

/// Opaque handle to a color allocated on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorHandle(usize);

/// Pixel-rasterization backend contract.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Allocate an opaque color and return its handle.
    fn allocate_color(&mut self, r: u8, g: u8, b: u8) -> ColorHandle;

    /// Mark an allocated color as transparent, returning the handle to use.
    fn make_transparent(&mut self, color: ColorHandle) -> ColorHandle;

    /// Fill the inclusive rectangle `(x1, y1)..=(x2, y2)`.
    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorHandle);
}

/// Output image formats.
///
/// Matches the format constants of classic barcode drawers. Only the
/// formats with an encoder behind them can actually be produced; asking
/// for one without (WBMP) fails with [`BarraError::RenderTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
    Wbmp,
}

impl OutputFormat {
    /// Map a filename extension to a format.
    ///
    /// Returns a [`BarraError::RenderTarget`] when the extension is missing
    /// or maps to no known format.
    pub fn from_path(path: &Path) -> Result<Self, BarraError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "gif" => Ok(OutputFormat::Gif),
            _ => Err(BarraError::RenderTarget(format!(
                "cannot determine the format from the filename {:?}, specify a format",
                path.display()
            ))),
        }
    }
}

/// A [`Surface`] backed by an `image::RgbaImage`.
///
/// Color handles index into a small palette; transparent entries carry a
/// zero alpha channel so the encoded PNG keeps the transparency.
pub struct ImageSurface {
    image: RgbaImage,
    palette: Vec<Rgba<u8>>,
}

impl ImageSurface {
    /// Create a surface of the given pixel dimensions, initially all black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            palette: Vec::new(),
        }
    }

    /// Encode the surface into an in-memory byte buffer.
    pub fn encode(&self, format: OutputFormat) -> Result<Vec<u8>, BarraError> {
        let target = match format {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Gif => image::ImageFormat::Gif,
            OutputFormat::Wbmp => {
                return Err(BarraError::RenderTarget(
                    "there is no drawer for this format".to_string(),
                ));
            }
        };

        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), target)?;
        Ok(bytes)
    }

    /// Access the underlying pixel buffer.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the surface, returning the pixel buffer.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Surface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn allocate_color(&mut self, r: u8, g: u8, b: u8) -> ColorHandle {
        let pixel = Rgba([r, g, b, 255]);
        if let Some(existing) = self.palette.iter().position(|p| *p == pixel) {
            return ColorHandle(existing);
        }
        self.palette.push(pixel);
        ColorHandle(self.palette.len() - 1)
    }

    fn make_transparent(&mut self, color: ColorHandle) -> ColorHandle {
        let Rgba([r, g, b, _]) = self.palette[color.0];
        let pixel = Rgba([r, g, b, 0]);
        if let Some(existing) = self.palette.iter().position(|p| *p == pixel) {
            return ColorHandle(existing);
        }
        self.palette.push(pixel);
        ColorHandle(self.palette.len() - 1)
    }

    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorHandle) {
        let pixel = self.palette[color.0];
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);

        let x_start = x1.max(0);
        let y_start = y1.max(0);
        let x_end = x2.min(w - 1);
        let y_end = y2.min(h - 1);

        for y in y_start..=y_end {
            for x in x_start..=x_end {
                self.image.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}
