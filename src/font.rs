//! # Text Blocks
//!
//! Text measurement and painting for labels.
//!
//! The layout engine never shapes text itself: it consumes the [`TextBlock`]
//! contract, which reports a measured bounding box and paints at an anchor
//! point. [`BitmapFont`] is the bundled implementation, rendering the Spleen
//! bitmap font family pixel-by-pixel onto a [`Surface`].
//!
//! Rotations are constrained to quarter turns; a 90° or 270° rotation swaps
//! the reported width and height.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::canvas::Surface;
use crate::color::Color;

/// Quarter-turn rotation of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Whether this rotation swaps the width/height interpretation.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// Measured extents of a shaped text run, in its pre-rotation local frame.
///
/// Width is `right - left + 1`; height is `ascent + descent + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    pub left: i32,
    pub right: i32,
    pub ascent: i32,
    pub descent: i32,
}

/// Contract for a measurable, paintable text run.
///
/// A text block owns its full configuration (text, rotation, color), so a
/// boxed clone of one is an independent snapshot: mutating the original
/// afterwards does not affect the clone.
pub trait TextBlock {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: &str);

    fn rotation(&self) -> Rotation;

    fn set_rotation(&mut self, rotation: Rotation);

    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// Measure the current text in the pre-rotation local frame.
    fn metrics(&self) -> TextMetrics;

    /// Width and height of the painted run, rotation applied.
    fn dimension(&self) -> (u32, u32) {
        let m = self.metrics();
        let w = (m.right - m.left + 1).max(0) as u32;
        let h = (m.ascent + m.descent + 1).max(0) as u32;
        if self.rotation().swaps_axes() { (h, w) } else { (w, h) }
    }

    /// Paint the text with its top-left corner at `(x, y)`.
    fn draw(&self, surface: &mut dyn Surface, x: i32, y: i32);

    /// Clone into an owned box; enables copy-on-attach for labels.
    fn clone_box(&self) -> Box<dyn TextBlock>;
}

impl Clone for Box<dyn TextBlock> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Spleen font cell sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    /// 6×12
    Small,
    /// 8×16
    #[default]
    Medium,
    /// 12×24
    Large,
}

impl FontSize {
    fn cell(self) -> (u32, u32) {
        match self {
            FontSize::Small => (6, 12),
            FontSize::Medium => (8, 16),
            FontSize::Large => (12, 24),
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            FontSize::Small => FONT_6X12,
            FontSize::Medium => FONT_8X16,
            FontSize::Large => FONT_12X24,
        }
    }
}

/// A monospace [`TextBlock`] over the Spleen bitmap fonts.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    size: FontSize,
    text: String,
    rotation: Rotation,
    color: Color,
}

impl BitmapFont {
    pub fn new(size: FontSize) -> Self {
        Self {
            size,
            text: String::new(),
            rotation: Rotation::R0,
            color: Color::from_name("black"),
        }
    }

    pub fn size(&self) -> FontSize {
        self.size
    }

    /// Map a glyph-local pixel into surface coordinates for the current
    /// rotation, given the unrotated run dimensions.
    fn place(&self, lx: i32, ly: i32, w: i32, h: i32) -> (i32, i32) {
        match self.rotation {
            Rotation::R0 => (lx, ly),
            Rotation::R90 => (ly, w - 1 - lx),
            Rotation::R180 => (w - 1 - lx, h - 1 - ly),
            Rotation::R270 => (h - 1 - ly, lx),
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(FontSize::Medium)
    }
}

impl TextBlock for BitmapFont {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn metrics(&self) -> TextMetrics {
        let (cw, ch) = self.size.cell();
        let chars = self.text.chars().count() as i32;
        TextMetrics {
            left: 0,
            right: chars * cw as i32 - 1,
            ascent: ch as i32 - 1,
            descent: 0,
        }
    }

    fn draw(&self, surface: &mut dyn Surface, x: i32, y: i32) {
        if self.text.is_empty() {
            return;
        }

        let (cw, ch) = self.size.cell();
        let chars = self.text.chars().count() as u32;
        let (w, h) = (chars * cw, ch);
        let color = self.color.allocate(surface);

        let mut font = PSF2Font::new(self.size.font_data()).unwrap();
        for (i, ch_glyph) in self.text.chars().enumerate() {
            let base_x = i as u32 * cw;
            let utf8 = ch_glyph.to_string();
            if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on {
                            let lx = (base_x + col_x as u32) as i32;
                            let ly = row_y as i32;
                            let (px, py) = self.place(lx, ly, w as i32, h as i32);
                            surface.fill_rect(x + px, y + py, x + px, y + py, color);
                        }
                    }
                }
            } else {
                // Unknown glyph: box outline, so the miss stays visible.
                for dx in 0..cw as i32 {
                    for dy in [0, ch as i32 - 1] {
                        let (px, py) =
                            self.place(base_x as i32 + dx, dy, w as i32, h as i32);
                        surface.fill_rect(x + px, y + py, x + px, y + py, color);
                    }
                }
                for dy in 0..ch as i32 {
                    for dx in [0, cw as i32 - 1] {
                        let (px, py) =
                            self.place(base_x as i32 + dx, dy, w as i32, h as i32);
                        surface.fill_rect(x + px, y + py, x + px, y + py, color);
                    }
                }
            }
        }
    }

    fn clone_box(&self) -> Box<dyn TextBlock> {
        Box::new(self.clone())
    }
}
