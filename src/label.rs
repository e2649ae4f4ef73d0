//! # Labels
//!
//! A [`Label`] is a text annotation attached to one side of a barcode. It
//! carries its own alignment, edge clearance, and signed offset along the
//! edge, and owns a private clone of its font configuration: attaching a
//! font snapshots it, so mutating the original afterwards never changes a
//! label that is already in place.

use crate::canvas::Surface;
use crate::color::Color;
use crate::font::{Rotation, TextBlock};

/// Which edge of the barcode the label sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

/// Placement along the attachment edge.
///
/// Axis-relative: `Start` means left for horizontal edges and top for
/// vertical ones; `End` means right or bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

/// A positioned, aligned text annotation.
#[derive(Clone)]
pub struct Label {
    text: String,
    font: Box<dyn TextBlock>,
    position: Position,
    alignment: Alignment,
    spacing: u32,
    offset: i32,
    rotation: Rotation,
    color: Color,
}

impl Label {
    /// Create a label with the given text and a clone of `font`.
    ///
    /// Defaults: bottom position, centered, spacing 4, no offset, no
    /// rotation, black text.
    pub fn new(text: impl Into<String>, font: &dyn TextBlock) -> Self {
        let mut label = Self {
            text: text.into(),
            font: font.clone_box(),
            position: Position::Bottom,
            alignment: Alignment::Center,
            spacing: 4,
            offset: 0,
            rotation: Rotation::R0,
            color: Color::from_name("black"),
        };
        label.sync_font();
        label
    }

    /// Push text, rotation, and color into the owned font copy.
    fn sync_font(&mut self) {
        self.font.set_text(&self.text);
        self.font.set_rotation(self.rotation);
        self.font.set_color(self.color);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.font.set_text(&self.text);
    }

    pub fn font(&self) -> &dyn TextBlock {
        self.font.as_ref()
    }

    /// Replace the font with an independent clone of `font`.
    pub fn set_font(&mut self, font: &dyn TextBlock) {
        self.font = font.clone_box();
        self.sync_font();
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Clearance between the barcode edge and the text, in pixels.
    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Signed shift along the attachment edge.
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.font.set_rotation(rotation);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.font.set_color(color);
    }

    /// Footprint of the label: measured text plus spacing on the axis
    /// perpendicular to the attachment edge, plus any positive offset on
    /// the other axis.
    pub fn dimension(&self) -> (u32, u32) {
        let (mut w, mut h) = self.font.dimension();

        match self.position {
            Position::Top | Position::Bottom => {
                h += self.spacing;
                w += self.offset.max(0) as u32;
            }
            Position::Left | Position::Right => {
                w += self.spacing;
                h += self.offset.max(0) as u32;
            }
        }

        (w, h)
    }

    /// Paint the label relative to the barcode content box.
    ///
    /// `(x1, y1)` and `(x2, y2)` are the content box corners in final
    /// pixel space; the caller has already applied scale, offsets, and
    /// label padding.
    pub fn draw(&self, surface: &mut dyn Surface, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (tw, th) = self.font.dimension();
        let (tw, th) = (tw as i32, th as i32);
        let spacing = self.spacing as i32;

        let (x, y) = match self.position {
            Position::Top | Position::Bottom => {
                let y = if self.position == Position::Top {
                    y1 - spacing - th
                } else {
                    y2 + spacing
                };
                let x = match self.alignment {
                    Alignment::Center => (x2 - x1) / 2 + x1 - tw / 2 + self.offset,
                    Alignment::Start => x1 + self.offset,
                    Alignment::End => x2 + self.offset - tw,
                };
                (x, y)
            }
            Position::Left | Position::Right => {
                let x = if self.position == Position::Left {
                    x1 - spacing - tw
                } else {
                    x2 + spacing
                };
                let y = match self.alignment {
                    Alignment::Center => (y2 - y1) / 2 + y1 - th / 2 + self.offset,
                    Alignment::Start => y1 + self.offset,
                    Alignment::End => y2 + self.offset - th,
                };
                (x, y)
            }
        };

        self.font.draw(surface, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::RecordingSurface;
    use crate::font::{BitmapFont, FontSize};

    fn small_font(text: &str) -> BitmapFont {
        let mut font = BitmapFont::new(FontSize::Small);
        font.set_text(text);
        font
    }

    #[test]
    fn test_dimension_bottom_adds_spacing_to_height() {
        let label = Label::new("HELLO", &small_font(""));
        // 5 chars at 6x12, default spacing 4.
        assert_eq!(label.dimension(), (30, 16));
    }

    #[test]
    fn test_dimension_side_adds_spacing_to_width() {
        let mut label = Label::new("HI", &small_font(""));
        label.set_position(Position::Left);
        label.set_spacing(3);
        assert_eq!(label.dimension(), (15, 12));
    }

    #[test]
    fn test_dimension_counts_positive_offset_only() {
        let mut label = Label::new("HI", &small_font(""));
        label.set_spacing(0);
        label.set_offset(7);
        assert_eq!(label.dimension(), (19, 12));
        label.set_offset(-7);
        assert_eq!(label.dimension(), (12, 12));
    }

    #[test]
    fn test_font_is_cloned_on_attach() {
        let mut template = small_font("");
        let label = Label::new("FIXED", &template);
        template.set_text("CHANGED");
        template.set_rotation(Rotation::R90);
        assert_eq!(label.font().text(), "FIXED");
        assert_eq!(label.font().rotation(), Rotation::R0);
    }

    #[test]
    fn test_set_font_reapplies_label_state() {
        let mut label = Label::new("KEEP", &small_font(""));
        label.set_rotation(Rotation::R180);
        label.set_color(Color::from_name("red"));
        label.set_font(&BitmapFont::new(FontSize::Large));
        assert_eq!(label.font().text(), "KEEP");
        assert_eq!(label.font().rotation(), Rotation::R180);
        assert_eq!(label.font().color(), Color::from_name("red"));
    }

    /// Drawing goes through the owned font at the computed anchor; verify
    /// the top-left pixel bound for each side.
    #[test]
    fn test_draw_anchor_bottom_center() {
        let mut label = Label::new("AB", &small_font(""));
        label.set_spacing(4);
        let mut surface = RecordingSurface::new(200, 200);
        // Content box 0..=99 x 0..=49.
        label.draw(&mut surface, 0, 0, 99, 49);

        // Text is 12 wide: anchor x = 49 - 6 = 43, y = 49 + 4 = 53.
        for (x, y, ..) in &surface.rects {
            assert!(*x >= 43 && *x < 43 + 12);
            assert!(*y >= 53 && *y < 53 + 12);
        }
    }

    #[test]
    fn test_draw_anchor_top_start() {
        let mut label = Label::new("AB", &small_font(""));
        label.set_position(Position::Top);
        label.set_alignment(Alignment::Start);
        label.set_spacing(2);
        let mut surface = RecordingSurface::new(200, 200);
        label.draw(&mut surface, 10, 30, 99, 49);

        // Anchor x = 10, y = 30 - 2 - 12 = 16.
        for (x, y, ..) in &surface.rects {
            assert!(*x >= 10 && *x < 22);
            assert!(*y >= 16 && *y < 28);
        }
    }

    #[test]
    fn test_draw_anchor_right_end() {
        let mut label = Label::new("A", &small_font(""));
        label.set_position(Position::Right);
        label.set_alignment(Alignment::End);
        label.set_spacing(1);
        let mut surface = RecordingSurface::new(200, 200);
        label.draw(&mut surface, 0, 0, 59, 39);

        // Anchor x = 59 + 1 = 60, y = 39 - 12 = 27.
        for (x, y, ..) in &surface.rects {
            assert!(*x >= 60 && *x < 66);
            assert!(*y >= 27 && *y < 39);
        }
    }
}
