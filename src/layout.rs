//! # Layout Engine
//!
//! [`Layout`] owns everything a barcode needs to place pixels: integer
//! offsets, a uniform scale, foreground/background colors, and the attached
//! [`Label`]s. Its central job is [`Layout::get_dimension`]: given the
//! barcode's own content size, compute the total pixel footprint once scale,
//! offsets, and label padding are accounted for, including labels that are
//! wider or taller than the barcode body itself.
//!
//! `get_dimension` also derives `push_label`, the top-left inset every
//! subsequent drawing primitive applies during the same render pass. Call it
//! before drawing; primitives invoked without it use a stale (or zero)
//! inset.

use crate::canvas::{ColorHandle, Surface};
use crate::color::Color;
use crate::error::BarraError;
use crate::label::{Alignment, Label, Position};

/// Which configured color a primitive paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintRole {
    Background,
    Foreground,
}

impl PaintRole {
    /// The other role; bars and spaces alternate with this.
    pub fn flip(self) -> Self {
        match self {
            PaintRole::Background => PaintRole::Foreground,
            PaintRole::Foreground => PaintRole::Background,
        }
    }
}

/// Geometry state shared by every barcode kind.
#[derive(Clone)]
pub struct Layout {
    offset_x: u32,
    offset_y: u32,
    scale: u32,
    color_fg: Color,
    color_bg: Color,
    labels: Vec<Label>,
    push_label: (u32, u32),
}

impl Layout {
    pub fn new() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            scale: 1,
            color_fg: Color::from_packed(0x000000),
            color_bg: Color::from_packed(0xffffff),
            labels: Vec::new(),
            push_label: (0, 0),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Set the pixel scale. Zero is rejected and the prior value kept.
    pub fn set_scale(&mut self, scale: u32) -> Result<(), BarraError> {
        if scale == 0 {
            return Err(BarraError::config("scale", "must be larger than 0"));
        }
        self.scale = scale;
        Ok(())
    }

    pub fn offset_x(&self) -> u32 {
        self.offset_x
    }

    pub fn set_offset_x(&mut self, offset_x: u32) {
        self.offset_x = offset_x;
    }

    pub fn offset_y(&self) -> u32 {
        self.offset_y
    }

    pub fn set_offset_y(&mut self, offset_y: u32) {
        self.offset_y = offset_y;
    }

    pub fn foreground_color(&self) -> Color {
        self.color_fg
    }

    pub fn set_foreground_color(&mut self, color: impl Into<Color>) {
        self.color_fg = color.into();
    }

    pub fn background_color(&self) -> Color {
        self.color_bg
    }

    pub fn set_background_color(&mut self, color: impl Into<Color>) {
        self.color_bg = color.into();
    }

    /// Set both colors at once.
    pub fn set_color(&mut self, fg: impl Into<Color>, bg: impl Into<Color>) {
        self.set_foreground_color(fg);
        self.set_background_color(bg);
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Attach a label. Insertion order is preserved and matters for the
    /// padding tie-break.
    pub fn add_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Detach the label at `index`, if any.
    pub fn remove_label(&mut self, index: usize) -> Option<Label> {
        if index < self.labels.len() {
            Some(self.labels.remove(index))
        } else {
            None
        }
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    /// The top-left padding derived by the last `get_dimension` call.
    pub fn push_label(&self) -> (u32, u32) {
        self.push_label
    }

    /// Total pixel footprint of a barcode whose content box is `w` × `h`.
    ///
    /// Labels contribute padding in two passes. First, each side takes the
    /// full aligned-axis dimension of its largest label (height for
    /// top/bottom labels, width for left/right ones). Second, any label
    /// whose perpendicular dimension exceeds the scaled content box grows
    /// the perpendicular paddings according to its alignment, as a running
    /// maximum. The resulting top-left inset is cached in `push_label` for
    /// the drawing primitives of the current render pass.
    pub fn get_dimension(&mut self, w: u32, h: u32) -> (u32, u32) {
        let base_w = (w + self.offset_x) * self.scale;
        let base_h = (h + self.offset_y) * self.scale;

        // Padding per side: top, right, bottom, left.
        let mut around = [0u32; 4];
        for position in [Position::Top, Position::Right, Position::Bottom, Position::Left] {
            if let Some(label) = self.biggest_label(position) {
                let (lw, lh) = label.dimension();
                match position {
                    Position::Top => around[0] += lh,
                    Position::Right => around[1] += lw,
                    Position::Bottom => around[2] += lh,
                    Position::Left => around[3] += lw,
                }
            }
        }

        // A left/right label taller than the content box, or a top/bottom
        // label wider than it, spills over the perpendicular sides.
        for label in &self.labels {
            let (lw, lh) = label.dimension();
            match label.position() {
                Position::Left | Position::Right => {
                    if lh > base_h {
                        let overflow = lh - base_h;
                        match label.alignment() {
                            Alignment::Start => around[2] = around[2].max(overflow),
                            Alignment::Center => {
                                let half = overflow.div_ceil(2);
                                around[0] = around[0].max(half);
                                around[2] = around[2].max(half);
                            }
                            Alignment::End => around[0] = around[0].max(overflow),
                        }
                    }
                }
                Position::Top | Position::Bottom => {
                    if lw > base_w {
                        let overflow = lw - base_w;
                        match label.alignment() {
                            Alignment::Start => around[1] = around[1].max(overflow),
                            Alignment::Center => {
                                let half = overflow.div_ceil(2);
                                around[1] = around[1].max(half);
                                around[3] = around[3].max(half);
                            }
                            Alignment::End => around[3] = around[3].max(overflow),
                        }
                    }
                }
            }
        }

        self.push_label = (around[3], around[0]);

        (
            base_w + around[1] + around[3],
            base_h + around[0] + around[2],
        )
    }

    /// The label contributing the padding on `position`: strictly largest
    /// aligned-axis dimension, earliest-inserted on ties.
    fn biggest_label(&self, position: Position) -> Option<&Label> {
        let aligned_axis = |label: &Label| {
            let (w, h) = label.dimension();
            match position {
                Position::Top | Position::Bottom => h,
                Position::Left | Position::Right => w,
            }
        };

        let mut best: Option<&Label> = None;
        for label in self.labels.iter().filter(|l| l.position() == position) {
            match best {
                Some(current) if aligned_axis(label) <= aligned_axis(current) => {}
                _ => best = Some(label),
            }
        }
        best
    }

    /// Map a content-space point to final pixel space.
    fn transform(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x + self.offset_x as i32) * self.scale as i32 + self.push_label.0 as i32,
            (y + self.offset_y as i32) * self.scale as i32 + self.push_label.1 as i32,
        )
    }

    pub(crate) fn paint(&self, surface: &mut dyn Surface, role: PaintRole) -> ColorHandle {
        match role {
            PaintRole::Background => self.color_bg.allocate(surface),
            PaintRole::Foreground => self.color_fg.allocate(surface),
        }
    }

    /// Draw one content-space pixel as a scale × scale block.
    pub fn draw_pixel(&self, surface: &mut dyn Surface, x: i32, y: i32, role: PaintRole) {
        let (xr, yr) = self.transform(x, y);
        let s = self.scale as i32;
        let color = self.paint(surface, role);
        surface.fill_rect(xr, yr, xr + s - 1, yr + s - 1, color);
    }

    /// Draw a rectangle outline.
    pub fn draw_rectangle(
        &self,
        surface: &mut dyn Surface,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        role: PaintRole,
    ) {
        let color = self.paint(surface, role);
        let (ax, ay) = self.transform(x1, y1);
        let (bx, by) = self.transform(x2, y2);
        let s = self.scale as i32;

        if self.scale == 1 {
            surface.fill_rect(ax, ay, bx, by, color);
        } else {
            // Four edges, each one scaled unit thick.
            surface.fill_rect(ax, ay, bx + s - 1, ay + s - 1, color);
            surface.fill_rect(ax, ay, ax + s - 1, by + s - 1, color);
            surface.fill_rect(bx, ay, bx + s - 1, by + s - 1, color);
            surface.fill_rect(ax, by, bx + s - 1, by + s - 1, color);
        }
    }

    /// Draw a filled rectangle. Reversed corners are normalized, never an
    /// error.
    pub fn draw_filled_rectangle(
        &self,
        surface: &mut dyn Surface,
        mut x1: i32,
        mut y1: i32,
        mut x2: i32,
        mut y2: i32,
        role: PaintRole,
    ) {
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
        }

        let color = self.paint(surface, role);
        let (ax, ay) = self.transform(x1, y1);
        let (bx, by) = self.transform(x2, y2);
        let s = self.scale as i32;
        surface.fill_rect(ax, ay, bx + s - 1, by + s - 1, color);
    }

    /// Hand every label the transformed content-box corners to paint
    /// itself against.
    pub fn draw_labels(&self, surface: &mut dyn Surface, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (ax, ay) = self.transform(x1, y1);
        let (bx, by) = self.transform(x2, y2);
        for label in &self.labels {
            label.draw(surface, ax, ay, bx, by);
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}
