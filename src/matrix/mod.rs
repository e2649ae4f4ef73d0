//! # Matrix Barcodes
//!
//! Geometry for 2D symbologies. A [`Matrix`] wraps the layout engine and
//! adds independent X/Y module scales on top of the uniform pixel scale,
//! so a module can rasterize as a non-square block. Label padding and the
//! derived top-left inset work exactly as for 1D codes; only the scale
//! applied by the primitives differs.

pub mod qr;

pub use qr::{ErrorLevel, Qr};

use crate::canvas::Surface;
use crate::error::BarraError;
use crate::layout::{Layout, PaintRole};

/// Layout engine variant with independent X/Y module scale.
#[derive(Clone)]
pub struct Matrix {
    layout: Layout,
    scale_x: u32,
    scale_y: u32,
}

impl Matrix {
    pub fn new() -> Self {
        Self {
            layout: Layout::new(),
            scale_x: 1,
            scale_y: 1,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    pub fn scale_x(&self) -> u32 {
        self.scale_x
    }

    /// Set the horizontal module scale. Zero is rejected and the prior
    /// value kept.
    pub fn set_scale_x(&mut self, scale_x: u32) -> Result<(), BarraError> {
        if scale_x == 0 {
            return Err(BarraError::config("scale_x", "must be larger than 0"));
        }
        self.scale_x = scale_x;
        Ok(())
    }

    pub fn scale_y(&self) -> u32 {
        self.scale_y
    }

    /// Set the vertical module scale. Zero is rejected and the prior
    /// value kept.
    pub fn set_scale_y(&mut self, scale_y: u32) -> Result<(), BarraError> {
        if scale_y == 0 {
            return Err(BarraError::config("scale_y", "must be larger than 0"));
        }
        self.scale_y = scale_y;
        Ok(())
    }

    /// Total pixel footprint of a `w` × `h` module grid.
    pub fn get_dimension(&mut self, w: u32, h: u32) -> (u32, u32) {
        self.layout
            .get_dimension(w * self.scale_x, h * self.scale_y)
    }

    /// Combined per-axis scales.
    fn scales(&self) -> (i32, i32) {
        let s = self.layout.scale();
        ((s * self.scale_x) as i32, (s * self.scale_y) as i32)
    }

    fn transform(&self, x: i32, y: i32) -> (i32, i32) {
        let (sx, sy) = self.scales();
        let push = self.layout.push_label();
        (
            (x + self.layout.offset_x() as i32) * sx + push.0 as i32,
            (y + self.layout.offset_y() as i32) * sy + push.1 as i32,
        )
    }

    /// Draw one module as a block of the combined scales.
    pub fn draw_pixel(&self, surface: &mut dyn Surface, x: i32, y: i32, role: PaintRole) {
        let (sx, sy) = self.scales();
        let (xr, yr) = self.transform(x, y);
        let color = self.layout.paint(surface, role);
        surface.fill_rect(xr, yr, xr + sx - 1, yr + sy - 1, color);
    }

    /// Draw a rectangle outline in module coordinates.
    pub fn draw_rectangle(
        &self,
        surface: &mut dyn Surface,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        role: PaintRole,
    ) {
        let (sx, sy) = self.scales();
        let color = self.layout.paint(surface, role);
        let (ax, ay) = self.transform(x1, y1);
        let (bx, by) = self.transform(x2, y2);

        if sx == 1 && sy == 1 {
            surface.fill_rect(ax, ay, bx, by, color);
        } else {
            surface.fill_rect(ax, ay, bx + sx - 1, ay + sy - 1, color);
            surface.fill_rect(ax, ay, ax + sx - 1, by + sy - 1, color);
            surface.fill_rect(bx, ay, bx + sx - 1, by + sy - 1, color);
            surface.fill_rect(ax, by, bx + sx - 1, by + sy - 1, color);
        }
    }

    /// Draw a filled rectangle in module coordinates. Reversed corners are
    /// normalized, never an error.
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

        let (sx, sy) = self.scales();
        let color = self.layout.paint(surface, role);
        let (ax, ay) = self.transform(x1, y1);
        let (bx, by) = self.transform(x2, y2);
        surface.fill_rect(ax, ay, bx + sx - 1, by + sy - 1, color);
    }

    /// Hand every label the transformed module-grid corners.
    pub fn draw_labels(&self, surface: &mut dyn Surface, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (ax, ay) = self.transform(x1, y1);
        let (bx, by) = self.transform(x2, y2);
        for label in self.layout.labels() {
            label.draw(surface, ax, ay, bx, by);
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::RecordingSurface;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dimension_multiplies_module_scales() {
        let mut matrix = Matrix::new();
        matrix.set_scale_x(3).unwrap();
        matrix.set_scale_y(2).unwrap();
        assert_eq!(matrix.get_dimension(10, 10), (30, 20));

        matrix.layout_mut().set_scale(2).unwrap();
        assert_eq!(matrix.get_dimension(10, 10), (60, 40));
    }

    #[test]
    fn test_scale_zero_keeps_previous_value() {
        let mut matrix = Matrix::new();
        matrix.set_scale_x(4).unwrap();
        assert!(matrix.set_scale_x(0).is_err());
        assert_eq!(matrix.scale_x(), 4);
        assert!(matrix.set_scale_y(0).is_err());
        assert_eq!(matrix.scale_y(), 1);
    }

    #[test]
    fn test_draw_pixel_uses_combined_scales() {
        let mut matrix = Matrix::new();
        matrix.set_scale_x(3).unwrap();
        matrix.set_scale_y(2).unwrap();
        matrix.layout_mut().set_scale(2).unwrap();

        let mut surface = RecordingSurface::new(100, 100);
        matrix.draw_pixel(&mut surface, 2, 1, PaintRole::Foreground);
        // Module (2, 1) at 6x4 pixels per module.
        assert_eq!(surface.rects, vec![(12, 4, 17, 7, (0, 0, 0))]);
    }

    #[test]
    fn test_filled_rectangle_normalizes_corners() {
        let mut matrix = Matrix::new();
        matrix.set_scale_x(2).unwrap();
        let mut surface = RecordingSurface::new(100, 100);
        matrix.draw_filled_rectangle(&mut surface, 5, 4, 1, 0, PaintRole::Background);
        assert_eq!(surface.rects, vec![(2, 0, 11, 4, (255, 255, 255))]);
    }
}
