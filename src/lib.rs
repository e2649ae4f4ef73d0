//! # Barra - Barcode Rendering Library
//!
//! Barra renders 1D and 2D barcodes to raster images. It provides:
//!
//! - **Layout engine**: exact pixel footprints with scale, offsets, and up
//!   to four independently positioned text labels, including labels larger
//!   than the barcode body
//! - **1D pipeline**: parse → validate → checksum → draw over pluggable
//!   symbology tables (Code 39 included)
//! - **2D geometry**: module grids with independent X/Y scale (QR included)
//! - **Output**: PNG/JPEG/GIF encoding via the `image` crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use barra::{Drawing, Linear};
//!
//! // Configure a Code 39 barcode
//! let mut barcode = Linear::code39();
//! barcode.set_scale(2)?;
//! barcode.set_thickness(40)?;
//!
//! // Validate the payload and register the human-readable label
//! barcode.parse("HELLO-123")?;
//!
//! // Rasterize and save; the format follows the file extension
//! Drawing::new().save(&mut barcode, "hello.png")?;
//!
//! # Ok::<(), barra::BarraError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Dimension, label padding, scaled drawing primitives |
//! | [`label`] | Positioned, aligned text annotations |
//! | [`font`] | Text measurement contract and bitmap font implementation |
//! | [`linear`] | 1D encoding pipeline and symbology plugins |
//! | [`matrix`] | 2D module-grid geometry and QR |
//! | [`canvas`] | Rasterization backend contract and image surface |
//! | [`drawing`] | Render orchestration and file output |
//! | [`color`] | RGB colors and the named palette |
//! | [`error`] | Error types |
//!
//! ## Adding a Symbology
//!
//! Implement [`Symbology`]: a key table, a parallel table of module-width
//! patterns, a validator, and a checksum hook. The pipeline drives the rest.

pub mod canvas;
pub mod color;
pub mod drawing;
pub mod error;
pub mod font;
pub mod label;
pub mod layout;
pub mod linear;
pub mod matrix;

// Re-exports for convenience
pub use canvas::{ColorHandle, ImageSurface, OutputFormat, Surface};
pub use color::Color;
pub use drawing::{Drawing, Symbol};
pub use error::BarraError;
pub use font::{BitmapFont, FontSize, Rotation, TextBlock, TextMetrics};
pub use label::{Alignment, Label, Position};
pub use layout::{Layout, PaintRole};
pub use linear::{Code39, LabelSource, Linear, Segment, Symbology};
pub use matrix::{ErrorLevel, Matrix, Qr};
