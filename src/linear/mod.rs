//! # Linear Barcodes
//!
//! The 1D encoding pipeline. A [`Linear`] barcode composes the layout
//! engine with a [`Symbology`] plugin and drives the fixed sequence
//! parse → validate → checksum → draw.
//!
//! A symbology is data, not behavior: a key table, a parallel table of
//! module-pattern strings, a validator, and a checksum hook. Each pattern
//! string is a run of decimal digits; digit `d` draws `d + 1` unit-width
//! modules in the current paint role, and the role flips after every
//! digit. Bars start in the foreground unless the segment says to start
//! on a space.
//!
//! ## Example
//!
//! ```no_run
//! use barra::{Drawing, Linear};
//!
//! let mut barcode = Linear::code39();
//! barcode.set_thickness(40)?;
//! barcode.parse("HELLO")?;
//! Drawing::new().save(&mut barcode, "hello.png")?;
//! # Ok::<(), barra::BarraError>(())
//! ```

pub mod code39;

pub use code39::Code39;

use log::debug;

use crate::canvas::Surface;
use crate::color::Color;
use crate::drawing::Symbol;
use crate::error::BarraError;
use crate::font::{BitmapFont, TextBlock};
use crate::label::{Label, Position};
use crate::layout::{Layout, PaintRole};

/// Default bar height in content pixels.
pub const DEFAULT_THICKNESS: u32 = 30;

/// Where the human-readable label text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelSource {
    /// The parsed text, plus the checksum when it is displayed.
    #[default]
    Auto,
    /// A fixed string.
    Literal(String),
    /// No automatic label.
    None,
}

/// One drawable run of a pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Module-pattern digits from the symbology's code table.
    pub code: &'static str,
    /// Whether the run begins with a bar (foreground) or a space.
    pub start_bar: bool,
}

impl Segment {
    pub fn bar(code: &'static str) -> Self {
        Self {
            code,
            start_bar: true,
        }
    }

    pub fn space(code: &'static str) -> Self {
        Self {
            code,
            start_bar: false,
        }
    }

    /// Unit-width modules this segment spans.
    pub fn modules(&self) -> u32 {
        self.code
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .expect("module pattern digits must be 0-9")
                    + 1
            })
            .sum()
    }
}

/// A symbology plugin: encode tables plus validation and checksum rules.
///
/// `keys` and `codes` are paired by index. `encode` expands validated text
/// into the exact segment sequence to draw, start/stop characters and
/// inter-character gaps included.
pub trait Symbology {
    /// Symbol identifiers, paired by index with `codes`.
    fn keys(&self) -> &'static [char];

    /// Module-pattern strings, paired by index with `keys`.
    fn codes(&self) -> &'static [&'static str];

    /// Reject text this symbology cannot encode.
    fn validate(&self, text: &str) -> Result<(), BarraError>;

    /// Printable checksum for `text`, or `None` when the symbology has
    /// no checksum.
    fn checksum(&self, text: &str) -> Option<String>;

    /// Expand validated text (and the checksum, when one is to be
    /// encoded) into drawable segments.
    fn encode(&self, text: &str, checksum: Option<&str>) -> Vec<Segment>;
}

/// A 1D barcode: layout engine + symbology plugin + label bookkeeping.
pub struct Linear<S> {
    layout: Layout,
    symbology: S,
    text: String,
    thickness: u32,
    checksum_enabled: bool,
    display_checksum: bool,
    checksum: Option<String>,
    label_source: LabelSource,
    font: Box<dyn TextBlock>,
    auto_label: Option<usize>,
}

impl<S: Symbology> Linear<S> {
    /// Wrap a symbology plugin with default settings: thickness 30,
    /// automatic bottom label, checksum off.
    pub fn new(symbology: S) -> Self {
        Self {
            layout: Layout::new(),
            symbology,
            text: String::new(),
            thickness: DEFAULT_THICKNESS,
            checksum_enabled: false,
            display_checksum: false,
            checksum: None,
            label_source: LabelSource::Auto,
            font: Box::new(BitmapFont::default()),
            auto_label: None,
        }
    }

    pub fn symbology(&self) -> &S {
        &self.symbology
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Set the bar height. Zero is rejected and the prior value kept.
    pub fn set_thickness(&mut self, thickness: u32) -> Result<(), BarraError> {
        if thickness == 0 {
            return Err(BarraError::config("thickness", "must be larger than 0"));
        }
        self.thickness = thickness;
        Ok(())
    }

    /// Enable or disable encoding the checksum into the bars.
    pub fn set_checksum(&mut self, enabled: bool) {
        self.checksum_enabled = enabled;
    }

    /// Whether the checksum's printable form is appended to the automatic
    /// label. Only effective while the checksum itself is enabled.
    pub fn set_display_checksum(&mut self, display: bool) {
        self.display_checksum = display;
    }

    /// The checksum computed by the last successful parse.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn label_source(&self) -> &LabelSource {
        &self.label_source
    }

    /// Choose where the automatic label text comes from. Takes effect at
    /// the next parse.
    pub fn set_label(&mut self, source: LabelSource) {
        self.label_source = source;
    }

    /// Replace the label font with an independent clone of `font`.
    pub fn set_font(&mut self, font: &dyn TextBlock) {
        self.font = font.clone_box();
    }

    // Layout delegates, so common configuration reads like one surface.

    pub fn set_scale(&mut self, scale: u32) -> Result<(), BarraError> {
        self.layout.set_scale(scale)
    }

    pub fn set_offset_x(&mut self, offset_x: u32) {
        self.layout.set_offset_x(offset_x);
    }

    pub fn set_offset_y(&mut self, offset_y: u32) {
        self.layout.set_offset_y(offset_y);
    }

    pub fn set_color(&mut self, fg: impl Into<Color>, bg: impl Into<Color>) {
        self.layout.set_color(fg, bg);
    }

    pub fn add_label(&mut self, label: Label) {
        self.layout.add_label(label);
    }

    /// Validate and commit a payload.
    ///
    /// Runs the symbology's validator first: a rejection raises
    /// [`BarraError::Parse`] and leaves the previously parsed state and
    /// automatic label untouched. On success the text is stored, the
    /// checksum hook runs, and the automatic label is rebuilt.
    pub fn parse(&mut self, text: &str) -> Result<(), BarraError> {
        self.symbology.validate(text)?;

        self.text = text.to_string();
        self.checksum = self.symbology.checksum(text);
        debug!(
            "parsed {:?} (checksum: {:?})",
            self.text,
            self.checksum.as_deref()
        );
        self.refresh_auto_label();
        Ok(())
    }

    /// The checksum to encode into the bars, when enabled.
    fn active_checksum(&self) -> Option<&str> {
        if self.checksum_enabled {
            self.checksum.as_deref()
        } else {
            None
        }
    }

    /// Resolve the automatic label text; `None` drops the label.
    fn label_text(&self) -> Option<String> {
        match &self.label_source {
            LabelSource::None => None,
            LabelSource::Literal(text) => {
                if text.is_empty() {
                    None
                } else {
                    Some(text.clone())
                }
            }
            LabelSource::Auto => {
                if self.text.is_empty() {
                    return None;
                }
                let mut text = self.text.clone();
                if self.checksum_enabled && self.display_checksum {
                    if let Some(checksum) = &self.checksum {
                        text.push_str(checksum);
                    }
                }
                Some(text)
            }
        }
    }

    /// Rebuild the automatic bottom label from the current text.
    fn refresh_auto_label(&mut self) {
        if let Some(index) = self.auto_label.take() {
            self.layout.remove_label(index);
        }
        if let Some(text) = self.label_text() {
            let mut label = Label::new(text, self.font.as_ref());
            label.set_position(Position::Bottom);
            self.layout.add_label(label);
            self.auto_label = Some(self.layout.labels().len() - 1);
        }
    }

    /// Width of the encoded bars in content pixels.
    fn content_width(&self) -> u32 {
        self.symbology
            .encode(&self.text, self.active_checksum())
            .iter()
            .map(Segment::modules)
            .sum()
    }

    /// Index of `key` in the symbology's key table (linear scan).
    pub fn find_index(&self, key: char) -> Option<usize> {
        self.symbology.keys().iter().position(|k| *k == key)
    }

    /// Module pattern for `key`.
    pub fn find_code(&self, key: char) -> Option<&'static str> {
        self.find_index(key).map(|i| self.symbology.codes()[i])
    }

    /// Draw one pattern string, advancing the cursor one unit per module.
    ///
    /// Digit `d` draws `d + 1` modules in the current role; the role flips
    /// after each digit. `start_bar = false` begins on a space.
    pub fn draw_char(
        &self,
        surface: &mut dyn Surface,
        cursor: &mut i32,
        code: &str,
        start_bar: bool,
    ) {
        let mut role = if start_bar {
            PaintRole::Foreground
        } else {
            PaintRole::Background
        };

        for digit in code.chars() {
            let width = digit
                .to_digit(10)
                .expect("module pattern digits must be 0-9")
                + 1;
            for _ in 0..width {
                self.draw_single_bar(surface, *cursor, role);
                *cursor += 1;
            }
            role = role.flip();
        }
    }

    /// One unit-width, full-thickness bar at `x`.
    fn draw_single_bar(&self, surface: &mut dyn Surface, x: i32, role: PaintRole) {
        self.layout
            .draw_filled_rectangle(surface, x, 0, x, self.thickness as i32 - 1, role);
    }
}

impl<S: Symbology> Symbol for Linear<S> {
    fn parse(&mut self, text: &str) -> Result<(), BarraError> {
        Linear::parse(self, text)
    }

    fn dimension(&mut self, extra_w: u32, extra_h: u32) -> (u32, u32) {
        let w = extra_w + self.content_width();
        let h = extra_h + self.thickness;
        self.layout.get_dimension(w, h)
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        let segments = self.symbology.encode(&self.text, self.active_checksum());
        let mut cursor = 0;
        for segment in &segments {
            self.draw_char(surface, &mut cursor, segment.code, segment.start_bar);
        }

        let w = self.content_width() as i32;
        self.layout
            .draw_labels(surface, 0, 0, w, self.thickness as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::RecordingSurface;
    use pretty_assertions::assert_eq;

    /// Minimal two-symbol plugin for exercising the pipeline.
    struct BinaryPairs;

    const PAIR_KEYS: [char; 2] = ['a', 'b'];
    const PAIR_CODES: [&str; 2] = ["11", "101"];

    impl Symbology for BinaryPairs {
        fn keys(&self) -> &'static [char] {
            &PAIR_KEYS
        }

        fn codes(&self) -> &'static [&'static str] {
            &PAIR_CODES
        }

        fn validate(&self, text: &str) -> Result<(), BarraError> {
            if text.is_empty() {
                return Err(BarraError::parse(text, "no data to encode"));
            }
            for (i, ch) in text.chars().enumerate() {
                if !PAIR_KEYS.contains(&ch) {
                    return Err(BarraError::parse(
                        text,
                        format!("character {ch:?} at position {i} is not encodable"),
                    ));
                }
            }
            Ok(())
        }

        fn checksum(&self, _text: &str) -> Option<String> {
            None
        }

        fn encode(&self, text: &str, _checksum: Option<&str>) -> Vec<Segment> {
            text.chars()
                .map(|ch| {
                    let i = PAIR_KEYS.iter().position(|k| *k == ch).unwrap();
                    Segment::bar(PAIR_CODES[i])
                })
                .collect()
        }
    }

    fn pipeline() -> Linear<BinaryPairs> {
        let mut linear = Linear::new(BinaryPairs);
        linear.set_thickness(1).unwrap();
        linear
    }

    /// Foreground rectangles recorded by a draw call.
    fn bars(surface: &RecordingSurface) -> Vec<(i32, i32)> {
        surface
            .rects
            .iter()
            .filter(|(.., rgb)| *rgb == (0, 0, 0))
            .map(|(x1, _, x2, _, _)| (*x1, *x2))
            .collect()
    }

    #[test]
    fn test_draw_char_starting_with_bar() {
        let linear = pipeline();
        let mut surface = RecordingSurface::new(10, 1);
        let mut cursor = 0;
        linear.draw_char(&mut surface, &mut cursor, "11", true);

        // Two foreground modules then two background modules.
        assert_eq!(cursor, 4);
        assert_eq!(bars(&surface), vec![(0, 0), (1, 1)]);
        let spaces: Vec<_> = surface
            .rects
            .iter()
            .filter(|(.., rgb)| *rgb == (255, 255, 255))
            .map(|(x1, ..)| *x1)
            .collect();
        assert_eq!(spaces, vec![2, 3]);
    }

    #[test]
    fn test_draw_char_starting_with_space() {
        let linear = pipeline();
        let mut surface = RecordingSurface::new(10, 1);
        let mut cursor = 0;
        linear.draw_char(&mut surface, &mut cursor, "101", false);

        // 2 spaces, 2 bars, 2 spaces.
        assert_eq!(cursor, 6);
        assert_eq!(bars(&surface), vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn test_cursor_accumulates_across_segments() {
        let linear = pipeline();
        let mut surface = RecordingSurface::new(20, 1);
        let mut cursor = 0;
        linear.draw_char(&mut surface, &mut cursor, "11", true);
        linear.draw_char(&mut surface, &mut cursor, "101", true);
        assert_eq!(cursor, 10);
    }

    #[test]
    fn test_parse_rejects_bad_character_without_side_effects() {
        let mut linear = pipeline();
        linear.parse("ab").unwrap();
        assert_eq!(linear.text(), "ab");
        assert_eq!(linear.layout().labels().len(), 1);

        let err = linear.parse("ax").unwrap_err();
        match err {
            BarraError::Parse { input, message } => {
                assert_eq!(input, "ax");
                assert!(message.contains("'x'"));
                assert!(message.contains("position 1"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        // Prior state untouched.
        assert_eq!(linear.text(), "ab");
        assert_eq!(linear.layout().labels().len(), 1);
        assert_eq!(linear.layout().labels()[0].text(), "ab");
    }

    #[test]
    fn test_parse_empty_rejected() {
        let mut linear = pipeline();
        assert!(matches!(
            linear.parse("").unwrap_err(),
            BarraError::Parse { .. }
        ));
        assert_eq!(linear.layout().labels().len(), 0);
    }

    #[test]
    fn test_reparse_replaces_auto_label() {
        let mut linear = pipeline();
        linear.parse("ab").unwrap();
        linear.parse("ba").unwrap();
        assert_eq!(linear.layout().labels().len(), 1);
        assert_eq!(linear.layout().labels()[0].text(), "ba");
    }

    #[test]
    fn test_label_source_none_suppresses_label() {
        let mut linear = pipeline();
        linear.set_label(LabelSource::None);
        linear.parse("ab").unwrap();
        assert!(linear.layout().labels().is_empty());
    }

    #[test]
    fn test_label_source_literal_wins_over_text() {
        let mut linear = pipeline();
        linear.set_label(LabelSource::Literal("OVERRIDE".into()));
        linear.parse("ab").unwrap();
        assert_eq!(linear.layout().labels()[0].text(), "OVERRIDE");
    }

    #[test]
    fn test_user_labels_survive_reparse() {
        let mut linear = pipeline();
        let user = Label::new("user", linear.font.as_ref());
        linear.add_label(user);
        linear.parse("ab").unwrap();
        linear.parse("ba").unwrap();
        assert_eq!(linear.layout().labels().len(), 2);
        assert_eq!(linear.layout().labels()[0].text(), "user");
        assert_eq!(linear.layout().labels()[1].text(), "ba");
    }

    #[test]
    fn test_thickness_zero_keeps_previous_value() {
        let mut linear = pipeline();
        let err = linear.set_thickness(0).unwrap_err();
        assert!(matches!(
            err,
            BarraError::Config {
                param: "thickness",
                ..
            }
        ));
        assert_eq!(linear.thickness(), 1);
    }

    #[test]
    fn test_find_index_and_code() {
        let linear = pipeline();
        assert_eq!(linear.find_index('b'), Some(1));
        assert_eq!(linear.find_code('b'), Some("101"));
        assert_eq!(linear.find_index('z'), None);
    }

    #[test]
    fn test_dimension_counts_modules_and_label() {
        let mut linear = pipeline();
        linear.set_label(LabelSource::None);
        linear.parse("ab").unwrap();

        // "11" is 4 modules, "101" is 6.
        let (w, h) = linear.dimension(0, 0);
        assert_eq!((w, h), (10, 1));

        // Extra content pixels pass straight through.
        assert_eq!(linear.dimension(5, 3), (15, 4));
    }

    #[test]
    fn test_segment_modules() {
        assert_eq!(Segment::bar("11").modules(), 4);
        assert_eq!(Segment::space("101").modules(), 6);
        assert_eq!(Segment::bar("0").modules(), 1);
    }
}
