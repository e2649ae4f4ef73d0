//! # Code 39
//!
//! Code 39 encodes A-Z, 0-9, space, and `- . $ / % +`. Every symbol is
//! nine modules (three of them wide), framed by `*` start/stop symbols and
//! separated by a narrow gap. The checksum is optional: the sum of the
//! symbol values modulo 43, appended as one extra symbol.

use crate::error::BarraError;
use crate::linear::{Linear, Segment, Symbology};

/// Symbol identifiers, in checksum-value order. `*` is the framing symbol
/// and carries no value.
const KEYS: [char; 44] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '-', '.',
    ' ', '$', '/', '+', '%', '*',
];

/// Nine-module patterns: `0` is a narrow module, `1` a wide one, bars and
/// spaces alternating starting on a bar.
const CODES: [&str; 44] = [
    "000110100", // 0
    "100100001", // 1
    "001100001", // 2
    "101100000", // 3
    "000110001", // 4
    "100110000", // 5
    "001110000", // 6
    "000100101", // 7
    "100100100", // 8
    "001100100", // 9
    "100001001", // A
    "001001001", // B
    "101001000", // C
    "000011001", // D
    "100011000", // E
    "001011000", // F
    "000001101", // G
    "100001100", // H
    "001001100", // I
    "000011100", // J
    "100000011", // K
    "001000011", // L
    "101000010", // M
    "000010011", // N
    "100010010", // O
    "001010010", // P
    "000000111", // Q
    "100000110", // R
    "001000110", // S
    "000010110", // T
    "110000001", // U
    "011000001", // V
    "111000000", // W
    "010010001", // X
    "110010000", // Y
    "011010000", // Z
    "010000101", // -
    "110000100", // .
    "011000100", // space
    "010101000", // $
    "010100010", // /
    "010001010", // +
    "000101010", // %
    "010010100", // *
];

/// The narrow inter-character gap, drawn as a single space module.
const GAP: &str = "0";

/// Code 39 symbology plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Code39;

impl Code39 {
    fn index_of(key: char) -> Option<usize> {
        KEYS.iter().position(|k| *k == key)
    }
}

impl Symbology for Code39 {
    fn keys(&self) -> &'static [char] {
        &KEYS
    }

    fn codes(&self) -> &'static [&'static str] {
        &CODES
    }

    fn validate(&self, text: &str) -> Result<(), BarraError> {
        if text.is_empty() {
            return Err(BarraError::parse(text, "no data to encode"));
        }

        for (i, ch) in text.chars().enumerate() {
            if ch == '*' || Self::index_of(ch).is_none() {
                return Err(BarraError::parse(
                    text,
                    format!("character {ch:?} at position {i} is not encodable in Code 39"),
                ));
            }
        }

        Ok(())
    }

    fn checksum(&self, text: &str) -> Option<String> {
        let sum: usize = text
            .chars()
            .map(|ch| Self::index_of(ch).expect("validated text contains only table symbols"))
            .sum();
        Some(KEYS[sum % 43].to_string())
    }

    fn encode(&self, text: &str, checksum: Option<&str>) -> Vec<Segment> {
        let symbols = std::iter::once('*')
            .chain(text.chars())
            .chain(checksum.into_iter().flat_map(str::chars))
            .chain(std::iter::once('*'));

        let mut segments = Vec::new();
        for symbol in symbols {
            let index =
                Self::index_of(symbol).expect("validated text contains only table symbols");
            segments.push(Segment::bar(CODES[index]));
            segments.push(Segment::space(GAP));
        }
        segments
    }
}

impl Linear<Code39> {
    /// Create a Code 39 barcode.
    pub fn code39() -> Self {
        Linear::new(Code39)
    }
}
