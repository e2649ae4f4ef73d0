//! # Error Types
//!
//! This module defines error types used throughout the barra library.

use thiserror::Error;

/// Main error type for barra operations
#[derive(Debug, Error)]
pub enum BarraError {
    /// A setter was given an out-of-range value. The previous value is kept.
    #[error("Invalid {param}: {message}")]
    Config {
        param: &'static str,
        message: String,
    },

    /// Input text rejected by a symbology during parsing
    #[error("Cannot encode {input:?}: {message}")]
    Parse { input: String, message: String },

    /// No render target available for the requested output format
    #[error("Render target error: {0}")]
    RenderTarget(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl BarraError {
    /// Shorthand for a configuration error on a named parameter.
    pub(crate) fn config(param: &'static str, message: impl Into<String>) -> Self {
        BarraError::Config {
            param,
            message: message.into(),
        }
    }

    /// Shorthand for a parse rejection of the given input.
    pub(crate) fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        BarraError::Parse {
            input: input.into(),
            message: message.into(),
        }
    }
}
