//! Error types for pixel transforms.

use thiserror::Error;

/// Errors raised by pixel transforms.
#[derive(Debug, Error)]
pub enum Error {
    /// The color and alpha buffers describe different pixel counts.
    #[error("buffer length mismatch: {color_pixels} color pixels, {alpha_pixels} alpha pixels")]
    BufferLengthMismatch {
        color_pixels: usize,
        alpha_pixels: usize,
    },
}

/// Result type for pixel transforms.
pub type Result<T> = std::result::Result<T, Error>;
