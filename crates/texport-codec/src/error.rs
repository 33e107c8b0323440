//! Error types for the codec boundary.

use texport_dds::DxgiFormat;
use thiserror::Error;

/// Errors raised by a texture codec.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The DDS stream could not be parsed by the codec.
    #[error("DDS read error: {0}")]
    Dds(String),

    /// Block decoding failed.
    #[error("surface decode error: {0}")]
    Surface(String),

    /// Container encoding failed.
    #[error("image encode error: {0}")]
    Image(#[from] image::ImageError),

    /// The codec has no support for this format in this operation.
    #[error("unsupported format {format} for {operation}")]
    UnsupportedFormat {
        format: DxgiFormat,
        operation: &'static str,
    },

    /// `decompress` was asked to work on an uncompressed texture.
    #[error("texture format {0} is not block-compressed")]
    NotCompressed(DxgiFormat),

    /// Pixel storage does not match the texture's dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidPixelBuffer { expected: usize, actual: usize },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
