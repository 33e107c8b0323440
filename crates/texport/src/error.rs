//! Error types for texture conversion.

use thiserror::Error;

/// Errors that end the conversion of one asset.
#[derive(Debug, Error)]
pub enum Error {
    /// DDS parsing or mip-chain assembly failed.
    #[error(transparent)]
    Dds(#[from] texport_dds::Error),

    /// The codec failed.
    #[error(transparent)]
    Codec(#[from] texport_codec::Error),

    /// A pixel transform rejected its input.
    #[error(transparent)]
    Pixel(#[from] texport_pixel::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The codec produced no image for a reassembled surface.
    #[error("codec returned no image for the {surface} surface")]
    MissingDecodedImage { surface: &'static str },

    /// The output target is empty or cannot serve the requested mode.
    #[error("invalid output target: {0}")]
    InvalidOutputTarget(String),
}

/// Result type for conversion.
pub type Result<T> = std::result::Result<T, Error>;
