//! Error types for DDS handling.

use thiserror::Error;

/// Errors that can occur when working with DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] texport_common::Error),

    /// A fixed-size field did not hold its required value.
    #[error("corrupt DDS header: {field} is {actual}, expected {expected}")]
    CorruptHeader {
        field: &'static str,
        expected: u32,
        actual: u32,
    },

    /// Reassembled payload is shorter than the declared mip pyramid.
    #[error("incomplete {surface} mip chain: expected at least {expected} bytes, got {actual}")]
    IncompleteMipChain {
        surface: &'static str,
        expected: u64,
        actual: u64,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
