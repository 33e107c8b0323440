//! Common utilities for Texport.
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from byte slices
//! - [`Error`] / [`Result`] - Errors raised while reading binary data

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
