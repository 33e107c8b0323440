//! DDS texture handling for split game assets.
//!
//! Game asset pipelines store one texture across several files:
//! - `texture.dds` - Header plus the tail of the mip chain
//! - `texture.dds.1`, `texture.dds.2`, ... - Numbered mip sidecars
//! - `texture.dds.a` - Optional separate alpha/gloss surface (no magic)
//! - `texture.dds.1a`, `texture.dds.2a`, ... - Its numbered mip sidecars
//!
//! This crate parses and writes the DDS container and reassembles these
//! pieces into complete, size-checked DDS images.
//!
//! # Example
//!
//! ```no_run
//! use texport_dds::MipChain;
//!
//! // Bits per pixel normally comes from the texture codec.
//! let chain = MipChain::load("path/to/texture.dds", |format| format.bits_per_pixel())?;
//! chain.color().save("merged.dds")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file;
mod format;
mod header;
mod mipchain;

pub use error::{Error, Result};
pub use file::{DdsFile, MagicMode};
pub use format::DxgiFormat;
pub use header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC, Header};
pub use mipchain::{
    alpha_surface_path, assemble_payload, discover_sidecars, expected_payload_size, sidecar_path,
    MipChain, SidecarKind, MAX_SIDECAR_INDEX,
};

/// DDS file magic ("DDS " read as a little-endian u32).
pub const DDS_MAGIC: u32 = 0x2053_4444;
