//! Texport - game texture conversion library.
//!
//! Converts DDS textures whose mip chain is split across numbered sidecar
//! files (and whose gloss may live in a separate alpha surface) into single
//! TIFF images, rebuilding normal-map Z, recombining alpha and quantizing
//! identifier maps on the way.
//!
//! # Crates
//!
//! - [`texport_common`] - Binary reading
//! - [`texport_dds`] - DDS headers and mip-chain reassembly
//! - [`texport_pixel`] - Pixel transforms on decoded float buffers
//! - [`texport_codec`] - Codec boundary (decode, convert, encode)
//!
//! # Example
//!
//! ```no_run
//! use texport::prelude::*;
//!
//! let converter = Converter::new(ImageDdsCodec::new());
//! let report = converter.convert(
//!     "textures/rock_ddna.dds",
//!     &OutputTarget::Directory(Some("out".into())),
//!     &ConvertOptions::default(),
//! )?;
//! println!("{:?}: {:?}", report.kind, report.written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod batch;
mod classify;
mod convert;
mod error;
mod output;

// Re-export all sub-crates
pub use texport_codec as codec;
pub use texport_common as common;
pub use texport_dds as dds;
pub use texport_pixel as pixel;

pub use batch::{collect_inputs, BatchReport};
pub use classify::{classify, is_id_map, TextureKind};
pub use convert::{ConvertOptions, ConvertReport, Converter};
pub use error::{Error, Result};
pub use output::OutputTarget;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        collect_inputs, BatchReport, ConvertOptions, ConvertReport, Converter, OutputTarget,
        TextureKind,
    };
    pub use texport_codec::{ContainerFormat, ImageDdsCodec, Texture, TextureCodec};
    pub use texport_dds::{DdsFile, DxgiFormat, MagicMode, MipChain};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
