//! Texture codec boundary.
//!
//! The conversion pipeline never touches block-compression math or image
//! containers itself. It talks to a [`TextureCodec`], which loads DDS
//! streams into owned [`Texture`] values, changes their pixel format and
//! writes them out as TIFF or PNG.
//!
//! [`ImageDdsCodec`] is the stock implementation, decoding with `image_dds`
//! and encoding with `image`.

mod codec;
mod color;
mod error;
mod image_dds_codec;
mod texture;

pub use codec::{ContainerFormat, TextureCodec};
pub use error::{Error, Result};
pub use image_dds_codec::ImageDdsCodec;
pub use texture::Texture;

pub use texport_dds::DxgiFormat;
