//! The codec trait.

use std::path::Path;

use texport_dds::DxgiFormat;

use crate::{Result, Texture};

/// Output image container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerFormat {
    #[default]
    Tiff,
    Png,
}

impl ContainerFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tiff => "tif",
            Self::Png => "png",
        }
    }
}

/// A texture codec: decodes DDS streams, converts pixel formats and encodes
/// image containers.
///
/// Implementations are shared between worker threads; every texture they
/// return is owned by the caller.
pub trait TextureCodec: Send + Sync {
    /// Load the top surface of a serialized DDS stream.
    ///
    /// Returns `Ok(None)` when the stream parses but holds no image.
    fn load_dds(&self, bytes: &[u8]) -> Result<Option<Texture>>;

    /// Decode a block-compressed texture into `target`.
    fn decompress(&self, image: &Texture, target: DxgiFormat) -> Result<Texture>;

    /// Convert an uncompressed texture into `target`.
    fn convert(&self, image: &Texture, target: DxgiFormat) -> Result<Texture>;

    /// Encode a texture into an image container at `path`.
    fn encode_to_container(
        &self,
        image: &Texture,
        container: ContainerFormat,
        path: &Path,
    ) -> Result<()>;

    fn is_compressed(&self, format: DxgiFormat) -> bool {
        format.is_compressed()
    }

    fn is_srgb(&self, format: DxgiFormat) -> bool {
        format.is_srgb()
    }

    fn bits_per_pixel(&self, format: DxgiFormat) -> u32 {
        format.bits_per_pixel()
    }

    /// Bring any texture into `target`, decompressing when needed.
    fn to_format(&self, image: &Texture, target: DxgiFormat) -> Result<Texture> {
        if self.is_compressed(image.format()) {
            self.decompress(image, target)
        } else if image.format() == target {
            Ok(image.clone())
        } else {
            self.convert(image, target)
        }
    }
}
