//! Texture classification.

use std::path::Path;

use texport_dds::DxgiFormat;

/// How an asset's pixels are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Two-channel tangent-space normal map; Z is rebuilt.
    Normal,
    /// Identifier map (`*_id`); quantized without rounding up.
    Id,
    /// Albedo and everything else.
    Color,
}

/// Whether the file stem ends in `_id` (any case).
pub fn is_id_map(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase().ends_with("_id"))
        .unwrap_or(false)
}

/// Classify an asset by its decoded format and file name.
///
/// A normal-map format wins over the `_id` suffix.
pub fn classify(path: &Path, format: DxgiFormat) -> TextureKind {
    if format.is_two_channel_block() {
        TextureKind::Normal
    } else if is_id_map(path) {
        TextureKind::Id
    } else {
        TextureKind::Color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_suffix_any_case() {
        assert!(is_id_map(Path::new("a/b/cloth_id.dds")));
        assert!(is_id_map(Path::new("cloth_ID.DDS")));
        assert!(!is_id_map(Path::new("cloth_idx.dds")));
        assert!(!is_id_map(Path::new("cloth_id.dds.1")));
        assert!(!is_id_map(Path::new("")));
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            classify(Path::new("rock_ddna.dds"), DxgiFormat::BC5_SNORM),
            TextureKind::Normal
        );
        assert_eq!(
            classify(Path::new("rock_ddna.dds"), DxgiFormat::BC5_UNORM),
            TextureKind::Normal
        );
        assert_eq!(
            classify(Path::new("rock_id.dds"), DxgiFormat::BC1_UNORM_SRGB),
            TextureKind::Id
        );
        assert_eq!(
            classify(Path::new("rock_diff.dds"), DxgiFormat::BC7_UNORM),
            TextureKind::Color
        );
    }

    #[test]
    fn test_normal_wins_over_id_suffix() {
        assert_eq!(
            classify(Path::new("rock_id.dds"), DxgiFormat::BC5_UNORM),
            TextureKind::Normal
        );
    }
}
