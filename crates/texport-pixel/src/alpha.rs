//! Alpha channel merge.

use byteorder::{ByteOrder, LittleEndian};

use crate::buffer::{RGBA_F32_STRIDE, R_F32_STRIDE};
use crate::{Error, Result};

/// Overwrite the alpha channel of an RGBA32F buffer from an R32F buffer.
///
/// Both buffers must hold the same number of pixels; nothing is written
/// otherwise.
pub fn merge_alpha(rgba: &mut [u8], alpha: &[u8]) -> Result<()> {
    let color_pixels = rgba.len() / RGBA_F32_STRIDE;
    let alpha_pixels = alpha.len() / R_F32_STRIDE;
    if color_pixels != alpha_pixels {
        return Err(Error::BufferLengthMismatch {
            color_pixels,
            alpha_pixels,
        });
    }

    for (pixel, a) in rgba
        .chunks_exact_mut(RGBA_F32_STRIDE)
        .zip(alpha.chunks_exact(R_F32_STRIDE))
    {
        LittleEndian::write_f32(&mut pixel[12..16], LittleEndian::read_f32(a));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bytes_to_f32s, f32s_to_bytes};

    #[test]
    fn test_merge_replaces_alpha_only() {
        let mut rgba = f32s_to_bytes(&[1.0, 0.0, 0.0, 9.0, 0.0, 1.0, 0.0, 9.0]);
        let alpha = f32s_to_bytes(&[0.25, 0.75]);

        merge_alpha(&mut rgba, &alpha).unwrap();

        assert_eq!(
            bytes_to_f32s(&rgba),
            vec![1.0, 0.0, 0.0, 0.25, 0.0, 1.0, 0.0, 0.75]
        );
    }

    #[test]
    fn test_merge_rejects_short_alpha() {
        let original = f32s_to_bytes(&[1.0, 0.0, 0.0, 9.0, 0.0, 1.0, 0.0, 9.0]);
        let mut rgba = original.clone();
        let alpha = f32s_to_bytes(&[0.25]);

        match merge_alpha(&mut rgba, &alpha) {
            Err(Error::BufferLengthMismatch {
                color_pixels,
                alpha_pixels,
            }) => {
                assert_eq!(color_pixels, 2);
                assert_eq!(alpha_pixels, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(rgba, original);
    }

    #[test]
    fn test_merge_rejects_long_alpha() {
        let mut rgba = f32s_to_bytes(&[0.0; 4]);
        let alpha = f32s_to_bytes(&[0.5, 0.5]);

        assert!(merge_alpha(&mut rgba, &alpha).is_err());
    }

    #[test]
    fn test_merge_empty() {
        let mut rgba = Vec::new();
        merge_alpha(&mut rgba, &[]).unwrap();
        assert!(rgba.is_empty());
    }
}
