//! Conversions between float slices and their byte representation.

use byteorder::{ByteOrder, LittleEndian};

/// Bytes per RGBA32F pixel.
pub const RGBA_F32_STRIDE: usize = 16;

/// Bytes per R32F pixel.
pub const R_F32_STRIDE: usize = 4;

/// Encode floats as little-endian bytes.
pub fn f32s_to_bytes(values: &[f32]) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * 4];
    LittleEndian::write_f32_into(values, &mut bytes);
    bytes
}

/// Decode little-endian bytes into floats, ignoring a trailing partial value.
pub fn bytes_to_f32s(bytes: &[u8]) -> Vec<f32> {
    let whole = bytes.len() / 4 * 4;
    let mut values = vec![0f32; whole / 4];
    LittleEndian::read_f32_into(&bytes[..whole], &mut values);
    values
}
