//! Pixel transforms over decoded float buffers.
//!
//! Buffers are flat byte slices of little-endian `f32` values in channel
//! order, the layout a texture codec hands back after decoding to
//! `R32G32B32A32_FLOAT` or `R32_FLOAT`. Every function here is pure.
//!
//! - [`reconstruct_normal_z`] - Rebuild Z of a two-channel normal map
//! - [`merge_alpha`] - Copy a single-channel surface into the alpha channel
//! - [`quantize_id`] - Reduce an identifier map to 8 bits without rounding up

mod alpha;
mod buffer;
mod error;
mod id;
mod normal;

pub use alpha::merge_alpha;
pub use buffer::{bytes_to_f32s, f32s_to_bytes, RGBA_F32_STRIDE, R_F32_STRIDE};
pub use error::{Error, Result};
pub use id::quantize_id;
pub use normal::reconstruct_normal_z;
