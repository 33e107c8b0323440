//! Split mip-chain reassembly.
//!
//! The base file carries the header and the smallest levels. Each numbered
//! sidecar carries one more, larger level, so the complete payload is the
//! highest-numbered sidecar first and the base payload last:
//!
//! ```text
//! [ .N ][ .N-1 ] ... [ .1 ][ base payload ]
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{DdsFile, DxgiFormat, Error, MagicMode, Result};

/// Highest sidecar index looked up.
pub const MAX_SIDECAR_INDEX: u32 = 63;

/// Which surface a sidecar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarKind {
    /// `<base>.<n>`
    Color,
    /// `<base>.<n>a`
    Alpha,
}

impl SidecarKind {
    fn label(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Alpha => "alpha",
        }
    }
}

fn append_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of sidecar `index` for `base`.
pub fn sidecar_path(base: &Path, index: u32, kind: SidecarKind) -> PathBuf {
    match kind {
        SidecarKind::Color => append_suffix(base, &format!(".{index}")),
        SidecarKind::Alpha => append_suffix(base, &format!(".{index}a")),
    }
}

/// Path of the separate alpha surface (`<base>.a`).
pub fn alpha_surface_path(base: &Path) -> PathBuf {
    append_suffix(base, ".a")
}

/// Find the sidecars of `base`, in index order starting at 1.
///
/// The scan stops at the first missing index.
pub fn discover_sidecars(base: &Path, kind: SidecarKind) -> Vec<PathBuf> {
    let found: Vec<PathBuf> = (1..=MAX_SIDECAR_INDEX)
        .map(|index| sidecar_path(base, index, kind))
        .take_while(|path| path.is_file())
        .collect();

    debug!(
        base = %base.display(),
        kind = kind.label(),
        count = found.len(),
        "discovered mip sidecars"
    );
    found
}

/// Concatenate sidecar payloads (given in index order) in front of the base
/// payload, highest index first.
pub fn assemble_payload<B: AsRef<[u8]>>(sidecars: &[B], base: &[u8]) -> Vec<u8> {
    let total = sidecars.iter().map(|s| s.as_ref().len()).sum::<usize>() + base.len();
    let mut out = Vec::with_capacity(total);
    for sidecar in sidecars.iter().rev() {
        out.extend_from_slice(sidecar.as_ref());
    }
    out.extend_from_slice(base);
    out
}

/// Expected payload size in bytes of a full mip pyramid.
///
/// Each level after the first holds a quarter of the previous level's bits;
/// the running bit total is converted to bytes at the end.
pub fn expected_payload_size(bits_per_pixel: u32, width: u32, height: u32, mip_count: u32) -> u64 {
    let mut level = u64::from(width) * u64::from(height) * u64::from(bits_per_pixel);
    let mut total = level;
    for _ in 1..mip_count {
        level /= 4;
        total += level;
    }
    total / 8
}

/// A texture with its mip chain (and optional alpha surface) reassembled.
#[derive(Debug, Clone)]
pub struct MipChain {
    base_path: PathBuf,
    color: DdsFile,
    alpha: Option<DdsFile>,
    color_sidecars: Vec<PathBuf>,
    alpha_sidecars: Vec<PathBuf>,
}

impl MipChain {
    /// Load `base` and everything split off from it.
    ///
    /// `bits_per_pixel` sizes the expected pyramid for a format. A format
    /// reported as 0 bpp is never rejected.
    pub fn load<P, F>(base: P, bits_per_pixel: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(DxgiFormat) -> u32,
    {
        let base = base.as_ref();

        let color_sidecars = discover_sidecars(base, SidecarKind::Color);
        let alpha_sidecars = discover_sidecars(base, SidecarKind::Alpha);

        let color = assemble_surface(
            base,
            MagicMode::Expect,
            &color_sidecars,
            SidecarKind::Color,
            &bits_per_pixel,
        )?;

        let alpha_path = alpha_surface_path(base);
        let alpha = if alpha_path.is_file() {
            Some(assemble_surface(
                &alpha_path,
                MagicMode::Trimmed,
                &alpha_sidecars,
                SidecarKind::Alpha,
                &bits_per_pixel,
            )?)
        } else {
            None
        };

        Ok(Self {
            base_path: base.to_path_buf(),
            color,
            alpha,
            color_sidecars,
            alpha_sidecars,
        })
    }

    /// The base `.dds` path this chain was loaded from.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The reassembled color surface.
    pub fn color(&self) -> &DdsFile {
        &self.color
    }

    /// The reassembled alpha surface, if the texture has one.
    pub fn alpha(&self) -> Option<&DdsFile> {
        self.alpha.as_ref()
    }

    /// Color sidecars consumed, in index order.
    pub fn color_sidecars(&self) -> &[PathBuf] {
        &self.color_sidecars
    }

    /// Alpha sidecars consumed, in index order.
    pub fn alpha_sidecars(&self) -> &[PathBuf] {
        &self.alpha_sidecars
    }

    /// The base file and the `.a` surface, when present.
    pub fn base_files(&self) -> Vec<PathBuf> {
        let mut files = vec![self.base_path.clone()];
        if self.alpha.is_some() {
            files.push(alpha_surface_path(&self.base_path));
        }
        files
    }

    /// Split into the color surface and the optional alpha surface.
    pub fn into_surfaces(self) -> (DdsFile, Option<DdsFile>) {
        (self.color, self.alpha)
    }
}

fn assemble_surface<F>(
    path: &Path,
    magic: MagicMode,
    sidecars: &[PathBuf],
    kind: SidecarKind,
    bits_per_pixel: &F,
) -> Result<DdsFile>
where
    F: Fn(DxgiFormat) -> u32,
{
    let file = DdsFile::open(path, magic)?;

    let pieces = sidecars
        .iter()
        .map(fs::read)
        .collect::<std::io::Result<Vec<_>>>()?;
    let payload = assemble_payload(&pieces, file.data());

    let header = file.header();
    let expected = expected_payload_size(
        bits_per_pixel(header.pixel_format()),
        header.width(),
        header.height(),
        header.mipmap_count(),
    );
    let actual = payload.len() as u64;

    debug!(
        path = %path.display(),
        format = %header.pixel_format(),
        expected,
        actual,
        "assembled {} surface",
        kind.label()
    );

    if actual < expected {
        return Err(Error::IncompleteMipChain {
            surface: kind.label(),
            expected,
            actual,
        });
    }

    Ok(file.with_payload(payload))
}
