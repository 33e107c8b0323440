//! Per-asset conversion pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use texport_codec::{ContainerFormat, ImageDdsCodec, Texture, TextureCodec};
use texport_dds::{DdsFile, DxgiFormat, MipChain};
use texport_pixel::{merge_alpha, quantize_id, reconstruct_normal_z};
use tracing::{debug, info, info_span};

use crate::output::OutputPlan;
use crate::{classify, Error, OutputTarget, Result, TextureKind};

/// Switches for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// Also write the reassembled DDS.
    pub save_raw_dds: bool,
    /// Write the alpha surface as its own image instead of merging it.
    pub separate_gloss: bool,
    /// Delete the consumed source files after a successful conversion.
    pub delete_source: bool,
    /// Container for written images.
    pub container: ContainerFormat,
}

/// What a successful conversion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Base DDS path.
    pub source: PathBuf,
    /// Classification the pipeline applied.
    pub kind: TextureKind,
    /// Format of the decoded color surface.
    pub format: DxgiFormat,
    /// Files written, final image last.
    pub written: Vec<PathBuf>,
    /// Source files removed.
    pub deleted: Vec<PathBuf>,
}

/// Converts split DDS assets to images through a [`TextureCodec`].
///
/// A converter holds no per-asset state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Converter<C = ImageDdsCodec> {
    codec: C,
}

impl<C: TextureCodec> Converter<C> {
    /// Create a converter using `codec`.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Get the codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Convert one asset.
    ///
    /// Output paths are validated before anything is read. Source files are
    /// only deleted once every output has been written.
    pub fn convert<P: AsRef<Path>>(
        &self,
        path: P,
        target: &OutputTarget,
        options: &ConvertOptions,
    ) -> Result<ConvertReport> {
        let path = path.as_ref();
        let span = info_span!("convert", path = %path.display());
        let _enter = span.enter();

        let plan = OutputPlan::resolve(path, target, options.container, options.separate_gloss)?;

        let chain = MipChain::load(path, |format| self.codec.bits_per_pixel(format))?;

        if let Some(dir) = &plan.directory {
            fs::create_dir_all(dir)?;
        }

        let mut written = Vec::new();
        if options.save_raw_dds {
            // In directory mode an existing raw file is only replaced when
            // the sources are deleted.
            let overwrite = plan.directory.is_none() || options.delete_source;
            if save_raw(chain.color(), &plan.raw_dds, overwrite)? {
                written.push(plan.raw_dds.clone());
            }
            if let Some(alpha) = chain.alpha() {
                if save_raw(alpha, &plan.raw_alpha_dds, overwrite)? {
                    written.push(plan.raw_alpha_dds.clone());
                }
            }
        }

        let color = self.load(chain.color(), "color")?;
        let alpha = chain
            .alpha()
            .map(|alpha| self.load(alpha, "alpha"))
            .transpose()?;

        let format = color.format();
        let kind = classify(path, format);
        let srgb = self.codec.is_srgb(format);
        debug!(?kind, %format, srgb, has_alpha = alpha.is_some(), "classified texture");

        let mut work = self.codec.to_format(&color, DxgiFormat::R32G32B32A32_FLOAT)?;
        drop(color);

        if kind == TextureKind::Normal {
            reconstruct_normal_z(work.pixels_mut(), true);
        }

        if let Some(alpha) = alpha {
            match &plan.gloss {
                Some(gloss_path) => {
                    let gloss = self.codec.to_format(&alpha, DxgiFormat::R8_UNORM)?;
                    self.codec
                        .encode_to_container(&gloss, options.container, gloss_path)?;
                    info!(path = %gloss_path.display(), "wrote gloss image");
                    written.push(gloss_path.clone());
                }
                None => {
                    let alpha = self.codec.to_format(&alpha, DxgiFormat::R32_FLOAT)?;
                    merge_alpha(work.pixels_mut(), alpha.pixels())?;
                }
            }
        }

        let output = match kind {
            TextureKind::Normal => work,
            TextureKind::Id => Texture::new(
                work.width(),
                work.height(),
                DxgiFormat::R8G8B8A8_UNORM,
                quantize_id(work.pixels(), srgb),
            ),
            TextureKind::Color => {
                let target = if srgb {
                    DxgiFormat::R8G8B8A8_UNORM_SRGB
                } else {
                    DxgiFormat::R8G8B8A8_UNORM
                };
                self.codec.convert(&work, target)?
            }
        };

        self.codec
            .encode_to_container(&output, options.container, &plan.image)?;
        info!(path = %plan.image.display(), ?kind, "wrote image");
        written.push(plan.image.clone());

        let deleted = if options.delete_source {
            delete_sources(&chain, options.save_raw_dds.then_some(plan.raw_dds.as_path()))?
        } else {
            Vec::new()
        };

        Ok(ConvertReport {
            source: path.to_path_buf(),
            kind,
            format,
            written,
            deleted,
        })
    }

    /// Reassemble `path` and write only the raw DDS to `output`.
    pub fn merge_raw<P, Q>(&self, path: P, output: Q) -> Result<MipChain>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let chain = MipChain::load(path.as_ref(), |format| self.codec.bits_per_pixel(format))?;
        chain.color().save(output.as_ref())?;
        info!(path = %output.as_ref().display(), "wrote raw DDS");
        Ok(chain)
    }

    fn load(&self, file: &DdsFile, surface: &'static str) -> Result<Texture> {
        self.codec
            .load_dds(&file.to_bytes())?
            .ok_or(Error::MissingDecodedImage { surface })
    }
}

/// Write a reassembled surface unless `path` exists and may not be replaced.
fn save_raw(file: &DdsFile, path: &Path, overwrite: bool) -> Result<bool> {
    if !overwrite && path.exists() {
        debug!(path = %path.display(), "kept existing raw DDS");
        return Ok(false);
    }
    file.save(path)?;
    info!(path = %path.display(), "wrote raw DDS");
    Ok(true)
}

/// Remove every consumed source file.
///
/// The base file and its `.a` surface both stay when the raw DDS export was
/// written over the base file itself.
fn delete_sources(chain: &MipChain, raw_export: Option<&Path>) -> Result<Vec<PathBuf>> {
    let keep_base = raw_export
        .map(|raw| same_file(raw, chain.base_path()))
        .unwrap_or(false);

    let mut candidates: Vec<PathBuf> = chain
        .color_sidecars()
        .iter()
        .chain(chain.alpha_sidecars())
        .cloned()
        .collect();
    if !keep_base {
        candidates.extend(chain.base_files());
    }

    let mut deleted = Vec::with_capacity(candidates.len());
    for file in candidates {
        if file.is_file() {
            fs::remove_file(&file)?;
            debug!(path = %file.display(), "deleted source file");
            deleted.push(file);
        }
    }
    Ok(deleted)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
