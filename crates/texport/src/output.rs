//! Output targets and derived output paths.

use std::path::{Path, PathBuf};

use texport_codec::ContainerFormat;
use texport_dds::alpha_surface_path;

use crate::{Error, Result};

/// Where a conversion writes its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write exactly this file.
    File(PathBuf),
    /// Write `<stem>.<ext>` into this directory, or next to the input when
    /// `None`.
    Directory(Option<PathBuf>),
}

impl OutputTarget {
    /// Interpret a user-supplied output path.
    ///
    /// A path with an image extension (`tif`, `tiff`, `png`) names a file;
    /// anything else is a directory. No path means "next to the input".
    pub fn from_cli_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::Directory(None);
        };

        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "tif" | "tiff" | "png"))
            .unwrap_or(false);

        if is_image {
            Self::File(path.to_path_buf())
        } else {
            Self::Directory(Some(path.to_path_buf()))
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// Every path a single conversion may write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputPlan {
    /// Final image.
    pub image: PathBuf,
    /// Reassembled raw DDS.
    pub raw_dds: PathBuf,
    /// Reassembled raw alpha surface, written with its magic restored.
    pub raw_alpha_dds: PathBuf,
    /// Separated gloss image.
    pub gloss: Option<PathBuf>,
    /// Directory to create before writing, in directory mode.
    pub directory: Option<PathBuf>,
}

impl OutputPlan {
    /// Derive output paths for `input` without touching the filesystem
    /// beyond checking whether an alpha surface exists.
    pub fn resolve(
        input: &Path,
        target: &OutputTarget,
        container: ContainerFormat,
        separate_gloss: bool,
    ) -> Result<Self> {
        let stem = input
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::InvalidOutputTarget(format!("input {} has no file name", input.display()))
            })?
            .to_string_lossy()
            .into_owned();

        match target {
            OutputTarget::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(Error::InvalidOutputTarget("output path is empty".into()));
                }
                if separate_gloss && alpha_surface_path(input).is_file() {
                    return Err(Error::InvalidOutputTarget(
                        "gloss separation needs a directory output".into(),
                    ));
                }
                let out_stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| stem.clone());
                Ok(Self {
                    image: path.clone(),
                    raw_dds: path.with_extension("dds"),
                    raw_alpha_dds: path.with_file_name(format!("{out_stem}_alpha.dds")),
                    gloss: None,
                    directory: None,
                })
            }
            OutputTarget::Directory(dir) => {
                let dir = match dir {
                    Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
                    _ => input
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| PathBuf::from(".")),
                };
                let ext = container.extension();
                Ok(Self {
                    image: dir.join(format!("{stem}.{ext}")),
                    raw_dds: dir.join(format!("{stem}.dds")),
                    raw_alpha_dds: dir.join(format!("{stem}_alpha.dds")),
                    gloss: separate_gloss.then(|| dir.join(format!("{stem}_alpha.{ext}"))),
                    directory: Some(dir),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cli_path() {
        assert_eq!(OutputTarget::from_cli_path(None), OutputTarget::Directory(None));
        assert_eq!(
            OutputTarget::from_cli_path(Some(Path::new("out/rock.TIF"))),
            OutputTarget::File(PathBuf::from("out/rock.TIF"))
        );
        assert_eq!(
            OutputTarget::from_cli_path(Some(Path::new("out/rock.png"))),
            OutputTarget::File(PathBuf::from("out/rock.png"))
        );
        assert_eq!(
            OutputTarget::from_cli_path(Some(Path::new("out/textures"))),
            OutputTarget::Directory(Some(PathBuf::from("out/textures")))
        );
    }

    #[test]
    fn test_directory_plan() {
        let plan = OutputPlan::resolve(
            Path::new("in/rock_diff.dds"),
            &OutputTarget::Directory(Some("out".into())),
            ContainerFormat::Tiff,
            true,
        )
        .unwrap();

        assert_eq!(plan.image, PathBuf::from("out/rock_diff.tif"));
        assert_eq!(plan.raw_dds, PathBuf::from("out/rock_diff.dds"));
        assert_eq!(plan.raw_alpha_dds, PathBuf::from("out/rock_diff_alpha.dds"));
        assert_eq!(plan.gloss, Some(PathBuf::from("out/rock_diff_alpha.tif")));
        assert_eq!(plan.directory, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_directory_next_to_input() {
        let plan = OutputPlan::resolve(
            Path::new("in/rock_diff.dds"),
            &OutputTarget::Directory(None),
            ContainerFormat::Png,
            false,
        )
        .unwrap();

        assert_eq!(plan.image, PathBuf::from("in/rock_diff.png"));
        assert_eq!(plan.raw_dds, PathBuf::from("in/rock_diff.dds"));
        assert_eq!(plan.gloss, None);

        let bare = OutputPlan::resolve(
            Path::new("rock.dds"),
            &OutputTarget::Directory(None),
            ContainerFormat::Tiff,
            false,
        )
        .unwrap();
        assert_eq!(bare.image, PathBuf::from("./rock.tif"));
    }

    #[test]
    fn test_file_plan() {
        let plan = OutputPlan::resolve(
            Path::new("in/rock.dds"),
            &OutputTarget::File("out/final.tif".into()),
            ContainerFormat::Tiff,
            false,
        )
        .unwrap();

        assert_eq!(plan.image, PathBuf::from("out/final.tif"));
        assert_eq!(plan.raw_dds, PathBuf::from("out/final.dds"));
        assert_eq!(plan.raw_alpha_dds, PathBuf::from("out/final_alpha.dds"));
        assert_eq!(plan.directory, None);
    }

    #[test]
    fn test_empty_file_target_is_rejected() {
        assert!(matches!(
            OutputPlan::resolve(
                Path::new("in/rock.dds"),
                &OutputTarget::File(PathBuf::new()),
                ContainerFormat::Tiff,
                false,
            ),
            Err(Error::InvalidOutputTarget(_))
        ));
    }

    #[test]
    fn test_gloss_with_file_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("metal.dds");
        std::fs::write(alpha_surface_path(&input), b"").unwrap();

        assert!(matches!(
            OutputPlan::resolve(
                &input,
                &OutputTarget::File(dir.path().join("metal.tif")),
                ContainerFormat::Tiff,
                true,
            ),
            Err(Error::InvalidOutputTarget(_))
        ));

        // Without an alpha surface there is nothing to separate.
        let other = dir.path().join("plain.dds");
        assert!(OutputPlan::resolve(
            &other,
            &OutputTarget::File(dir.path().join("plain.tif")),
            ContainerFormat::Tiff,
            true,
        )
        .is_ok());
    }
}
