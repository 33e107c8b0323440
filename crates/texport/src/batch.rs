//! Parallel batch conversion using rayon.
//!
//! Every asset is converted independently on the rayon pool. A failing
//! asset is recorded in the [`BatchReport`] and the rest of the batch keeps
//! going.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rayon::prelude::*;
use texport_codec::TextureCodec;
use tracing::warn;
use walkdir::WalkDir;

use crate::{ConvertOptions, ConvertReport, Converter, OutputTarget, Result};

/// Per-asset outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<ConvertReport>)>,
}

impl BatchReport {
    /// Reports of the assets that converted.
    pub fn succeeded(&self) -> impl Iterator<Item = &ConvertReport> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    /// Assets that failed, with their error.
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &crate::Error)> {
        self.results
            .iter()
            .filter_map(|(p, r)| r.as_ref().err().map(|e| (p.as_path(), e)))
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}

/// Collect the `*.dds` files (any case) under `dir`, sorted.
pub fn collect_inputs<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(dir.as_ref()).min_depth(1);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    let mut inputs = Vec::new();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        let is_dds = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("dds"))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_dds {
            inputs.push(entry.into_path());
        }
    }
    inputs.sort();
    Ok(inputs)
}

impl<C: TextureCodec> Converter<C> {
    /// Convert many assets in parallel.
    ///
    /// With an output directory, each input's directory relative to `root`
    /// is mirrored below it; without one, images land next to their inputs.
    /// The progress callback receives (completed, total) counts.
    pub fn convert_batch<F>(
        &self,
        root: &Path,
        inputs: &[PathBuf],
        output_dir: Option<&Path>,
        options: &ConvertOptions,
        mut progress: F,
    ) -> BatchReport
    where
        F: FnMut(usize, usize) + Send,
    {
        let total = inputs.len();
        let completed = AtomicUsize::new(0);
        let progress = Mutex::new(&mut progress);

        let results = inputs
            .par_iter()
            .map(|input| {
                let dir = output_dir.map(|out| mirrored_dir(root, input, out));
                let target = OutputTarget::Directory(dir);
                let result = self.convert(input, &target, options);

                if let Err(e) = &result {
                    warn!(path = %input.display(), error = %e, "conversion failed");
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                (progress.lock())(done, total);

                (input.clone(), result)
            })
            .collect();

        BatchReport { results }
    }
}

/// `out` joined with the directory of `input` relative to `root`.
fn mirrored_dir(root: &Path, input: &Path, out: &Path) -> PathBuf {
    input
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|rel| out.join(rel))
        .unwrap_or_else(|| out.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_mirrored_dir() {
        let root = Path::new("/game/textures");

        assert_eq!(
            mirrored_dir(root, Path::new("/game/textures/rock/a.dds"), Path::new("/out")),
            PathBuf::from("/out/rock")
        );
        assert_eq!(
            mirrored_dir(root, Path::new("/game/textures/a.dds"), Path::new("/out")),
            PathBuf::from("/out")
        );
        assert_eq!(
            mirrored_dir(root, Path::new("/elsewhere/a.dds"), Path::new("/out")),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn test_collect_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        for name in ["a.dds", "b.DDS", "a.dds.1", "a.dds.a", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::write(nested.join("c.dds"), b"").unwrap();

        let top = collect_inputs(dir.path(), false).unwrap();
        assert_eq!(top, vec![dir.path().join("a.dds"), dir.path().join("b.DDS")]);

        let all = collect_inputs(dir.path(), true).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&nested.join("c.dds")));
    }
}
