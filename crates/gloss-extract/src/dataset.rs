//! Batch extraction over a dataset directory tree.
//!
//! Training datasets are laid out as `<root>/<gloss>/<clip>`, one
//! subdirectory per gloss label, where each clip is a video file or a
//! directory of numbered frame images. [`extract_dataset`] walks that
//! tree, extracts every clip, and writes the results under an output
//! directory mirroring the layout:
//!
//! - `<out>/<gloss>/<clip>.f32` — raw little-endian `f32` values,
//!   row-major `[max_sequence_length, pose_vector_dim]`
//! - `<out>/manifest.json` — a [`FeatureManifest`] naming every written
//!   file together with the [`FeatureSchema`] the values follow
//!
//! A clip that fails to extract is logged and skipped; a half-broken
//! dataset still yields features for every readable clip.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::pipeline::extract_clip;
use crate::schema::FeatureSchema;
use crate::sequence::PaddedFeatureSequence;
use gloss_base::Tensor;
use gloss_holistic::{Holistic, HolisticError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Manifest file name inside the output directory.
pub const MANIFEST_NAME: &str = "manifest.json";

/// One extracted clip in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Gloss label, taken from the dataset subdirectory name
    pub gloss: String,
    /// Clip name without extension
    pub clip: String,
    /// Rows carrying real frames in the written matrix
    pub frames: usize,
    /// Feature file path relative to the manifest
    pub file: String,
}

/// Index of an extracted dataset.
///
/// Consumers check the embedded schema before touching any feature file;
/// mixing layouts silently mis-slices every vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureManifest {
    pub schema: FeatureSchema,
    pub entries: Vec<ManifestEntry>,
}

impl FeatureManifest {
    /// Write the manifest as JSON.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), ExtractError> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| ExtractError::Schema(format!("manifest encode failed: {e}")))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Read a manifest back and verify its schema matches this build.
    ///
    /// # Errors
    ///
    /// `ExtractError::Schema` for unparseable manifests and for manifests
    /// written under a different feature layout.
    pub fn load(path: impl AsRef<Path>) -> Result<FeatureManifest, ExtractError> {
        let text = fs::read_to_string(path)?;
        let manifest: FeatureManifest = serde_json::from_str(&text)
            .map_err(|e| ExtractError::Schema(format!("manifest parse failed: {e}")))?;

        let current = FeatureSchema::current();
        if !manifest.schema.is_compatible(&current) {
            return Err(ExtractError::Schema(format!(
                "manifest written under schema version {}, this build reads version {}",
                manifest.schema.version, current.version
            )));
        }
        Ok(manifest)
    }
}

/// Write a padded sequence as raw little-endian `f32` values.
pub fn write_features(
    path: impl AsRef<Path>,
    sequence: &PaddedFeatureSequence,
) -> Result<(), ExtractError> {
    let mut bytes = Vec::with_capacity(sequence.features.data.len() * 4);
    for value in &sequence.features.data {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a feature file written by [`write_features`].
///
/// The file carries no header; `schema` supplies the expected shape, and
/// any size mismatch is rejected rather than guessed at.
///
/// # Errors
///
/// `ExtractError::Schema` when the file size does not match the schema's
/// `[max_sequence_length, pose_vector_dim]` shape.
pub fn read_features(
    path: impl AsRef<Path>,
    schema: &FeatureSchema,
) -> Result<Tensor<f32>, ExtractError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    let expected = schema.max_sequence_length * schema.pose_vector_dim * 4;
    if bytes.len() != expected {
        return Err(ExtractError::Schema(format!(
            "{} holds {} bytes, expected {expected} for a [{}, {}] matrix",
            path.display(),
            bytes.len(),
            schema.max_sequence_length,
            schema.pose_vector_dim
        )));
    }

    let data = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(Tensor::new(
        vec![schema.max_sequence_length, schema.pose_vector_dim],
        data,
    )?)
}

/// Extract every clip under `root` and write features plus a manifest
/// under `out_dir`.
///
/// `make_detector` is called once per clip with the clip path, so each
/// clip gets a fresh detector and the caller decides where its landmark
/// data lives (for replay detectors, typically a sidecar file next to
/// the clip).
///
/// Per-clip failures — unreadable video, mispaired landmark recording,
/// no usable frames — are logged and skipped. Errors touching the
/// dataset as a whole (unreadable root, failed feature write) abort.
pub fn extract_dataset<H, F>(
    root: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    config: &ExtractConfig,
    make_detector: F,
) -> Result<FeatureManifest, ExtractError>
where
    H: Holistic,
    F: Fn(&Path) -> Result<H, HolisticError>,
{
    let root = root.as_ref();
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut glosses = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            glosses.push(path);
        }
    }
    // Directory listing order is filesystem-dependent; sort for a
    // reproducible manifest
    glosses.sort();

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for gloss_dir in &glosses {
        let Some(gloss) = gloss_dir.file_name() else {
            continue;
        };
        let gloss = gloss.to_string_lossy().into_owned();

        let mut clips = Vec::new();
        for entry in fs::read_dir(gloss_dir)? {
            let path = entry?.path();
            if is_clip(&path) {
                clips.push(path);
            }
        }
        clips.sort();

        if clips.is_empty() {
            warn!("no clips under {}", gloss_dir.display());
            continue;
        }
        fs::create_dir_all(out_dir.join(&gloss))?;

        for clip_path in &clips {
            let Some(stem) = clip_path.file_stem() else {
                continue;
            };
            let clip = stem.to_string_lossy().into_owned();

            let sequence = match extract_clip(clip_path, config, || make_detector(clip_path)) {
                Ok(sequence) => sequence,
                Err(err) => {
                    warn!("skipping {}: {err}", clip_path.display());
                    skipped += 1;
                    continue;
                }
            };

            let file = format!("{gloss}/{clip}.f32");
            write_features(out_dir.join(&file), &sequence)?;
            debug!("wrote {file}: {} frames", sequence.frame_count);

            entries.push(ManifestEntry {
                gloss: gloss.clone(),
                clip,
                frames: sequence.frame_count,
                file,
            });
        }
    }

    let manifest = FeatureManifest {
        schema: FeatureSchema::current(),
        entries,
    };
    manifest.store(out_dir.join(MANIFEST_NAME))?;
    info!(
        "dataset done: {} clips extracted, {skipped} skipped",
        manifest.entries.len()
    );
    Ok(manifest)
}

// A clip is a video file or a directory of frame images; landmark
// sidecar files and the like are not clips.
fn is_clip(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "mp4" | "avi" | "mov" | "mkv" | "webm"
    )
}
