//! Assembly of kept frames into the fixed-shape model input.

use crate::error::ExtractError;
use crate::schema::POSE_VECTOR_DIM;
use gloss_base::Tensor;

/// Kept per-frame feature vectors, in keep order, before shaping.
pub type FeatureSequence = Vec<Vec<f32>>;

/// Fixed-shape feature matrix ready for the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedFeatureSequence {
    /// Feature matrix `[max_frames, 636]`, zero rows past `frame_count`
    pub features: Tensor<f32>,
    /// Rows carrying real frames; the rest is padding
    pub frame_count: usize,
}

impl PaddedFeatureSequence {
    /// One frame's feature vector.
    pub fn row(&self, index: usize) -> &[f32] {
        &self.features.data[index * POSE_VECTOR_DIM..(index + 1) * POSE_VECTOR_DIM]
    }

    /// Total rows including padding.
    pub fn max_frames(&self) -> usize {
        self.features.shape[0]
    }
}

/// Shape a variable-length sequence to exactly `max_frames` rows.
///
/// Sequences longer than `max_frames` keep their earliest frames; the
/// opening of a sign carries the discriminative motion, and by this point
/// redundant frames have already been filtered out. Shorter sequences are
/// padded with zero rows at the end.
///
/// # Errors
///
/// Returns `ExtractError::NoSignal` for an empty sequence and
/// `ExtractError::Schema` if any row is not 636 wide.
pub fn pad_sequence(
    frames: FeatureSequence,
    max_frames: usize,
) -> Result<PaddedFeatureSequence, ExtractError> {
    if frames.is_empty() {
        return Err(ExtractError::NoSignal);
    }
    if let Some(bad) = frames.iter().find(|f| f.len() != POSE_VECTOR_DIM) {
        return Err(ExtractError::Schema(format!(
            "frame vector has {} values, expected {POSE_VECTOR_DIM}",
            bad.len()
        )));
    }

    let frame_count = frames.len().min(max_frames);
    let mut data = vec![0.0f32; max_frames * POSE_VECTOR_DIM];
    for (row, frame) in frames.iter().take(max_frames).enumerate() {
        data[row * POSE_VECTOR_DIM..(row + 1) * POSE_VECTOR_DIM].copy_from_slice(frame);
    }

    Ok(PaddedFeatureSequence {
        features: Tensor::new(vec![max_frames, POSE_VECTOR_DIM], data)?,
        frame_count,
    })
}
