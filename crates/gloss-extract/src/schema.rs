//! Fixed layout of the per-frame feature vector.
//!
//! Downstream consumers index into the flat vector by offset, so any change
//! here is a breaking change and must bump [`FEATURE_SCHEMA_VERSION`].

use gloss_holistic::HAND_LANDMARK_COUNT;
use gloss_holistic::indices::{FACE_INDEX_COUNT, POSE_INDEX_COUNT};
use serde::{Deserialize, Serialize};

/// Bumped whenever the feature layout below changes shape or ordering.
pub const FEATURE_SCHEMA_VERSION: u32 = 9;

/// One hand: 21 landmarks, (x, y, z) each.
pub const HAND_SPATIAL_DIM: usize = HAND_LANDMARK_COUNT * 3;

/// Face subset: mouth and eye contours, (x, y, z) each.
pub const FACE_SPATIAL_DIM: usize = FACE_INDEX_COUNT * 3;

/// Upper-body pose subset, (x, y, z) each.
pub const POSE_SPATIAL_DIM: usize = POSE_INDEX_COUNT * 3;

/// Spatial block: left hand, right hand, face subset, pose subset.
pub const SPATIAL_DIM: usize = 2 * HAND_SPATIAL_DIM + FACE_SPATIAL_DIM + POSE_SPATIAL_DIM;

/// Optical-flow block: dx then dy for each hand's 21 tracked points,
/// left hand first.
pub const FLOW_DISPLACEMENT_DIM: usize = 4 * HAND_LANDMARK_COUNT;

/// Landmark-difference block: per-point (dx, dy, dz) for both hands,
/// left hand first.
pub const LANDMARK_DISPLACEMENT_DIM: usize = 2 * HAND_LANDMARK_COUNT * 3;

/// Displacement block: optical flow followed by landmark differences.
pub const DISPLACEMENT_DIM: usize = FLOW_DISPLACEMENT_DIM + LANDMARK_DISPLACEMENT_DIM;

/// Full per-frame vector: spatial block followed by displacement block.
pub const POSE_VECTOR_DIM: usize = SPATIAL_DIM + DISPLACEMENT_DIM;

/// Sequences are padded or truncated to exactly this many frames.
pub const MAX_SEQUENCE_LENGTH: usize = 40;

/// Self-describing layout record, stored next to exported features so a
/// consumer can refuse data written under a different layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub spatial_dim: usize,
    pub displacement_dim: usize,
    pub pose_vector_dim: usize,
    pub max_sequence_length: usize,
}

impl FeatureSchema {
    pub fn current() -> FeatureSchema {
        FeatureSchema {
            version: FEATURE_SCHEMA_VERSION,
            spatial_dim: SPATIAL_DIM,
            displacement_dim: DISPLACEMENT_DIM,
            pose_vector_dim: POSE_VECTOR_DIM,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Layouts are compatible only when identical.
    pub fn is_compatible(&self, other: &FeatureSchema) -> bool {
        self == other
    }
}
