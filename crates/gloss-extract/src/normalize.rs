//! Translation and scale normalization of the spatial block.
//!
//! Recentres every point on the signer's torso and rescales so shoulder
//! width is constant, making features comparable across camera distances
//! and framings.

use crate::schema::{FACE_SPATIAL_DIM, HAND_SPATIAL_DIM, SPATIAL_DIM};
use gloss_base::Vec3;

// Shoulder width every signer is rescaled to
const SHOULDER_TARGET: f32 = 0.15;
// Shoulder distances at or below this are degenerate; leave scale at 1
const MIN_SHOULDER_DIST: f32 = 1e-4;

const POSE_OFFSET: usize = 2 * HAND_SPATIAL_DIM + FACE_SPATIAL_DIM;

/// Normalize a 426-value spatial block in place.
///
/// The centre is the shoulder midpoint when both shoulders were detected,
/// else the nose, else the left wrist, else the frame centre. Scale is
/// derived from shoulder distance only; without shoulders the block is
/// only translated. Non-finite results are replaced with zero. Slices of
/// any other length are left untouched.
pub fn normalize_spatial(spatial: &mut [f32]) {
    if spatial.len() != SPATIAL_DIM {
        return;
    }

    let nose = point_at(spatial, POSE_OFFSET);
    let left_shoulder = point_at(spatial, POSE_OFFSET + 3);
    let right_shoulder = point_at(spatial, POSE_OFFSET + 6);
    let left_wrist = point_at(spatial, 0);

    let shoulders_present = is_present(left_shoulder) && is_present(right_shoulder);
    let center = if shoulders_present {
        (left_shoulder + right_shoulder) * 0.5
    } else if is_present(nose) {
        nose
    } else if is_present(left_wrist) {
        left_wrist
    } else {
        Vec3::new(0.5, 0.5, 0.0)
    };

    let mut scale = 1.0;
    if shoulders_present {
        let dist = right_shoulder.distance(&left_shoulder);
        if dist > MIN_SHOULDER_DIST {
            scale = SHOULDER_TARGET / dist;
        }
    }

    for chunk in spatial.chunks_exact_mut(3) {
        chunk[0] = finite_or_zero((chunk[0] - center.x) * scale);
        chunk[1] = finite_or_zero((chunk[1] - center.y) * scale);
        chunk[2] = finite_or_zero((chunk[2] - center.z) * scale);
    }
}

fn point_at(spatial: &[f32], offset: usize) -> Vec3<f32> {
    Vec3::new(spatial[offset], spatial[offset + 1], spatial[offset + 2])
}

// Detectors report missing points as exact zeros, so a point counts as
// present only when every component is nonzero.
fn is_present(p: Vec3<f32>) -> bool {
    p.x != 0.0 && p.y != 0.0 && p.z != 0.0
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
