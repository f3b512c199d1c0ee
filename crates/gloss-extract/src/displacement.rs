//! Motion features between consecutive sampled frames.
//!
//! Two complementary measurements per hand: optical flow of the landmark
//! pixels between the previous and current gray frames, and the raw
//! difference of detector coordinates. Flow captures image-space motion
//! even when the detector jitters; coordinate differences capture depth
//! and survive texture-poor regions where flow cannot lock on.

use crate::schema::{DISPLACEMENT_DIM, FLOW_DISPLACEMENT_DIM, LANDMARK_DISPLACEMENT_DIM};
use gloss_base::{Tensor, Vec2, Vec3};
use gloss_holistic::HAND_LANDMARK_COUNT;
use gloss_image::{ImageError, LkParams, track_points};

/// State carried from the previous sampled frame.
///
/// Updated after every sampled frame whether or not it is kept, so
/// displacement is always measured against the immediately preceding
/// sample rather than the last kept one.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    /// Previous frame as gray `[H, W]`
    pub gray: Tensor<u8>,
    /// Previous left-hand points, zeros when the hand was absent
    pub left: [Vec3<f32>; HAND_LANDMARK_COUNT],
    /// Previous right-hand points, zeros when the hand was absent
    pub right: [Vec3<f32>; HAND_LANDMARK_COUNT],
}

/// The displacement block for a frame with no predecessor.
pub fn zero_displacement() -> Vec<f32> {
    vec![0.0; DISPLACEMENT_DIM]
}

/// Compute the 210-value displacement block against the previous frame.
///
/// Layout: left-hand flow dx (21), left dy (21), right dx (21), right dy
/// (21), then per-point coordinate deltas (dx, dy, dz) for the left hand
/// (63) and the right hand (63). Flow displacements are normalized by the
/// frame dimensions so they live in roughly the same range as the
/// coordinate deltas.
pub fn displacement_features(
    history: &FrameHistory,
    current_gray: &Tensor<u8>,
    current_left: &[Vec3<f32>; HAND_LANDMARK_COUNT],
    current_right: &[Vec3<f32>; HAND_LANDMARK_COUNT],
    params: &LkParams,
) -> Result<Vec<f32>, ImageError> {
    let (height, width) = match current_gray.shape.as_slice() {
        [h, w] => (*h, *w),
        other => {
            return Err(ImageError::Shape(format!(
                "expected gray [H, W] frame, got {other:?}"
            )));
        }
    };

    let mut out = Vec::with_capacity(DISPLACEMENT_DIM);

    for prev_points in [&history.left, &history.right] {
        let starts = pixel_starts(prev_points, width, height);
        let tracked = track_points(&history.gray, current_gray, &starts, params)?;
        for (next, start) in tracked.iter().zip(&starts) {
            out.push((next.x - start.x) / width as f32);
        }
        for (next, start) in tracked.iter().zip(&starts) {
            out.push((next.y - start.y) / height as f32);
        }
    }
    debug_assert_eq!(out.len(), FLOW_DISPLACEMENT_DIM);

    for (current, previous) in [(current_left, &history.left), (current_right, &history.right)] {
        for (c, p) in current.iter().zip(previous) {
            let d = *c - *p;
            out.extend([d.x, d.y, d.z]);
        }
    }
    debug_assert_eq!(out.len(), FLOW_DISPLACEMENT_DIM + LANDMARK_DISPLACEMENT_DIM);

    Ok(out)
}

// Landmark coordinates mapped to whole pixels, truncated toward zero.
// Truncation (not rounding) is part of the trained feature definition.
fn pixel_starts(
    points: &[Vec3<f32>; HAND_LANDMARK_COUNT],
    width: usize,
    height: usize,
) -> Vec<Vec2<f32>> {
    points
        .iter()
        .map(|p| Vec2::new((p.x * width as f32).trunc(), (p.y * height as f32).trunc()))
        .collect()
}
