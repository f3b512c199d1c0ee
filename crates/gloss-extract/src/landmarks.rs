//! Flattening of detector output into the spatial feature block.
//!
//! Block order is left hand, right hand, face subset, pose subset, each
//! point as (x, y, z). Undetected parts contribute zeros so the layout
//! never shifts.

use crate::schema::{HAND_SPATIAL_DIM, SPATIAL_DIM};
use gloss_base::Vec3;
use gloss_holistic::indices::{FACE_INDICES, POSE_INDICES};
use gloss_holistic::{HAND_LANDMARK_COUNT, HandLandmarks, LandmarkFrame};

/// Hand points as a fixed array, zeros standing in for an undetected hand.
///
/// Displacement tracking needs a point set for every frame; an absent hand
/// is treated as 21 points parked at the origin rather than a gap.
pub fn hand_points(hand: Option<&HandLandmarks>) -> [Vec3<f32>; HAND_LANDMARK_COUNT] {
    match hand {
        Some(hand) => hand.points,
        None => [Vec3::default(); HAND_LANDMARK_COUNT],
    }
}

/// Flatten one frame's landmarks into the 426-value spatial block.
pub fn extract_spatial(frame: &LandmarkFrame) -> Vec<f32> {
    let mut out = Vec::with_capacity(SPATIAL_DIM);

    for hand in [frame.left_hand.as_ref(), frame.right_hand.as_ref()] {
        match hand {
            Some(hand) => {
                for p in &hand.points {
                    out.extend([p.x, p.y, p.z]);
                }
            }
            None => out.resize(out.len() + HAND_SPATIAL_DIM, 0.0),
        }
    }

    for &idx in FACE_INDICES.iter() {
        let p = indexed_point(frame.face.as_ref().map(|f| f.points.as_slice()), idx);
        out.extend([p.x, p.y, p.z]);
    }

    for &idx in POSE_INDICES.iter() {
        let p = indexed_point(frame.pose.as_ref().map(|p| p.points.as_slice()), idx);
        out.extend([p.x, p.y, p.z]);
    }

    out
}

// A detector that reports a part at all is expected to report the full
// topology, but short point lists degrade to zeros rather than panicking.
fn indexed_point(points: Option<&[Vec3<f32>]>, idx: usize) -> Vec3<f32> {
    points
        .and_then(|pts| pts.get(idx))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_holistic::{FACE_LANDMARK_COUNT, FaceLandmarks, POSE_LANDMARK_COUNT, PoseLandmarks};

    fn hand_at(x: f32, y: f32, z: f32) -> HandLandmarks {
        HandLandmarks {
            points: [Vec3::new(x, y, z); HAND_LANDMARK_COUNT],
        }
    }

    #[test]
    fn empty_frame_is_all_zeros() {
        let out = extract_spatial(&LandmarkFrame::default());
        assert_eq!(out.len(), SPATIAL_DIM);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn hands_land_in_their_blocks() {
        let frame = LandmarkFrame {
            left_hand: Some(hand_at(0.1, 0.2, 0.3)),
            right_hand: Some(hand_at(0.4, 0.5, 0.6)),
            ..Default::default()
        };
        let out = extract_spatial(&frame);
        assert_eq!(out.len(), SPATIAL_DIM);
        assert_eq!(&out[0..3], &[0.1, 0.2, 0.3]);
        assert_eq!(&out[63..66], &[0.4, 0.5, 0.6]);
        // Face and pose were absent
        assert!(out[126..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn face_points_are_picked_by_index() {
        let mut points = vec![Vec3::default(); FACE_LANDMARK_COUNT];
        points[61] = Vec3::new(0.7, 0.8, 0.9);
        let frame = LandmarkFrame {
            face: Some(FaceLandmarks { points }),
            ..Default::default()
        };
        let out = extract_spatial(&frame);
        // Face block starts after both hands; index 61 is the first kept one
        assert_eq!(&out[126..129], &[0.7, 0.8, 0.9]);
    }

    #[test]
    fn pose_points_are_picked_by_index() {
        let mut points = vec![Vec3::default(); POSE_LANDMARK_COUNT];
        points[0] = Vec3::new(0.5, 0.4, 0.0); // nose
        points[11] = Vec3::new(0.3, 0.6, 0.0); // left shoulder
        let frame = LandmarkFrame {
            pose: Some(PoseLandmarks { points }),
            ..Default::default()
        };
        let out = extract_spatial(&frame);
        let pose = &out[SPATIAL_DIM - 21..];
        assert_eq!(&pose[0..3], &[0.5, 0.4, 0.0]);
        assert_eq!(&pose[3..6], &[0.3, 0.6, 0.0]);
    }

    #[test]
    fn short_point_lists_degrade_to_zeros() {
        let frame = LandmarkFrame {
            face: Some(FaceLandmarks {
                points: vec![Vec3::new(1.0, 1.0, 1.0); 10],
            }),
            ..Default::default()
        };
        let out = extract_spatial(&frame);
        assert_eq!(out.len(), SPATIAL_DIM);
        // Lowest kept face index is 33, beyond the 10 supplied points
        assert!(out[126..405].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn hand_points_default_to_origin() {
        let pts = hand_points(None);
        assert!(pts.iter().all(|p| *p == Vec3::default()));
        let hand = hand_at(0.2, 0.2, 0.2);
        assert_eq!(hand_points(Some(&hand))[0], Vec3::new(0.2, 0.2, 0.2));
    }
}
