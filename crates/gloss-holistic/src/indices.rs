//! Landmark subsets retained by the feature schema.
//!
//! The face mesh carries far more points than sign language needs; only
//! the lip and eye regions are kept. The orders below are load-bearing:
//! they fix the layout of every feature vector ever written, so changing
//! them invalidates stored features.

use crate::PoseLandmark;

/// Number of face-mesh indices retained.
pub const FACE_INDEX_COUNT: usize = 93;

/// Retained face-mesh indices: lips, then left eye, then right eye.
pub const FACE_INDICES: [usize; FACE_INDEX_COUNT] = build_face_indices();

// Half-open index ranges into the 468-point face mesh
const FACE_RANGES: [(usize, usize); 7] = [
    // Lip contours
    (61, 89),
    (308, 325),
    // Left eye region
    (33, 42),
    (133, 144),
    // Right eye region
    (362, 373),
    (382, 390),
    (390, 399),
];

const fn build_face_indices() -> [usize; FACE_INDEX_COUNT] {
    let mut out = [0usize; FACE_INDEX_COUNT];
    let mut i = 0;
    let mut r = 0;
    while r < FACE_RANGES.len() {
        let (start, end) = FACE_RANGES[r];
        let mut v = start;
        while v < end {
            out[i] = v;
            i += 1;
            v += 1;
        }
        r += 1;
    }
    out
}

/// Number of pose indices retained.
pub const POSE_INDEX_COUNT: usize = 7;

/// Retained pose indices: nose, shoulders, elbows, wrists.
pub const POSE_INDICES: [usize; POSE_INDEX_COUNT] = [
    PoseLandmark::Nose as usize,
    PoseLandmark::LeftShoulder as usize,
    PoseLandmark::RightShoulder as usize,
    PoseLandmark::LeftElbow as usize,
    PoseLandmark::RightElbow as usize,
    PoseLandmark::LeftWrist as usize,
    PoseLandmark::RightWrist as usize,
];

/// Hand skeleton edges in MediaPipe hand topology: thumb, index, middle,
/// ring, pinky, plus the palm edges.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // Index finger
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle finger
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring finger
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky and palm
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];
