use gloss_base::Vec3;

/// Landmarks per detected hand.
pub const HAND_LANDMARK_COUNT: usize = 21;
/// Landmarks in a full face mesh.
pub const FACE_LANDMARK_COUNT: usize = 468;
/// Landmarks in the body pose topology.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// One detected hand: 21 points in MediaPipe hand topology order
/// (wrist, then thumb through pinky, base to tip).
///
/// Coordinates are normalized to the frame: x and y in `[0, 1]`, z the
/// detector's relative depth.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandLandmarks {
    pub points: [Vec3<f32>; HAND_LANDMARK_COUNT],
}

/// Face mesh landmarks. A full-mesh detector produces
/// [`FACE_LANDMARK_COUNT`] points; consumers index into this and treat
/// missing points as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceLandmarks {
    pub points: Vec<Vec3<f32>>,
}

/// Body pose landmarks, [`POSE_LANDMARK_COUNT`] points when complete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoseLandmarks {
    pub points: Vec<Vec3<f32>>,
}

/// Everything a detector found in one frame. Parts it did not find are
/// `None`; a frame with no person at all is all-`None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkFrame {
    pub left_hand: Option<HandLandmarks>,
    pub right_hand: Option<HandLandmarks>,
    pub face: Option<FaceLandmarks>,
    pub pose: Option<PoseLandmarks>,
}

impl LandmarkFrame {
    /// True when at least one hand was detected.
    pub fn has_hands(&self) -> bool {
        self.left_hand.is_some() || self.right_hand.is_some()
    }
}

/// Named indices into the 33-point pose topology for the landmarks the
/// feature schema keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLandmark {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
}
