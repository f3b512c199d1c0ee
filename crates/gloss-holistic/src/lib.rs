pub mod error;
pub mod holistic;
pub mod indices;
pub mod replay;
pub mod types;

pub use error::HolisticError;
pub use holistic::Holistic;
pub use indices::{FACE_INDEX_COUNT, FACE_INDICES, HAND_CONNECTIONS, POSE_INDEX_COUNT, POSE_INDICES};
pub use replay::ReplayHolistic;
pub use types::{
    FACE_LANDMARK_COUNT, FaceLandmarks, HAND_LANDMARK_COUNT, HandLandmarks, LandmarkFrame,
    POSE_LANDMARK_COUNT, PoseLandmark, PoseLandmarks,
};
