//! Landmark replay from JSON Lines files.
//!
//! Detector inference often runs as a separate batch job that writes one
//! JSON record per sampled frame. [`ReplayHolistic`] plays such a file
//! back through the [`Holistic`] interface, which keeps feature
//! extraction runnable anywhere without the detector runtime installed.
//!
//! Record format, one object per line:
//!
//! ```json
//! {"left_hand": [[x, y, z], ...], "right_hand": null, "face": [...], "pose": [...]}
//! ```
//!
//! Hands must carry exactly 21 points when present; face and pose may be
//! any length and are padded with zeros downstream.

use crate::{
    FaceLandmarks, HAND_LANDMARK_COUNT, HandLandmarks, Holistic, HolisticError, LandmarkFrame,
    PoseLandmarks,
};
use gloss_base::{Tensor, Vec3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    left_hand: Option<Vec<[f32; 3]>>,
    #[serde(default)]
    right_hand: Option<Vec<[f32; 3]>>,
    #[serde(default)]
    face: Option<Vec<[f32; 3]>>,
    #[serde(default)]
    pose: Option<Vec<[f32; 3]>>,
}

/// Replays pre-recorded landmark frames in order.
///
/// `detect` returns the next recorded frame and fails once the recording
/// is exhausted — a video with more sampled frames than its recording is
/// a mispaired input, not something to silently zero-fill.
#[derive(Debug)]
pub struct ReplayHolistic {
    frames: Vec<LandmarkFrame>,
    cursor: usize,
}

impl ReplayHolistic {
    /// Load a JSON Lines recording. The whole file is validated up front.
    ///
    /// # Errors
    ///
    /// Returns `HolisticError::Data` for unreadable files, unparseable
    /// lines, or hands with the wrong point count.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HolisticError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| HolisticError::Data(format!("cannot read {}: {e}", path.display())))?;
        Self::from_jsonl(&text)
    }

    /// Parse a recording from JSON Lines text.
    pub fn from_jsonl(text: &str) -> Result<Self, HolisticError> {
        let mut frames = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: RecordedFrame = serde_json::from_str(line).map_err(|e| {
                HolisticError::Data(format!("bad landmark record on line {}: {e}", line_no + 1))
            })?;
            frames.push(landmark_frame(record)?);
        }
        Ok(Self::from_frames(frames))
    }

    /// Wrap already-built frames; used by tools and tests.
    pub fn from_frames(frames: Vec<LandmarkFrame>) -> Self {
        ReplayHolistic { frames, cursor: 0 }
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Holistic for ReplayHolistic {
    fn detect(&mut self, _frame: &Tensor<u8>) -> Result<LandmarkFrame, HolisticError> {
        let Some(frame) = self.frames.get(self.cursor) else {
            return Err(HolisticError::Backend(format!(
                "landmark replay exhausted after {} frames",
                self.frames.len()
            )));
        };
        self.cursor += 1;
        Ok(frame.clone())
    }
}

fn landmark_frame(record: RecordedFrame) -> Result<LandmarkFrame, HolisticError> {
    Ok(LandmarkFrame {
        left_hand: record.left_hand.map(hand_landmarks).transpose()?,
        right_hand: record.right_hand.map(hand_landmarks).transpose()?,
        face: record.face.map(|points| FaceLandmarks {
            points: to_vec3(points),
        }),
        pose: record.pose.map(|points| PoseLandmarks {
            points: to_vec3(points),
        }),
    })
}

fn hand_landmarks(raw: Vec<[f32; 3]>) -> Result<HandLandmarks, HolisticError> {
    if raw.len() != HAND_LANDMARK_COUNT {
        return Err(HolisticError::Data(format!(
            "hand record has {} points, expected {HAND_LANDMARK_COUNT}",
            raw.len()
        )));
    }
    let mut points = [Vec3::default(); HAND_LANDMARK_COUNT];
    for (dst, src) in points.iter_mut().zip(raw) {
        *dst = Vec3::new(src[0], src[1], src[2]);
    }
    Ok(HandLandmarks { points })
}

fn to_vec3(raw: Vec<[f32; 3]>) -> Vec<Vec3<f32>> {
    raw.into_iter()
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect()
}
