//! Redundancy filter over rendered hand skeletons.
//!
//! Sign boundaries show up as structural change in the hand skeleton, so
//! the filter rasterizes both hands as line drawings and keeps a frame
//! only when the drawing is both substantial and different from the last
//! kept one. Held poses collapse to a single frame; frames without
//! readable hands never enter the sequence.

use gloss_base::Tensor;
use gloss_holistic::{HAND_CONNECTIONS, HandLandmarks, LandmarkFrame};
use gloss_image::{ImageError, count_nonzero, draw_line, ssim};

/// Outcome of the filter for one sampled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVerdict {
    /// Distinct frame with enough hand signal; enters the sequence
    Keep,
    /// Skeleton raster below the pixel floor: hands absent or unreadable
    TooFewPixels,
    /// Skeleton nearly identical to the last kept frame
    NearDuplicate,
}

/// Stateful per-clip filter. The comparison baseline is the last KEPT
/// skeleton, not the last seen one, so a slow drift across many
/// near-duplicate frames still eventually produces a keep.
#[derive(Debug)]
pub struct RedundancyFilter {
    min_pixels: usize,
    similarity_threshold: f32,
    last_kept: Option<Tensor<u8>>,
}

impl RedundancyFilter {
    pub fn new(min_pixels: usize, similarity_threshold: f32) -> Self {
        RedundancyFilter {
            min_pixels,
            similarity_threshold,
            last_kept: None,
        }
    }

    /// Judge one frame's landmarks at the given raster size.
    ///
    /// The pixel floor is checked first; similarity only applies once a
    /// frame has been kept, so the first substantial frame always passes.
    pub fn evaluate(
        &mut self,
        width: usize,
        height: usize,
        landmarks: &LandmarkFrame,
    ) -> Result<FrameVerdict, ImageError> {
        let mask = render_hand_mask(width, height, landmarks);

        if count_nonzero(&mask.data) < self.min_pixels {
            return Ok(FrameVerdict::TooFewPixels);
        }

        if let Some(last) = &self.last_kept {
            let score = ssim(last, &mask)?;
            if score >= self.similarity_threshold {
                return Ok(FrameVerdict::NearDuplicate);
            }
        }

        self.last_kept = Some(mask);
        Ok(FrameVerdict::Keep)
    }
}

/// Rasterize both hands as a binary line drawing `[H, W]`.
///
/// Each hand contributes one-pixel-wide lines along the standard hand
/// connection topology; undetected hands contribute nothing.
pub fn render_hand_mask(width: usize, height: usize, landmarks: &LandmarkFrame) -> Tensor<u8> {
    let mut buf = vec![0u8; width * height];

    for hand in [landmarks.left_hand.as_ref(), landmarks.right_hand.as_ref()]
        .into_iter()
        .flatten()
    {
        draw_hand(&mut buf, width, height, hand);
    }

    // Length is width * height by construction
    Tensor {
        shape: vec![height, width],
        data: buf,
    }
}

fn draw_hand(buf: &mut [u8], width: usize, height: usize, hand: &HandLandmarks) {
    // Same whole-pixel truncation the motion features use
    let mut px = [(0i32, 0i32); gloss_holistic::HAND_LANDMARK_COUNT];
    for (dst, p) in px.iter_mut().zip(&hand.points) {
        *dst = (
            (p.x * width as f32) as i32,
            (p.y * height as f32) as i32,
        );
    }

    for &(a, b) in HAND_CONNECTIONS.iter() {
        let (x0, y0) = px[a];
        let (x1, y1) = px[b];
        draw_line(buf, width, height, x0, y0, x1, y1, 255);
    }
}
