use crate::{HolisticError, LandmarkFrame};
use gloss_base::Tensor;

/// A whole-body landmark detector: hands, face, and pose in one pass.
///
/// One instance serves one clip. Implementations are stateful — video
/// detectors track between frames, replay adapters hold a cursor — so
/// `detect` takes `&mut self` and callers construct a fresh detector per
/// clip rather than sharing one across streams.
pub trait Holistic {
    /// Detect landmarks on an RGB frame `[H, W, 3]`.
    ///
    /// A frame with nobody in it is not an error: the result is simply a
    /// [`LandmarkFrame`] with every part `None`.
    fn detect(&mut self, frame: &Tensor<u8>) -> Result<LandmarkFrame, HolisticError>;
}
