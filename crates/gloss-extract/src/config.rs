use crate::schema::MAX_SEQUENCE_LENGTH;
use gloss_image::LkParams;
use gloss_video::SamplePolicy;

/// Tuning knobs for feature extraction.
///
/// The defaults reproduce the pipeline the downstream classifier was
/// trained against; changing any of them produces features the model has
/// never seen, so overrides are for experiments, not serving.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Width every frame is resized to before detection
    pub frame_width: usize,
    /// Height every frame is resized to before detection
    pub frame_height: usize,
    /// How the incoming frame stream is thinned
    pub sample_policy: SamplePolicy,
    /// Skeleton rasters with fewer lit pixels than this are discarded
    pub min_skeleton_pixels: usize,
    /// Frames whose skeleton scores at or above this against the last
    /// kept frame are discarded as duplicates
    pub similarity_threshold: f32,
    /// Output sequence length after padding or truncation
    pub max_frames: usize,
    /// Optical flow tracker parameters
    pub flow: LkParams,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            frame_width: 320,
            frame_height: 240,
            sample_policy: SamplePolicy::default(),
            min_skeleton_pixels: 50,
            similarity_threshold: 0.99,
            max_frames: MAX_SEQUENCE_LENGTH,
            flow: LkParams::default(),
        }
    }
}

impl ExtractConfig {
    /// Set the working resolution (builder pattern)
    pub fn with_frame_size(mut self, width: usize, height: usize) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    /// Set the frame sampling policy (builder pattern)
    pub fn with_sample_policy(mut self, policy: SamplePolicy) -> Self {
        self.sample_policy = policy;
        self
    }

    /// Set the skeleton pixel floor (builder pattern)
    pub fn with_min_skeleton_pixels(mut self, pixels: usize) -> Self {
        self.min_skeleton_pixels = pixels;
        self
    }

    /// Set the duplicate similarity threshold (builder pattern)
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the padded sequence length (builder pattern)
    pub fn with_max_frames(mut self, frames: usize) -> Self {
        self.max_frames = frames;
        self
    }

    /// Set the optical flow parameters (builder pattern)
    pub fn with_flow(mut self, params: LkParams) -> Self {
        self.flow = params;
        self
    }
}
