//! The per-clip extraction fold.
//!
//! One pass over the frame stream: sample, resize, detect, measure
//! motion against the previous sample, filter redundant frames, and
//! accumulate the survivors. Single-threaded on purpose; every stage
//! depends on state from the previous frame, so the clip is the unit of
//! parallelism, not the frame.

use crate::config::ExtractConfig;
use crate::displacement::{FrameHistory, displacement_features, zero_displacement};
use crate::error::ExtractError;
use crate::filter::{FrameVerdict, RedundancyFilter};
use crate::landmarks::{extract_spatial, hand_points};
use crate::normalize::normalize_spatial;
use crate::schema::POSE_VECTOR_DIM;
use crate::sequence::{FeatureSequence, PaddedFeatureSequence, pad_sequence};
use gloss_holistic::{Holistic, HolisticError};
use gloss_image::{resize_bilinear, rgb_to_gray};
use gloss_video::{FfmpegSource, FrameSampler, FrameSource, ImageDirSource};
use log::{debug, info, warn};
use std::path::Path;

/// Run the extraction fold over an open frame source.
///
/// The detector is borrowed for the duration of one clip; detectors are
/// stateful across frames (they track), so a detector must never be
/// shared between clips without being recreated.
///
/// # Errors
///
/// Source, detector, and image failures abort the clip. A clip that
/// reads fine but yields no kept frames returns
/// [`ExtractError::NoSignal`].
pub fn extract_features<S, H>(
    source: &mut S,
    detector: &mut H,
    config: &ExtractConfig,
) -> Result<PaddedFeatureSequence, ExtractError>
where
    S: FrameSource,
    H: Holistic,
{
    let mut sampler = FrameSampler::new(config.sample_policy, source.frame_rate());
    let mut filter = RedundancyFilter::new(config.min_skeleton_pixels, config.similarity_threshold);
    let mut history: Option<FrameHistory> = None;
    let mut frames: FeatureSequence = Vec::new();

    let mut read = 0u64;
    let mut sampled = 0u64;
    let mut faint = 0u64;
    let mut duplicates = 0u64;

    while let Some(frame) = source.next_frame()? {
        read += 1;
        if !sampler.admit() {
            continue;
        }
        sampled += 1;

        let rgb = frame.into_rgb()?;
        let resized = resize_bilinear(&rgb, config.frame_width, config.frame_height)?;
        let landmarks = detector.detect(&resized)?;
        let gray = rgb_to_gray(&resized)?;

        let left = hand_points(landmarks.left_hand.as_ref());
        let right = hand_points(landmarks.right_hand.as_ref());

        let mut vector = extract_spatial(&landmarks);
        normalize_spatial(&mut vector);

        let displacement = match &history {
            Some(prev) => displacement_features(prev, &gray, &left, &right, &config.flow)?,
            None => zero_displacement(),
        };
        vector.extend_from_slice(&displacement);

        if vector.len() != POSE_VECTOR_DIM {
            // A malformed vector must not poison the motion baseline
            warn!(
                "dropping frame {read}: {} feature values, expected {POSE_VECTOR_DIM}",
                vector.len()
            );
            continue;
        }

        let verdict = filter.evaluate(config.frame_width, config.frame_height, &landmarks)?;
        history = Some(FrameHistory { gray, left, right });

        match verdict {
            FrameVerdict::Keep => frames.push(vector),
            FrameVerdict::TooFewPixels => faint += 1,
            FrameVerdict::NearDuplicate => duplicates += 1,
        }
    }

    debug!(
        "clip done: {read} read, {sampled} sampled, {} kept, {faint} faint, {duplicates} duplicate",
        frames.len()
    );

    pad_sequence(frames, config.max_frames)
}

/// Open a video file and extract its feature sequence.
///
/// The detector is built only after the source opens, so a missing or
/// unreadable file fails before any detector resources are spent, and
/// it is dropped when the clip ends.
///
/// # Errors
///
/// `ExtractError::Source` when the file cannot be opened or decoded,
/// plus everything [`extract_features`] returns.
pub fn extract_from_path<H, F>(
    path: impl AsRef<Path>,
    config: &ExtractConfig,
    make_detector: F,
) -> Result<PaddedFeatureSequence, ExtractError>
where
    H: Holistic,
    F: FnOnce() -> Result<H, HolisticError>,
{
    let path = path.as_ref();
    let mut source = FfmpegSource::open(path)?;
    info!("extracting {}", path.display());

    let mut detector = make_detector()?;
    extract_features(&mut source, &mut detector, config)
}

/// Extract from a clip stored either as a video file or as a directory
/// of numbered frame images.
///
/// Datasets exported as frame dumps skip the ffmpeg dependency entirely;
/// everything else goes through [`extract_from_path`].
///
/// # Errors
///
/// Everything [`extract_from_path`] returns.
pub fn extract_clip<H, F>(
    path: impl AsRef<Path>,
    config: &ExtractConfig,
    make_detector: F,
) -> Result<PaddedFeatureSequence, ExtractError>
where
    H: Holistic,
    F: FnOnce() -> Result<H, HolisticError>,
{
    let path = path.as_ref();
    if !path.is_dir() {
        return extract_from_path(path, config, make_detector);
    }

    let mut source = ImageDirSource::open(path)?;
    info!("extracting {}", path.display());

    let mut detector = make_detector()?;
    extract_features(&mut source, &mut detector, config)
}

/// Async wrapper around [`extract_features`] for use inside a runtime.
///
/// Extraction is seconds of CPU work, so it runs on the blocking pool;
/// the source and detector move into the task and are dropped there.
pub async fn extract_features_async<S, H>(
    mut source: S,
    mut detector: H,
    config: ExtractConfig,
) -> Result<PaddedFeatureSequence, ExtractError>
where
    S: FrameSource + Send + 'static,
    H: Holistic + Send + 'static,
{
    tokio::task::spawn_blocking(move || extract_features(&mut source, &mut detector, &config))
        .await
        .map_err(|e| ExtractError::Runtime(format!("extraction task failed: {e}")))?
}
