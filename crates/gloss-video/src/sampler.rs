/// Sampling interval used when a source reports no usable frame rate.
pub const DEFAULT_SAMPLE_INTERVAL: usize = 3;

// Reported rates outside this range are treated as container nonsense
const MIN_PLAUSIBLE_FPS: f64 = 1.0;
const MAX_PLAUSIBLE_FPS: f64 = 240.0;

/// How to thin a frame stream before processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplePolicy {
    /// Keep every nth frame, regardless of the source frame rate
    Every(usize),
    /// Derive the interval from the source frame rate to approximate a
    /// target processing rate
    TargetFps(f64),
}

impl Default for SamplePolicy {
    fn default() -> Self {
        SamplePolicy::Every(DEFAULT_SAMPLE_INTERVAL)
    }
}

/// Deterministic every-nth-frame gate over a monotonic frame index.
///
/// The first frame is always admitted. The decision depends only on the
/// index, so replaying the same stream yields the same sampled subset.
#[derive(Debug)]
pub struct FrameSampler {
    interval: usize,
    index: u64,
}

impl FrameSampler {
    pub fn new(policy: SamplePolicy, reported_fps: Option<f64>) -> Self {
        let interval = match policy {
            SamplePolicy::Every(n) => n.max(1),
            SamplePolicy::TargetFps(target) => interval_for(reported_fps, target),
        };
        FrameSampler { interval, index: 0 }
    }

    /// The resolved sampling interval.
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Advance the frame counter; true when this frame should be processed.
    pub fn admit(&mut self) -> bool {
        let keep = self.index % self.interval as u64 == 0;
        self.index += 1;
        keep
    }
}

fn interval_for(reported_fps: Option<f64>, target: f64) -> usize {
    match reported_fps {
        Some(fps) if (MIN_PLAUSIBLE_FPS..=MAX_PLAUSIBLE_FPS).contains(&fps) && target > 0.0 => {
            ((fps / target).round() as usize).max(1)
        }
        _ => DEFAULT_SAMPLE_INTERVAL,
    }
}
