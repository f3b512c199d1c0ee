use gloss_video::{DEFAULT_SAMPLE_INTERVAL, FrameSampler, SamplePolicy};

fn admitted_of(sampler: &mut FrameSampler, frames: usize) -> Vec<usize> {
    (0..frames).filter(|_| sampler.admit()).collect::<Vec<_>>()
}

#[test]
fn test_every_nth_cadence() {
    let mut sampler = FrameSampler::new(SamplePolicy::Every(3), None);
    assert_eq!(sampler.interval(), 3);

    let mut admitted = Vec::new();
    for index in 0..10 {
        if sampler.admit() {
            admitted.push(index);
        }
    }
    assert_eq!(admitted, vec![0, 3, 6, 9]);
}

#[test]
fn test_first_frame_always_admitted() {
    let mut sampler = FrameSampler::new(SamplePolicy::Every(100), None);
    assert!(sampler.admit());
}

#[test]
fn test_interval_zero_clamps_to_one() {
    let mut sampler = FrameSampler::new(SamplePolicy::Every(0), None);
    assert_eq!(sampler.interval(), 1);
    assert_eq!(admitted_of(&mut sampler, 5).len(), 5);
}

#[test]
fn test_target_fps_uses_reported_rate() {
    let sampler = FrameSampler::new(SamplePolicy::TargetFps(10.0), Some(30.0));
    assert_eq!(sampler.interval(), 3);
}

#[test]
fn test_target_fps_without_rate_falls_back() {
    let sampler = FrameSampler::new(SamplePolicy::TargetFps(10.0), None);
    assert_eq!(sampler.interval(), DEFAULT_SAMPLE_INTERVAL);
}

#[test]
fn test_target_fps_with_absurd_rate_falls_back() {
    let sampler = FrameSampler::new(SamplePolicy::TargetFps(10.0), Some(12_000.0));
    assert_eq!(sampler.interval(), DEFAULT_SAMPLE_INTERVAL);
}

#[test]
fn test_deterministic_across_replays() {
    let mut first = FrameSampler::new(SamplePolicy::Every(4), None);
    let mut second = FrameSampler::new(SamplePolicy::Every(4), None);
    assert_eq!(admitted_of(&mut first, 23), admitted_of(&mut second, 23));
}
