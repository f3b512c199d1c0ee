use gloss_base::{Tensor, Vec2};
use gloss_image::{LkParams, track_points};

/// Smooth 2-D pattern with gradient everywhere, sampled at an offset.
fn pattern(width: usize, height: usize, shift_x: f32, shift_y: f32) -> Tensor<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 - shift_x;
            let fy = y as f32 - shift_y;
            let v = 127.5 + 55.0 * (fx * 0.15).sin() + 55.0 * (fy * 0.2).sin();
            data.push(v.round() as u8);
        }
    }
    Tensor::new(vec![height, width], data).unwrap()
}

#[test]
fn test_tracks_pure_translation() {
    let prev = pattern(96, 96, 0.0, 0.0);
    let next = pattern(96, 96, 3.0, 2.0);

    let points = vec![
        Vec2::new(40.0f32, 40.0),
        Vec2::new(55.0f32, 30.0),
        Vec2::new(30.0f32, 60.0),
    ];
    let tracked = track_points(&prev, &next, &points, &LkParams::default()).unwrap();

    assert_eq!(tracked.len(), points.len());
    for (p, t) in points.iter().zip(&tracked) {
        let dx = t.x - p.x;
        let dy = t.y - p.y;
        assert!(
            (dx - 3.0).abs() < 0.5 && (dy - 2.0).abs() < 0.5,
            "point {:?} tracked to {:?}, expected shift (3, 2)",
            p,
            t
        );
    }
}

#[test]
fn test_no_motion_keeps_points() {
    let prev = pattern(96, 96, 0.0, 0.0);
    let next = prev.clone();

    let points = vec![Vec2::new(48.0f32, 48.0)];
    let tracked = track_points(&prev, &next, &points, &LkParams::default()).unwrap();

    assert!((tracked[0].x - 48.0).abs() < 1e-3);
    assert!((tracked[0].y - 48.0).abs() < 1e-3);
}

#[test]
fn test_flat_image_keeps_points() {
    // No gradient anywhere: the solve is skipped and points pass through
    let prev = Tensor::new(vec![64, 64], vec![128u8; 64 * 64]).unwrap();
    let next = Tensor::new(vec![64, 64], vec![128u8; 64 * 64]).unwrap();

    let points = vec![Vec2::new(10.0f32, 12.0), Vec2::new(50.0f32, 40.0)];
    let tracked = track_points(&prev, &next, &points, &LkParams::default()).unwrap();

    assert_eq!(tracked.len(), 2);
    assert_eq!(tracked[0], points[0]);
    assert_eq!(tracked[1], points[1]);
}

#[test]
fn test_empty_points() {
    let prev = pattern(32, 32, 0.0, 0.0);
    let next = pattern(32, 32, 1.0, 0.0);
    let tracked = track_points(&prev, &next, &[], &LkParams::default()).unwrap();
    assert!(tracked.is_empty());
}

#[test]
fn test_mismatched_shapes_rejected() {
    let prev = pattern(32, 32, 0.0, 0.0);
    let next = pattern(48, 32, 0.0, 0.0);
    assert!(track_points(&prev, &next, &[Vec2::new(5.0, 5.0)], &LkParams::default()).is_err());
}
