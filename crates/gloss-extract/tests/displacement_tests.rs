use gloss_base::{Tensor, Vec3};
use gloss_extract::displacement::{FrameHistory, displacement_features};
use gloss_extract::schema::{DISPLACEMENT_DIM, FLOW_DISPLACEMENT_DIM};
use gloss_holistic::HAND_LANDMARK_COUNT;
use gloss_image::LkParams;

const SIZE: usize = 128;

/// Textured gray image translated by (shift_x, shift_y).
fn pattern(width: usize, height: usize, shift_x: f32, shift_y: f32) -> Tensor<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 - shift_x;
            let fy = y as f32 - shift_y;
            let v = 128.0 + 55.0 * ((fx * 0.15).sin() + (fy * 0.2).cos());
            data.push(v as u8);
        }
    }
    Tensor::new(vec![height, width], data).unwrap()
}

fn flat(width: usize, height: usize) -> Tensor<u8> {
    Tensor::new(vec![height, width], vec![128u8; width * height]).unwrap()
}

/// Hand points spread over the middle of the frame, clear of the borders.
fn interior_points() -> [Vec3<f32>; HAND_LANDMARK_COUNT] {
    let mut points = [Vec3::default(); HAND_LANDMARK_COUNT];
    for (i, p) in points.iter_mut().enumerate() {
        let col = (i % 5) as f32;
        let row = (i / 5) as f32;
        *p = Vec3::new(0.3 + 0.06 * col, 0.3 + 0.06 * row, 0.1);
    }
    points
}

#[test]
fn flow_block_measures_image_translation() {
    let points = interior_points();
    let history = FrameHistory {
        gray: pattern(SIZE, SIZE, 0.0, 0.0),
        left: points,
        right: points,
    };
    let current = pattern(SIZE, SIZE, 3.0, 2.0);

    let out =
        displacement_features(&history, &current, &points, &points, &LkParams::default()).unwrap();
    assert_eq!(out.len(), DISPLACEMENT_DIM);

    // Flow normalized by frame size: about 3/128 in x, 2/128 in y
    let tolerance = 0.5 / SIZE as f32;
    for i in 0..HAND_LANDMARK_COUNT {
        assert!(
            (out[i] - 3.0 / SIZE as f32).abs() < tolerance,
            "left dx[{i}] = {}",
            out[i]
        );
        assert!(
            (out[HAND_LANDMARK_COUNT + i] - 2.0 / SIZE as f32).abs() < tolerance,
            "left dy[{i}] = {}",
            out[HAND_LANDMARK_COUNT + i]
        );
    }

    // Hand coordinates did not change, so the landmark block is zero
    assert!(out[FLOW_DISPLACEMENT_DIM..].iter().all(|&v| v == 0.0));
}

#[test]
fn landmark_block_measures_coordinate_deltas() {
    // Dyadic coordinates so the deltas are exact in f32
    let mut prev = [Vec3::default(); HAND_LANDMARK_COUNT];
    let mut curr_left = [Vec3::default(); HAND_LANDMARK_COUNT];
    let mut curr_right = [Vec3::default(); HAND_LANDMARK_COUNT];
    for i in 0..HAND_LANDMARK_COUNT {
        prev[i] = Vec3::new(0.25, 0.5, 0.125);
        curr_left[i] = Vec3::new(0.5, 0.75, 0.375);
        curr_right[i] = Vec3::new(0.125, 0.25, 0.0625);
    }

    let history = FrameHistory {
        gray: flat(SIZE, SIZE),
        left: prev,
        right: prev,
    };
    let out = displacement_features(
        &history,
        &flat(SIZE, SIZE),
        &curr_left,
        &curr_right,
        &LkParams::default(),
    )
    .unwrap();

    // Featureless frames carry no gradient, so flow stays exactly zero
    assert!(out[..FLOW_DISPLACEMENT_DIM].iter().all(|&v| v == 0.0));

    // Left hand block: interleaved (dx, dy, dz) per point
    for i in 0..HAND_LANDMARK_COUNT {
        let base = FLOW_DISPLACEMENT_DIM + 3 * i;
        assert_eq!(out[base], 0.25);
        assert_eq!(out[base + 1], 0.25);
        assert_eq!(out[base + 2], 0.25);
    }
    // Right hand block follows
    for i in 0..HAND_LANDMARK_COUNT {
        let base = FLOW_DISPLACEMENT_DIM + 3 * (HAND_LANDMARK_COUNT + i);
        assert_eq!(out[base], -0.125);
        assert_eq!(out[base + 1], -0.25);
        assert_eq!(out[base + 2], -0.0625);
    }
}

#[test]
fn absent_hands_track_from_the_origin() {
    // Undetected hands are all-zero points; displacement still has full
    // shape and stays finite
    let zeros = [Vec3::default(); HAND_LANDMARK_COUNT];
    let history = FrameHistory {
        gray: flat(SIZE, SIZE),
        left: zeros,
        right: zeros,
    };
    let out = displacement_features(
        &history,
        &flat(SIZE, SIZE),
        &zeros,
        &zeros,
        &LkParams::default(),
    )
    .unwrap();

    assert_eq!(out.len(), DISPLACEMENT_DIM);
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn mismatched_frame_shapes_error() {
    let points = interior_points();
    let history = FrameHistory {
        gray: flat(64, 64),
        left: points,
        right: points,
    };
    let result = displacement_features(
        &history,
        &flat(SIZE, SIZE),
        &points,
        &points,
        &LkParams::default(),
    );
    assert!(result.is_err());
}
