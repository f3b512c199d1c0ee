use gloss_base::Tensor;
use gloss_extract::{
    ExtractConfig, ExtractError, FeatureManifest, FeatureSchema, MANIFEST_NAME,
    MAX_SEQUENCE_LENGTH, ManifestEntry, POSE_VECTOR_DIM, extract_dataset, pad_sequence,
    read_features, write_features,
};
use gloss_holistic::ReplayHolistic;
use gloss_image::encode_png;
use std::fs;
use std::path::{Path, PathBuf};

fn temp_root(tag: &str) -> PathBuf {
    let root =
        std::env::temp_dir().join(format!("gloss-dataset-test-{}-{tag}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).unwrap();
    root
}

fn sample_manifest() -> FeatureManifest {
    FeatureManifest {
        schema: FeatureSchema::current(),
        entries: vec![
            ManifestEntry {
                gloss: "hello".into(),
                clip: "clip01".into(),
                frames: 12,
                file: "hello/clip01.f32".into(),
            },
            ManifestEntry {
                gloss: "thanks".into(),
                clip: "clip07".into(),
                frames: 40,
                file: "thanks/clip07.f32".into(),
            },
        ],
    }
}

#[test]
fn manifest_round_trips_through_json() {
    let manifest = sample_manifest();
    let text = serde_json::to_string(&manifest).unwrap();
    let back: FeatureManifest = serde_json::from_str(&text).unwrap();
    assert_eq!(back, manifest);
}

#[test]
fn manifest_from_another_layout_is_rejected() {
    let root = temp_root("stale-manifest");
    let path = root.join(MANIFEST_NAME);

    let mut manifest = sample_manifest();
    manifest.schema.version += 1;
    manifest.store(&path).unwrap();

    let err = FeatureManifest::load(&path).unwrap_err();
    assert!(matches!(err, ExtractError::Schema(_)), "got {err:?}");

    fs::remove_dir_all(&root).ok();
}

#[test]
fn feature_files_round_trip() {
    let root = temp_root("roundtrip");
    let path = root.join("clip.f32");

    let rows: Vec<Vec<f32>> = (0..3)
        .map(|i| vec![i as f32 + 0.5; POSE_VECTOR_DIM])
        .collect();
    let padded = pad_sequence(rows, MAX_SEQUENCE_LENGTH).unwrap();

    write_features(&path, &padded).unwrap();
    let matrix = read_features(&path, &FeatureSchema::current()).unwrap();

    assert_eq!(matrix.shape, vec![MAX_SEQUENCE_LENGTH, POSE_VECTOR_DIM]);
    assert_eq!(matrix.data, padded.features.data);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn feature_file_size_is_checked() {
    let root = temp_root("truncated");
    let path = root.join("clip.f32");
    fs::write(&path, [0u8; 16]).unwrap();

    let err = read_features(&path, &FeatureSchema::current()).unwrap_err();
    assert!(matches!(err, ExtractError::Schema(_)), "got {err:?}");

    let err = read_features(root.join("absent.f32"), &FeatureSchema::current()).unwrap_err();
    assert!(matches!(err, ExtractError::Io(_)), "got {err:?}");

    fs::remove_dir_all(&root).ok();
}

// --- end-to-end over a synthetic dataset of frame-dump clips ---

const WIDTH: usize = 64;
const HEIGHT: usize = 48;

fn textured_rgb(phase: f32) -> Tensor<u8> {
    let mut data = Vec::with_capacity(WIDTH * HEIGHT * 3);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let fx = x as f32 - phase;
            let v = (128.0 + 55.0 * ((fx * 0.3).sin() + (y as f32 * 0.4).cos())) as u8;
            data.extend([v, v, v]);
        }
    }
    Tensor::new(vec![HEIGHT, WIDTH, 3], data).unwrap()
}

/// Same finger-fan geometry the detector would report for an open hand,
/// as one JSON landmark list.
fn hand_json(cx: f32, cy: f32) -> String {
    let mut points = vec![format!("[{cx},{cy},0.0]")];
    for finger in 0..5 {
        let angle = std::f32::consts::PI * (0.3 + 0.1 * finger as f32);
        for joint in 0..4 {
            let r = 0.05 * (joint + 1) as f32;
            let x = cx + r * angle.cos();
            let y = cy - r * angle.sin();
            points.push(format!("[{x},{y},0.0]"));
        }
    }
    format!("[{}]", points.join(","))
}

/// Four frames (the default cadence samples indices 0 and 3) plus a
/// two-record landmark sidecar with the hand in two distinct positions.
fn write_clip(dir: &Path, gloss: &str, clip: &str) {
    let frames = dir.join(gloss).join(clip);
    fs::create_dir_all(&frames).unwrap();
    for i in 0..4 {
        let png = encode_png(&textured_rgb(i as f32)).unwrap();
        fs::write(frames.join(format!("frame_{i:03}.png")), png).unwrap();
    }

    let jsonl = format!(
        "{{\"left_hand\":{},\"right_hand\":{}}}\n{{\"left_hand\":{},\"right_hand\":{}}}\n",
        hand_json(0.3, 0.4),
        hand_json(0.6, 0.4),
        hand_json(0.3, 0.7),
        hand_json(0.6, 0.7),
    );
    fs::write(dir.join(gloss).join(format!("{clip}.jsonl")), jsonl).unwrap();
}

#[test]
fn dataset_of_frame_dirs_extracts_and_indexes() {
    let root = temp_root("end-to-end");
    let clips = root.join("clips");
    let out = root.join("features");

    write_clip(&clips, "hello", "clip01");
    write_clip(&clips, "world", "clip02");

    let config = ExtractConfig::default();
    let manifest = extract_dataset(&clips, &out, &config, |clip| {
        ReplayHolistic::from_file(clip.with_extension("jsonl"))
    })
    .unwrap();

    assert_eq!(manifest.entries.len(), 2);
    let first = &manifest.entries[0];
    assert_eq!(first.gloss, "hello");
    assert_eq!(first.clip, "clip01");
    assert_eq!(first.frames, 2);
    assert_eq!(first.file, "hello/clip01.f32");
    assert_eq!(manifest.entries[1].gloss, "world");

    // The written tree loads back under the current schema
    let loaded = FeatureManifest::load(out.join(MANIFEST_NAME)).unwrap();
    assert_eq!(loaded, manifest);

    for entry in &loaded.entries {
        let matrix = read_features(out.join(&entry.file), &loaded.schema).unwrap();
        assert_eq!(matrix.shape, vec![MAX_SEQUENCE_LENGTH, POSE_VECTOR_DIM]);
        assert!(matrix.data[..POSE_VECTOR_DIM].iter().any(|&v| v != 0.0));
        assert!(
            matrix.data[entry.frames * POSE_VECTOR_DIM..]
                .iter()
                .all(|&v| v == 0.0),
            "padding rows must stay zero"
        );
    }

    fs::remove_dir_all(&root).ok();
}

#[test]
fn unreadable_clips_are_skipped() {
    let root = temp_root("skips");
    let clips = root.join("clips");
    let out = root.join("features");

    fs::create_dir_all(clips.join("oops")).unwrap();
    fs::write(clips.join("oops/broken.mp4"), b"").unwrap();
    // A frame directory with no images is equally unreadable
    fs::create_dir_all(clips.join("oops/empty_clip")).unwrap();
    // Sidecar recordings must not be picked up as clips
    fs::write(clips.join("oops/broken.jsonl"), "{}\n").unwrap();

    let config = ExtractConfig::default();
    let manifest = extract_dataset(&clips, &out, &config, |clip| {
        ReplayHolistic::from_file(clip.with_extension("jsonl"))
    })
    .unwrap();

    assert!(manifest.entries.is_empty());
    // The manifest is still written so reruns and consumers see a
    // complete, schema-tagged index
    let loaded = FeatureManifest::load(out.join(MANIFEST_NAME)).unwrap();
    assert!(loaded.entries.is_empty());
    assert!(loaded.schema.is_compatible(&FeatureSchema::current()));

    fs::remove_dir_all(&root).ok();
}
