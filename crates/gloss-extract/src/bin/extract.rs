//! Extract a feature sequence from one video and write it as JSON.
//!
//! Landmarks come from a recorded detector run (one JSON object per
//! sampled frame), so the binary stays runnable anywhere ffmpeg is.

use gloss_base::{init_stdout_logger, log_fatal};
use gloss_extract::{ExtractConfig, FeatureSchema, PaddedFeatureSequence, extract_from_path};
use gloss_holistic::ReplayHolistic;
use log::info;
use serde::Serialize;

#[derive(Serialize)]
struct FeatureFile {
    schema: FeatureSchema,
    frame_count: usize,
    features: Vec<Vec<f32>>,
}

impl FeatureFile {
    fn from_sequence(sequence: &PaddedFeatureSequence) -> Self {
        let rows = (0..sequence.max_frames())
            .map(|i| sequence.row(i).to_vec())
            .collect();
        FeatureFile {
            schema: FeatureSchema::current(),
            frame_count: sequence.frame_count,
            features: rows,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        log_fatal!(
            "Usage: {} <video-path> <landmarks-jsonl> [output-json]",
            args[0]
        );
    }
    let video_path = &args[1];
    let landmarks_path = &args[2];

    let config = ExtractConfig::default();
    let sequence = extract_from_path(video_path, &config, || {
        ReplayHolistic::from_file(landmarks_path)
    })?;

    info!(
        "extracted {} frames ({} after padding)",
        sequence.frame_count,
        sequence.max_frames()
    );

    let text = serde_json::to_string(&FeatureFile::from_sequence(&sequence))?;
    match args.get(3) {
        Some(path) => {
            std::fs::write(path, &text)?;
            info!("wrote {path}");
        }
        None => println!("{text}"),
    }

    Ok(())
}
