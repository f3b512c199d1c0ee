//! Extract a whole dataset tree of clips into feature files.
//!
//! Expects `<clips-dir>/<gloss>/<clip>` with a landmark recording next
//! to each clip (`<clip>.jsonl`); writes `<out-dir>/<gloss>/<clip>.f32`
//! plus a `manifest.json` naming every file and the feature schema.

use gloss_base::{init_stdout_logger, log_fatal};
use gloss_extract::{ExtractConfig, extract_dataset};
use gloss_holistic::ReplayHolistic;
use log::warn;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        log_fatal!("Usage: {} <clips-dir> <out-dir>", args[0]);
    }

    let config = ExtractConfig::default();
    let manifest = extract_dataset(&args[1], &args[2], &config, |clip| {
        ReplayHolistic::from_file(clip.with_extension("jsonl"))
    })?;

    if manifest.entries.is_empty() {
        warn!("no clips extracted from {}", args[1]);
    }

    Ok(())
}
