//! Sign language feature extraction.
//!
//! Turns a gesture video into the fixed-shape feature matrix the
//! classifier consumes: per frame, 426 normalized landmark coordinates
//! plus 210 motion values, filtered for redundancy and shaped to 40
//! frames. The layout is versioned in [`schema`]; features written under
//! a different schema version must never be mixed.

pub mod config;
pub mod dataset;
pub mod displacement;
pub mod error;
pub mod filter;
pub mod landmarks;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod sequence;

pub use config::ExtractConfig;
pub use dataset::{
    FeatureManifest, MANIFEST_NAME, ManifestEntry, extract_dataset, read_features, write_features,
};
pub use error::ExtractError;
pub use filter::{FrameVerdict, RedundancyFilter};
pub use pipeline::{extract_clip, extract_features, extract_features_async, extract_from_path};
pub use schema::{FEATURE_SCHEMA_VERSION, FeatureSchema, MAX_SEQUENCE_LENGTH, POSE_VECTOR_DIM};
pub use sequence::{FeatureSequence, PaddedFeatureSequence, pad_sequence};
