pub mod error;
pub mod ffmpeg;
pub mod imagedir;
pub mod sampler;
pub mod traits;
pub mod videoframe;

pub use error::VideoError;
pub use ffmpeg::FfmpegSource;
pub use imagedir::ImageDirSource;
pub use sampler::{DEFAULT_SAMPLE_INTERVAL, FrameSampler, SamplePolicy};
pub use traits::FrameSource;
pub use videoframe::VideoFrame;
