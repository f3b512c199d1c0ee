use gloss_base::TensorError;
use gloss_holistic::HolisticError;
use gloss_image::ImageError;
use gloss_video::VideoError;
use std::fmt;

#[derive(Debug)]
pub enum ExtractError {
    /// The video source could not be opened or failed mid-stream
    Source(VideoError),
    /// The landmark detector failed
    Detector(HolisticError),
    /// An image operation (resize, gray, flow, skeleton) failed
    Image(ImageError),
    /// Internal feature layout violation
    Schema(String),
    /// File i/o failure while reading or writing exported features
    Io(std::io::Error),
    /// Task infrastructure failure (panicked or cancelled worker)
    Runtime(String),
    /// The clip was read fine but produced no usable frames
    NoSignal,
}

impl ExtractError {
    /// True for the empty-result case, which batch callers usually record
    /// and move past rather than abort on.
    pub fn is_no_signal(&self) -> bool {
        matches!(self, ExtractError::NoSignal)
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Source(err) => write!(f, "video source error: {err}"),
            ExtractError::Detector(err) => write!(f, "detector error: {err}"),
            ExtractError::Image(err) => write!(f, "image error: {err}"),
            ExtractError::Schema(msg) => write!(f, "feature schema violation: {msg}"),
            ExtractError::Io(err) => write!(f, "i/o error: {err}"),
            ExtractError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            ExtractError::NoSignal => write!(f, "no usable frames with hand signal"),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<VideoError> for ExtractError {
    fn from(err: VideoError) -> Self {
        ExtractError::Source(err)
    }
}

impl From<HolisticError> for ExtractError {
    fn from(err: HolisticError) -> Self {
        ExtractError::Detector(err)
    }
}

impl From<ImageError> for ExtractError {
    fn from(err: ImageError) -> Self {
        ExtractError::Image(err)
    }
}

impl From<TensorError> for ExtractError {
    fn from(err: TensorError) -> Self {
        ExtractError::Schema(err.to_string())
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::Io(err)
    }
}
