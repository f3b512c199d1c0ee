use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    Open(String),
    Probe(String),
    Stream(String),
    Decode(gloss_image::ImageError),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Open(msg) => write!(f, "open error: {msg}"),
            VideoError::Probe(msg) => write!(f, "probe error: {msg}"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::Stream(err.to_string())
    }
}

impl From<gloss_image::ImageError> for VideoError {
    fn from(err: gloss_image::ImageError) -> Self {
        VideoError::Decode(err)
    }
}
