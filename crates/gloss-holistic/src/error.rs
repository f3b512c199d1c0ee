use std::fmt;

#[derive(Debug)]
pub enum HolisticError {
    /// The detector itself failed (model, runtime, replay exhausted)
    Backend(String),
    /// Landmark data was present but malformed
    Data(String),
}

impl fmt::Display for HolisticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolisticError::Backend(msg) => write!(f, "detector backend error: {msg}"),
            HolisticError::Data(msg) => write!(f, "landmark data error: {msg}"),
        }
    }
}

impl std::error::Error for HolisticError {}
