use crate::{VideoError, VideoFrame};

/// A pull-based supplier of video frames in presentation order.
///
/// Implementations own whatever decoding machinery they need; consumers
/// drain them with a plain loop:
///
/// ```ignore
/// while let Some(frame) = source.next_frame()? {
///     // ...
/// }
/// ```
pub trait FrameSource {
    /// The frame rate the container reports, if any. Not every source
    /// knows its rate (image directories usually don't), and reported
    /// rates can be nonsense, so consumers must treat this as a hint.
    fn frame_rate(&self) -> Option<f64>;

    /// Pull the next frame. `Ok(None)` means the source is exhausted;
    /// an error means the underlying stream failed mid-read.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError>;
}
