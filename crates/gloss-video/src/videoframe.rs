use crate::VideoError;
use gloss_base::Tensor;
use gloss_image::ImageError;

/// A single frame pulled from a [`FrameSource`](crate::FrameSource).
///
/// Sources that decode themselves hand over raw RGB; sources backed by
/// still-image files defer decoding to the consumer.
#[derive(Debug, Clone)]
pub enum VideoFrame {
    /// Decoded interleaved RGB pixels, shape `[H, W, 3]`
    Rgb(Tensor<u8>),
    /// Still-encoded image bytes (PNG, JPEG)
    Encoded(Vec<u8>),
}

impl VideoFrame {
    /// Resolve the frame to an RGB tensor `[H, W, 3]`, decoding if needed.
    pub fn into_rgb(self) -> Result<Tensor<u8>, VideoError> {
        match self {
            VideoFrame::Rgb(tensor) => match tensor.shape.as_slice() {
                [_, _, 3] => Ok(tensor),
                other => Err(VideoError::Decode(ImageError::Shape(format!(
                    "expected [H, W, 3] frame, got {other:?}"
                )))),
            },
            VideoFrame::Encoded(data) => Ok(gloss_image::decode_rgb(&data)?),
        }
    }
}
