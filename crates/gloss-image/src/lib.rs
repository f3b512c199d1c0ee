pub mod draw;
pub mod error;
pub mod flow;
pub mod gray;
pub mod resize;
pub mod ssim;

pub use draw::{count_nonzero, draw_filled_circle, draw_line};
pub use error::ImageError;
pub use flow::{LkParams, track_points};
pub use gray::rgb_to_gray;
pub use resize::resize_bilinear;
pub use ssim::ssim;

use crates_image::ImageEncoder;
use crates_image::codecs::png::PngEncoder;
use gloss_base::Tensor;

/// Decode an encoded image (PNG, JPEG) into an RGB tensor `[H, W, 3]`.
///
/// Gray and alpha sources are converted, so the result is always 8-bit RGB.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is not a decodable image.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let img =
        crates_image::load_from_memory(data).map_err(|e| ImageError::Decode(e.to_string()))?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}

/// Encode a gray `[H, W]` or RGB `[H, W, 3]` tensor as PNG.
///
/// # Errors
///
/// Returns `ImageError::Shape` for any other tensor shape, or
/// `ImageError::Encode` if the encoder fails.
pub fn encode_png(image: &Tensor<u8>) -> Result<Vec<u8>, ImageError> {
    use crates_image::ExtendedColorType;

    let (width, height, color) = match image.shape.as_slice() {
        [h, w] => (*w, *h, ExtendedColorType::L8),
        [h, w, 3] => (*w, *h, ExtendedColorType::Rgb8),
        other => {
            return Err(ImageError::Shape(format!(
                "expected [H, W] or [H, W, 3] image, got {other:?}"
            )));
        }
    };

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&image.data, width as u32, height as u32, color)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(out)
}
