use crate::ImageError;
use gloss_base::Tensor;

/// Resize a gray `[H, W]` or interleaved `[H, W, C]` image with bilinear
/// interpolation.
///
/// Source coordinates use the half-pixel convention
/// `src = (dst + 0.5) * scale - 0.5` with edge clamping, which is what
/// common image libraries produce for linear resampling.
pub fn resize_bilinear(
    image: &Tensor<u8>,
    new_width: usize,
    new_height: usize,
) -> Result<Tensor<u8>, ImageError> {
    let (src_h, src_w, channels) = match image.shape.as_slice() {
        [h, w] => (*h, *w, 1usize),
        [h, w, c] => (*h, *w, *c),
        other => {
            return Err(ImageError::Shape(format!(
                "expected [H, W] or [H, W, C] image, got {other:?}"
            )));
        }
    };
    if src_h == 0 || src_w == 0 || new_width == 0 || new_height == 0 {
        return Err(ImageError::Shape(format!(
            "cannot resize {src_w}x{src_h} to {new_width}x{new_height}"
        )));
    }

    if src_w == new_width && src_h == new_height {
        return Ok(image.clone());
    }

    let scale_x = src_w as f32 / new_width as f32;
    let scale_y = src_h as f32 / new_height as f32;

    let mut data = vec![0u8; new_width * new_height * channels];

    for dst_y in 0..new_height {
        let src_y = ((dst_y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, (src_h - 1) as f32);
        let y0 = src_y.floor() as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = src_y - y0 as f32;

        for dst_x in 0..new_width {
            let src_x = ((dst_x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, (src_w - 1) as f32);
            let x0 = src_x.floor() as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = src_x - x0 as f32;

            for c in 0..channels {
                let p00 = image.data[(y0 * src_w + x0) * channels + c] as f32;
                let p01 = image.data[(y0 * src_w + x1) * channels + c] as f32;
                let p10 = image.data[(y1 * src_w + x0) * channels + c] as f32;
                let p11 = image.data[(y1 * src_w + x1) * channels + c] as f32;

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;
                let value = top + (bottom - top) * fy;

                data[(dst_y * new_width + dst_x) * channels + c] = (value + 0.5) as u8;
            }
        }
    }

    let shape = if channels == 1 {
        vec![new_height, new_width]
    } else {
        vec![new_height, new_width, channels]
    };
    Ok(Tensor::new(shape, data)?)
}
