use crate::ImageError;
use gloss_base::Tensor;

/// Convert an RGB image `[H, W, 3]` to grayscale `[H, W]`.
///
/// Integer Rec.601 weighting (0.299 R + 0.587 G + 0.114 B) with rounding,
/// the same conversion video tooling applies.
pub fn rgb_to_gray(image: &Tensor<u8>) -> Result<Tensor<u8>, ImageError> {
    let (height, width) = match image.shape.as_slice() {
        [h, w, 3] => (*h, *w),
        other => {
            return Err(ImageError::Shape(format!(
                "expected [H, W, 3] image, got {other:?}"
            )));
        }
    };

    let mut data = Vec::with_capacity(height * width);
    for px in image.data.chunks_exact(3) {
        let weighted = 299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32;
        data.push(((weighted + 500) / 1000) as u8);
    }

    Ok(Tensor::new(vec![height, width], data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_weights() {
        let image = Tensor::new(
            vec![1, 4, 3],
            vec![
                255, 0, 0, // red
                0, 255, 0, // green
                0, 0, 255, // blue
                255, 255, 255, // white
            ],
        )
        .unwrap();

        let gray = rgb_to_gray(&image).unwrap();
        assert_eq!(gray.shape, vec![1, 4]);
        assert_eq!(gray.data, vec![76, 150, 29, 255]);
    }

    #[test]
    fn test_gray_rejects_wrong_shape() {
        let image = Tensor::new(vec![2, 2], vec![0u8; 4]).unwrap();
        assert!(rgb_to_gray(&image).is_err());
    }
}
