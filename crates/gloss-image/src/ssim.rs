use crate::ImageError;
use gloss_base::Tensor;

// 7x7 uniform windows with the standard stabilizing constants
const WIN: usize = 7;
const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DATA_RANGE: f64 = 255.0;

/// Mean structural similarity between two gray images `[H, W]`.
///
/// Uses uniform 7x7 windows, sample covariance, and a data range of 255,
/// so scores are interchangeable with the widely-used scikit-image
/// implementation for 8-bit input. Identical images score exactly 1.0;
/// structurally unrelated images score near 0.
///
/// # Errors
///
/// Returns `ImageError::Shape` if the images are not 2-D, differ in shape,
/// or are smaller than the 7x7 window.
pub fn ssim(a: &Tensor<u8>, b: &Tensor<u8>) -> Result<f32, ImageError> {
    let (height, width) = match (a.shape.as_slice(), b.shape.as_slice()) {
        ([ha, wa], [hb, wb]) if ha == hb && wa == wb => (*ha, *wa),
        _ => {
            return Err(ImageError::Shape(format!(
                "ssim needs two gray images of equal shape, got {:?} and {:?}",
                a.shape, b.shape
            )));
        }
    };
    if height < WIN || width < WIN {
        return Err(ImageError::Shape(format!(
            "image {width}x{height} is smaller than the {WIN}x{WIN} ssim window"
        )));
    }

    // Integral images over a, b, a^2, b^2, ab make each window sum O(1)
    let sa = integral(width, height, |i| a.data[i] as f64);
    let sb = integral(width, height, |i| b.data[i] as f64);
    let saa = integral(width, height, |i| {
        let v = a.data[i] as f64;
        v * v
    });
    let sbb = integral(width, height, |i| {
        let v = b.data[i] as f64;
        v * v
    });
    let sab = integral(width, height, |i| a.data[i] as f64 * b.data[i] as f64);

    let stride = width + 1;
    let np = (WIN * WIN) as f64;
    let cov_norm = np / (np - 1.0); // sample covariance
    let c1 = (K1 * DATA_RANGE) * (K1 * DATA_RANGE);
    let c2 = (K2 * DATA_RANGE) * (K2 * DATA_RANGE);

    let mut total = 0.0;
    let mut windows = 0usize;

    for y in 0..=(height - WIN) {
        for x in 0..=(width - WIN) {
            let ux = window_sum(&sa, stride, y, x) / np;
            let uy = window_sum(&sb, stride, y, x) / np;
            let uxx = window_sum(&saa, stride, y, x) / np;
            let uyy = window_sum(&sbb, stride, y, x) / np;
            let uxy = window_sum(&sab, stride, y, x) / np;

            let vx = cov_norm * (uxx - ux * ux);
            let vy = cov_norm * (uyy - uy * uy);
            let vxy = cov_norm * (uxy - ux * uy);

            let s = ((2.0 * ux * uy + c1) * (2.0 * vxy + c2))
                / ((ux * ux + uy * uy + c1) * (vx + vy + c2));

            total += s;
            windows += 1;
        }
    }

    Ok((total / windows as f64) as f32)
}

fn integral(width: usize, height: usize, value_at: impl Fn(usize) -> f64) -> Vec<f64> {
    let stride = width + 1;
    let mut s = vec![0.0; stride * (height + 1)];
    for y in 0..height {
        let mut row = 0.0;
        for x in 0..width {
            row += value_at(y * width + x);
            s[(y + 1) * stride + (x + 1)] = s[y * stride + (x + 1)] + row;
        }
    }
    s
}

fn window_sum(s: &[f64], stride: usize, y: usize, x: usize) -> f64 {
    s[(y + WIN) * stride + (x + WIN)] - s[y * stride + (x + WIN)] - s[(y + WIN) * stride + x]
        + s[y * stride + x]
}
