//! Sparse optical flow: pyramidal Lucas-Kanade point tracking.

use crate::ImageError;
use gloss_base::{Tensor, Vec2};

/// Parameters for pyramidal Lucas-Kanade tracking.
#[derive(Debug, Clone)]
pub struct LkParams {
    /// Side length of the square integration window, in pixels. Must be odd.
    pub window_size: usize,
    /// Number of pyramid reductions above the full-resolution level.
    pub max_level: usize,
    /// Iteration cap per pyramid level.
    pub max_iterations: usize,
    /// Convergence threshold on the length of one iteration's update.
    pub epsilon: f32,
}

impl Default for LkParams {
    fn default() -> Self {
        Self {
            window_size: 15,
            max_level: 2,
            max_iterations: 10,
            epsilon: 0.03,
        }
    }
}

/// Track `points` from `prev` to `next`, both gray images `[H, W]`.
///
/// Returns one tracked position per input point, in input order. Points
/// whose neighborhood carries no usable gradient (flat patches, points
/// outside the image) keep their best estimate instead of being dropped,
/// so callers can rely on the output length.
///
/// # Errors
///
/// Returns `ImageError::Shape` if the images are not 2-D gray or their
/// shapes differ.
pub fn track_points(
    prev: &Tensor<u8>,
    next: &Tensor<u8>,
    points: &[Vec2<f32>],
    params: &LkParams,
) -> Result<Vec<Vec2<f32>>, ImageError> {
    let (height, width) = match (prev.shape.as_slice(), next.shape.as_slice()) {
        ([hp, wp], [hn, wn]) if hp == hn && wp == wn => (*hp, *wp),
        _ => {
            return Err(ImageError::Shape(format!(
                "flow needs two gray images of equal shape, got {:?} and {:?}",
                prev.shape, next.shape
            )));
        }
    };
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let prev_pyramid = build_pyramid(prev, width, height, params);
    let next_pyramid = build_pyramid(next, width, height, params);
    let levels = prev_pyramid.len().min(next_pyramid.len());

    let radius = (params.window_size / 2) as i32;
    let window_area = params.window_size * params.window_size;
    let mut values = vec![0.0f32; window_area];
    let mut grad_x = vec![0.0f32; window_area];
    let mut grad_y = vec![0.0f32; window_area];

    let mut tracked = Vec::with_capacity(points.len());
    for &point in points {
        // Flow accumulated from coarser levels, expressed at the current level
        let mut flow = Vec2::new(0.0f32, 0.0);

        for level in (0..levels).rev() {
            let inv_scale = 1.0 / (1 << level) as f32;
            let base = point * inv_scale;
            let prev_img = &prev_pyramid[level];
            let next_img = &next_pyramid[level];

            // Window values and derivatives come from the prev image and
            // stay fixed across iterations at this level
            let mut gxx = 0.0f32;
            let mut gxy = 0.0f32;
            let mut gyy = 0.0f32;
            let mut i = 0;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let x = base.x + dx as f32;
                    let y = base.y + dy as f32;
                    let ix = (prev_img.sample(x + 1.0, y) - prev_img.sample(x - 1.0, y)) * 0.5;
                    let iy = (prev_img.sample(x, y + 1.0) - prev_img.sample(x, y - 1.0)) * 0.5;
                    values[i] = prev_img.sample(x, y);
                    grad_x[i] = ix;
                    grad_y[i] = iy;
                    gxx += ix * ix;
                    gxy += ix * iy;
                    gyy += iy * iy;
                    i += 1;
                }
            }

            // A window without gradient cannot constrain the solve; carry
            // the coarser-level estimate through unchanged
            let det = gxx * gyy - gxy * gxy;
            if det.abs() > 1e-7 {
                let mut refinement = Vec2::new(0.0f32, 0.0);
                for _ in 0..params.max_iterations {
                    let mut bx = 0.0f32;
                    let mut by = 0.0f32;
                    let mut i = 0;
                    for dy in -radius..=radius {
                        for dx in -radius..=radius {
                            let x = base.x + dx as f32 + flow.x + refinement.x;
                            let y = base.y + dy as f32 + flow.y + refinement.y;
                            let diff = values[i] - next_img.sample(x, y);
                            bx += diff * grad_x[i];
                            by += diff * grad_y[i];
                            i += 1;
                        }
                    }

                    // Solve G * delta = b for the 2x2 gradient matrix G
                    let delta = Vec2::new((gyy * bx - gxy * by) / det, (gxx * by - gxy * bx) / det);
                    refinement += delta;
                    if delta.length() < params.epsilon {
                        break;
                    }
                }
                flow += refinement;
            }

            if level > 0 {
                flow = flow * 2.0;
            }
        }

        tracked.push(point + flow);
    }

    Ok(tracked)
}

struct GrayF32 {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl GrayF32 {
    fn from_u8(data: &[u8], width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: data.iter().map(|&v| v as f32).collect(),
        }
    }

    /// Bilinear sample with edge clamping.
    fn sample(&self, x: f32, y: f32) -> f32 {
        let x = x.clamp(0.0, (self.width - 1) as f32);
        let y = y.clamp(0.0, (self.height - 1) as f32);
        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let p00 = self.data[y0 * self.width + x0];
        let p01 = self.data[y0 * self.width + x1];
        let p10 = self.data[y1 * self.width + x0];
        let p11 = self.data[y1 * self.width + x1];

        let top = p00 + (p01 - p00) * fx;
        let bottom = p10 + (p11 - p10) * fx;
        top + (bottom - top) * fy
    }

    /// 2x2 mean reduction to the next pyramid level.
    fn half(&self) -> Self {
        let width = self.width.div_ceil(2);
        let height = self.height.div_ceil(2);
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let x0 = x * 2;
                let y0 = y * 2;
                let x1 = (x0 + 1).min(self.width - 1);
                let y1 = (y0 + 1).min(self.height - 1);
                let sum = self.data[y0 * self.width + x0]
                    + self.data[y0 * self.width + x1]
                    + self.data[y1 * self.width + x0]
                    + self.data[y1 * self.width + x1];
                data.push(sum * 0.25);
            }
        }
        Self {
            width,
            height,
            data,
        }
    }
}

fn build_pyramid(
    image: &Tensor<u8>,
    width: usize,
    height: usize,
    params: &LkParams,
) -> Vec<GrayF32> {
    let mut pyramid = Vec::with_capacity(params.max_level + 1);
    let mut current = GrayF32::from_u8(&image.data, width, height);

    for _ in 0..params.max_level {
        // Stop reducing once the window would no longer fit
        if current.width.div_ceil(2) < params.window_size
            || current.height.div_ceil(2) < params.window_size
        {
            break;
        }
        let reduced = current.half();
        pyramid.push(current);
        current = reduced;
    }
    pyramid.push(current);

    pyramid
}
