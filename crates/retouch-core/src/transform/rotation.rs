//! Image rotation about the center with a fixed canvas.
//!
//! The output keeps the source dimensions: corners that rotate out of the
//! canvas are clipped and uncovered areas are filled with zeros.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values. Pixel centers sit on integer coordinates and the rotation
//! center is `(width / 2, height / 2)` using integer division.
//!
//! For rotation by angle θ (counter-clockwise on screen, y pointing down),
//! the inverse transform is:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ) + cx
//! src_y =  (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Bilinear interpolation over the 4 nearest samples.
    #[default]
    Bilinear,
    /// Nearest sample, no blending.
    Nearest,
}

/// Angles closer than this to a multiple of 360 degrees are treated as zero.
const ANGLE_EPSILON: f64 = 0.001;

/// Check whether an angle is a no-op rotation.
fn is_identity_angle(angle_degrees: f64) -> bool {
    let normalized = angle_degrees.rem_euclid(360.0);
    normalized < ANGLE_EPSILON || 360.0 - normalized < ANGLE_EPSILON
}

/// Rotate an image about its center, keeping its dimensions.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `filter` - Interpolation method
///
/// # Returns
///
/// New `ImageBuffer` with the same width, height and channel count. Identity
/// angles return an exact copy.
pub fn rotate_about_center(
    image: &ImageBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> ImageBuffer {
    // Fast path: no rotation needed
    if is_identity_angle(angle_degrees) || image.is_empty() {
        return image.clone();
    }

    let (w, h) = (image.width(), image.height());
    let channels = image.channels() as usize;

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let cx = (w / 2) as f64;
    let cy = (h / 2) as f64;

    let mut output = image.clone();
    let dst = output.pixels_mut();
    let mut pixel = [0u8; 4];

    for dst_y in 0..h {
        for dst_x in 0..w {
            // Translate destination point to origin at center
            let dx = dst_x as f64 - cx;
            let dy = dst_y as f64 - cy;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            let sample = &mut pixel[..channels];
            match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, sample),
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y, sample),
            }

            let dst_idx = (dst_y as usize * w as usize + dst_x as usize) * channels;
            dst[dst_idx..dst_idx + channels].copy_from_slice(sample);
        }
    }

    output
}

/// Read one sample as f64, treating out-of-bounds coordinates as 0.
#[inline]
fn sample_at(image: &ImageBuffer, x: i64, y: i64, channel: usize) -> f64 {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return 0.0;
    }
    image.pixels()[image.offset(x as u32, y as u32) + channel] as f64
}

/// Sample a pixel using bilinear interpolation.
///
/// Neighbors outside the source contribute zero, so edges fade into the
/// black fill instead of ending abruptly.
fn sample_bilinear(image: &ImageBuffer, x: f64, y: f64, out: &mut [u8]) {
    let (w, h) = (image.width() as f64, image.height() as f64);

    // Entirely outside: all four neighbors are fill
    if x <= -1.0 || x >= w || y <= -1.0 || y >= h {
        out.fill(0);
        return;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    for (c, slot) in out.iter_mut().enumerate() {
        let v = sample_at(image, x0, y0, c) * (1.0 - fx) * (1.0 - fy)
            + sample_at(image, x1, y0, c) * fx * (1.0 - fy)
            + sample_at(image, x0, y1, c) * (1.0 - fx) * fy
            + sample_at(image, x1, y1, c) * fx * fy;
        *slot = v.clamp(0.0, 255.0).round() as u8;
    }
}

/// Sample the pixel whose center is closest to `(x, y)`.
fn sample_nearest(image: &ImageBuffer, x: f64, y: f64, out: &mut [u8]) {
    let px = x.round() as i64;
    let py = y.round() as i64;
    for (c, slot) in out.iter_mut().enumerate() {
        *slot = sample_at(image, px, py, c) as u8;
    }
}
