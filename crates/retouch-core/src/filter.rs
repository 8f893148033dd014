//! 3x3 convolution filters.
//!
//! # Border Handling
//!
//! Samples outside the image are read by mirroring without repeating the
//! edge sample (`gfedcb|abcdefgh|gfedcba`), so a flat image stays flat under
//! any kernel whose weights sum to 1.
//!
//! # Rounding
//!
//! Weights are integers and sums are accumulated in `i64`, so they are exact
//! for any `i32` kernel; results are saturated to `0..=255`. Every channel, alpha included, is filtered independently.

use crate::buffer::ImageBuffer;

/// A 3x3 integer kernel, indexed `[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3(pub [[i32; 3]; 3]);

impl Kernel3 {
    /// Cross-shaped sharpening kernel.
    pub const SHARPEN: Kernel3 = Kernel3([[0, -1, 0], [-1, 5, -1], [0, -1, 0]]);
}

/// Sharpen an image with [`Kernel3::SHARPEN`].
///
/// Repeated application keeps amplifying edges; the result is deterministic.
pub fn sharpen(image: &ImageBuffer) -> ImageBuffer {
    convolve3x3(image, &Kernel3::SHARPEN)
}

/// Correlate every channel of `image` with `kernel`.
///
/// Returns a new buffer with the same dimensions and channel count.
pub fn convolve3x3(image: &ImageBuffer, kernel: &Kernel3) -> ImageBuffer {
    let mut output = image.clone();
    if image.is_empty() {
        return output;
    }

    let w = image.width() as i64;
    let h = image.height() as i64;
    let channels = image.channels() as usize;
    let row_stride = w as usize * channels;
    let src = image.pixels();
    let dst = output.pixels_mut();

    for y in 0..h {
        let rows = [reflect101(y - 1, h), y as usize, reflect101(y + 1, h)];
        for x in 0..w {
            let cols = [reflect101(x - 1, w), x as usize, reflect101(x + 1, w)];
            let dst_idx = y as usize * row_stride + x as usize * channels;

            for c in 0..channels {
                let mut acc = 0i64;
                for (ky, &sy) in rows.iter().enumerate() {
                    let row = sy * row_stride;
                    for (kx, &sx) in cols.iter().enumerate() {
                        let weight = kernel.0[ky][kx];
                        if weight != 0 {
                            acc += weight as i64 * src[row + sx * channels + c] as i64;
                        }
                    }
                }
                dst[dst_idx + c] = acc.clamp(0, 255) as u8;
            }
        }
    }

    output
}

/// Mirror an index one step outside `0..n` back inside, without repeating
/// the edge sample.
#[inline]
fn reflect101(i: i64, n: i64) -> usize {
    if n == 1 {
        return 0;
    }
    let i = if i < 0 { -i } else { i };
    let i = if i >= n { 2 * (n - 1) - i } else { i };
    i as usize
}
