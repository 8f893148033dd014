//! Line rasterisation.
//!
//! Lines are stamped with round caps: a pixel is painted when its center lies
//! within half the thickness of the segment (at least half a pixel, so a
//! 1-pixel line stays connected). Endpoints may lie outside the image; only
//! the visible part is painted.

use crate::buffer::ImageBuffer;
use crate::input::LineSpec;

/// Map an RGB color onto a buffer's channel layout.
///
/// Gray buffers receive Rec.601 luma, RGBA buffers an opaque alpha.
pub fn color_for_layout(color: [u8; 3], channels: u8) -> [u8; 4] {
    let [r, g, b] = color;
    match channels {
        1 => {
            let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            [luma.round().clamp(0.0, 255.0) as u8, 0, 0, 0]
        }
        _ => [r, g, b, 255],
    }
}

/// Stamp a line into `image` in place.
pub fn draw_line(image: &mut ImageBuffer, line: &LineSpec, color: [u8; 3]) {
    if image.is_empty() {
        return;
    }

    let channels = image.channels() as usize;
    let stamp = color_for_layout(color, image.channels());
    let stamp = &stamp[..channels];

    let radius = (line.thickness as f64 / 2.0).max(0.5);
    let radius_sq = radius * radius;
    let reach = radius.ceil() as i64;

    let (ax, ay) = (line.start.x as i64, line.start.y as i64);
    let (bx, by) = (line.end.x as i64, line.end.y as i64);

    // Bounding box of the stroke, clipped to the image
    let max_x = image.width() as i64 - 1;
    let max_y = image.height() as i64 - 1;
    let x_lo = (ax.min(bx) - reach).max(0);
    let x_hi = (ax.max(bx) + reach).min(max_x);
    let y_lo = (ay.min(by) - reach).max(0);
    let y_hi = (ay.max(by) + reach).min(max_y);
    if x_lo > x_hi || y_lo > y_hi {
        return;
    }

    let (ax, ay, bx, by) = (ax as f64, ay as f64, bx as f64, by as f64);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;

    let width = image.width() as usize;
    let pixels = image.pixels_mut();

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let (px, py) = (x as f64, y as f64);
            let t = if len_sq > 0.0 {
                (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let ex = px - (ax + t * dx);
            let ey = py - (ay + t * dy);

            if ex * ex + ey * ey <= radius_sq {
                let idx = (y as usize * width + x as usize) * channels;
                pixels[idx..idx + channels].copy_from_slice(stamp);
            }
        }
    }
}
