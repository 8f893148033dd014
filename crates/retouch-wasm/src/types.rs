//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! buffers and converts them to the layout a canvas expects.

use retouch_core::ImageBuffer;
use wasm_bindgen::prelude::*;

/// An image ready for display in JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` and `to_rgba()` copy
/// it into a JavaScript `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel: 1 (gray), 3 (RGB) or 4 (RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the raw interleaved samples as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data suitable for `new ImageData(...)`.
    pub fn to_rgba(&self) -> Vec<u8> {
        expand_to_rgba(&self.pixels, self.channels)
    }
}

impl JsImage {
    pub(crate) fn from_buffer(buffer: ImageBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels: buffer.channels(),
            pixels: buffer.into_pixels(),
        }
    }
}

/// Expand gray or RGB samples to opaque RGBA. RGBA input is copied as is.
pub(crate) fn expand_to_rgba(pixels: &[u8], channels: u8) -> Vec<u8> {
    match channels {
        4 => pixels.to_vec(),
        3 => pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        _ => pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
    }
}
