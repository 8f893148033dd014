//! Channel isolation for display.
//!
//! These views are never written back to the session; they exist only to be
//! shown.

use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;

/// Which color plane to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Full image.
    #[default]
    None,
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Map a selector index (0 = full image, 1 = red, 2 = green, 3 = blue).
    ///
    /// Unknown indices fall back to the full image.
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Channel::Red,
            2 => Channel::Green,
            3 => Channel::Blue,
            _ => Channel::None,
        }
    }

    /// Interleaved sample offset of this plane, if it is a color plane.
    fn plane(self) -> Option<usize> {
        match self {
            Channel::None => None,
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
        }
    }
}

/// Build a display buffer that shows only `channel`.
///
/// Color images keep their layout with the two other color planes zeroed
/// (alpha is left as is). Gray images are expanded to RGB with the gray
/// samples placed in the selected plane.
pub fn select_channel(image: &ImageBuffer, channel: Channel) -> ImageBuffer {
    let Some(plane) = channel.plane() else {
        return image.clone();
    };

    if image.channels() == 1 {
        let mut rgb = vec![0u8; image.pixel_count() * 3];
        for (dst, &v) in rgb.chunks_exact_mut(3).zip(image.pixels()) {
            dst[plane] = v;
        }
        return ImageBuffer::new(image.width(), image.height(), 3, rgb)
            .unwrap_or_else(|_| image.clone());
    }

    let channels = image.channels() as usize;
    let mut output = image.clone();
    for px in output.pixels_mut().chunks_exact_mut(channels) {
        for (c, sample) in px.iter_mut().take(3).enumerate() {
            if c != plane {
                *sample = 0;
            }
        }
    }
    output
}
