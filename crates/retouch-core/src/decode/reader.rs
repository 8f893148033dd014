//! PNG, JPEG and BMP decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{LoadError, Orientation};
use crate::buffer::ImageBuffer;

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, and the errors of
/// [`decode_image`] if its contents cannot be decoded.
pub fn read_image(path: impl AsRef<Path>) -> Result<ImageBuffer, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    decode_image(&bytes)
}

/// Decode an encoded image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content. Gray, RGB and RGBA images keep
/// their channel count; other layouts (16-bit, gray + alpha) are converted
/// to the nearest 8-bit layout.
///
/// # Errors
///
/// Returns `LoadError::UnsupportedFormat` if the bytes are not a recognized
/// image format, `LoadError::Corrupted` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<ImageBuffer, LoadError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(LoadError::UnsupportedFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => LoadError::UnsupportedFormat,
        other => LoadError::Corrupted(other.to_string()),
    })?;

    let oriented = apply_orientation(img, orientation);
    to_buffer(oriented)
}

/// EXIF orientation of encoded bytes, `Normal` when absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

fn to_buffer(img: DynamicImage) -> Result<ImageBuffer, LoadError> {
    let buffer = match img {
        DynamicImage::ImageLuma8(gray) => ImageBuffer::from_gray_image(gray),
        DynamicImage::ImageRgb8(rgb) => ImageBuffer::from_rgb_image(rgb),
        DynamicImage::ImageRgba8(rgba) => ImageBuffer::from_rgba_image(rgba),
        other => {
            let color = other.color();
            if color.has_alpha() {
                ImageBuffer::from_rgba_image(other.into_rgba8())
            } else if color.has_color() {
                ImageBuffer::from_rgb_image(other.into_rgb8())
            } else {
                ImageBuffer::from_gray_image(other.into_luma8())
            }
        }
    };

    if buffer.is_empty() {
        return Err(LoadError::UnsupportedLayout(format!(
            "{}x{} image has no pixels",
            buffer.width(),
            buffer.height()
        )));
    }
    Ok(buffer)
}
