//! Image loading for the editing session.
//!
//! This module provides functionality for:
//! - Reading image files from disk (PNG, JPEG, BMP)
//! - Decoding in-memory encoded images
//! - Applying the EXIF orientation tag so images display upright
//!
//! There is no encode path: the editor never writes images back.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::read_image;
//!
//! let image = read_image("photo.jpg")?;
//! println!("Loaded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, read_image};
pub use types::{LoadError, Orientation};
