//! Geometric transforms.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is the top-left corner, y grows downward
//! - Output dimensions always equal input dimensions

mod rotation;

pub use rotation::{rotate_about_center, InterpolationFilter};
