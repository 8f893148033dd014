//! Editor settings.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;

/// Settings that stay fixed for the lifetime of a session.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// RGB color stamped by line drawing. Defaults to the fixed green
    /// `[0, 255, 0]`; gray images receive its luma.
    pub line_color: [u8; 3],
    /// Resampling used by rotation.
    pub rotation_filter: InterpolationFilter,
    /// Capture device opened when none is given.
    pub capture_device: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_color: [0, 255, 0],
            rotation_filter: InterpolationFilter::Bilinear,
            capture_device: 0,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
