//! Session-level error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::DeviceError;
use crate::decode::LoadError;
use crate::input::InputError;

/// Any failure of a session operation.
///
/// A failed operation never changes the session's buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Could not load image: {0}")]
    Load(#[from] LoadError),

    #[error("Capture failed: {0}")]
    Device(#[from] DeviceError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),
}

/// Tag for routing errors to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Load,
    Device,
    Input,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Load(_) => ErrorKind::Load,
            SessionError::Device(_) => ErrorKind::Device,
            SessionError::Input(_) => ErrorKind::Input,
        }
    }
}
