//! Retouch Core - image session and editing transforms
//!
//! This crate holds the editing model behind the Retouch UI: an
//! [`ImageSession`] with a working buffer and the original it was loaded
//! from, plus the transforms the session applies (line drawing, sharpening,
//! rotation and channel isolation).
//!
//! The session is single-threaded and synchronous. UI handlers call one
//! operation at a time and redisplay [`ImageSession::current`] or a channel
//! view afterwards.

pub mod buffer;
pub mod capture;
pub mod channel;
pub mod config;
pub mod decode;
pub mod draw;
pub mod error;
pub mod filter;
pub mod input;
pub mod session;
pub mod transform;

pub use buffer::{BufferError, ImageBuffer};
pub use capture::{capture_frame, CaptureDevice, DeviceError, FrameStream};
pub use channel::{select_channel, Channel};
pub use config::EditorConfig;
pub use decode::LoadError;
pub use error::{ErrorKind, SessionError};
pub use filter::{convolve3x3, sharpen, Kernel3};
pub use input::{InputError, LineInput, LineSpec, Point, RotationInput, RotationSpec};
pub use session::{ImageSession, Outcome};
pub use transform::{rotate_about_center, InterpolationFilter};
