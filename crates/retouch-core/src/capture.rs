//! Single-frame acquisition from capture devices.
//!
//! A [`CaptureDevice`] opens an exclusive [`FrameStream`]. The stream is
//! released when it is dropped, which [`capture_frame`] does as soon as one
//! frame has been read or reading failed.

use thiserror::Error;

use crate::buffer::ImageBuffer;

/// Errors from capture devices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The device could not be opened.
    #[error("Could not open capture device {index}: {reason}")]
    Unavailable { index: u32, reason: String },

    /// The device opened but returned no frame.
    #[error("Capture device {index} returned no frame")]
    NoFrame { index: u32 },

    /// The device returned data that is not a valid image.
    #[error("Capture device returned an invalid frame: {0}")]
    InvalidFrame(String),
}

/// An open, exclusively held device stream.
///
/// Implementations release the underlying handle in `Drop`.
pub trait FrameStream {
    /// Read the next frame, or `Ok(None)` if the device has none.
    fn read_frame(&mut self) -> Result<Option<ImageBuffer>, DeviceError>;
}

/// A source of frames addressed by device index.
pub trait CaptureDevice {
    type Stream: FrameStream;

    /// Open the device with the given index.
    fn open(&mut self, index: u32) -> Result<Self::Stream, DeviceError>;
}

/// Open device `index`, read exactly one frame and release the device.
///
/// # Errors
///
/// Returns `DeviceError::Unavailable` if the device cannot be opened and
/// `DeviceError::NoFrame` if it yields no (or an empty) frame.
pub fn capture_frame<D>(device: &mut D, index: u32) -> Result<ImageBuffer, DeviceError>
where
    D: CaptureDevice + ?Sized,
{
    let mut stream = device.open(index)?;
    let frame = stream.read_frame();
    drop(stream);

    match frame? {
        Some(frame) if !frame.is_empty() => {
            log::debug!(
                "captured {}x{} frame from device {}",
                frame.width(),
                frame.height(),
                index
            );
            Ok(frame)
        }
        _ => Err(DeviceError::NoFrame { index }),
    }
}
