//! Capture device backed by JavaScript callbacks.
//!
//! The page owns the actual camera (e.g. `getUserMedia` plus a canvas). It
//! hands Retouch a `grab(index)` function returning one frame as
//! `{ width, height, channels?, pixels }` (or `null` when no frame is
//! available) and an optional `release(index)` function that is called once
//! the frame has been read, whether or not reading succeeded.

use js_sys::{Function, Reflect, Uint8Array};
use retouch_core::{CaptureDevice, DeviceError, FrameStream, ImageBuffer};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Frame dimensions as sent from JavaScript; pixels are read separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct FrameInfo {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_channels")]
    pub channels: u8,
}

fn default_channels() -> u8 {
    4
}

impl FrameInfo {
    /// Wrap raw samples, rejecting data that doesn't match the dimensions.
    pub(crate) fn into_buffer(self, pixels: Vec<u8>) -> Result<ImageBuffer, DeviceError> {
        ImageBuffer::new(self.width, self.height, self.channels, pixels)
            .map_err(|e| DeviceError::InvalidFrame(e.to_string()))
    }
}

/// A capture device whose frames come from JavaScript.
#[wasm_bindgen]
pub struct JsCaptureDevice {
    grab: Function,
    release: Option<Function>,
}

#[wasm_bindgen]
impl JsCaptureDevice {
    /// Create a device from a `grab(index)` callback and an optional
    /// `release(index)` callback.
    #[wasm_bindgen(constructor)]
    pub fn new(grab: Function, release: Option<Function>) -> JsCaptureDevice {
        JsCaptureDevice { grab, release }
    }
}

/// An open JavaScript device. Calls `release` when dropped.
pub struct JsFrameStream {
    index: u32,
    grab: Function,
    release: Option<Function>,
}

impl FrameStream for JsFrameStream {
    fn read_frame(&mut self) -> Result<Option<ImageBuffer>, DeviceError> {
        let value = self
            .grab
            .call1(&JsValue::NULL, &JsValue::from(self.index))
            .map_err(|e| DeviceError::Unavailable {
                index: self.index,
                reason: describe(&e),
            })?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        let info: FrameInfo = serde_wasm_bindgen::from_value(value.clone())
            .map_err(|e| DeviceError::InvalidFrame(e.to_string()))?;
        let pixels = Reflect::get(&value, &JsValue::from_str("pixels"))
            .map_err(|e| DeviceError::InvalidFrame(describe(&e)))?;
        if !pixels.is_instance_of::<Uint8Array>() && !pixels.is_instance_of::<js_sys::Uint8ClampedArray>() {
            return Err(DeviceError::InvalidFrame(
                "pixels must be a Uint8Array or Uint8ClampedArray".to_string(),
            ));
        }
        let pixels = Uint8Array::new(&pixels).to_vec();

        info.into_buffer(pixels).map(Some)
    }
}

impl Drop for JsFrameStream {
    fn drop(&mut self) {
        if let Some(release) = &self.release {
            if let Err(e) = release.call1(&JsValue::NULL, &JsValue::from(self.index)) {
                log::warn!("releasing capture device {} failed: {}", self.index, describe(&e));
            }
        }
    }
}

impl CaptureDevice for JsCaptureDevice {
    type Stream = JsFrameStream;

    fn open(&mut self, index: u32) -> Result<JsFrameStream, DeviceError> {
        Ok(JsFrameStream {
            index,
            grab: self.grab.clone(),
            release: self.release.clone(),
        })
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
