//! WASM bindings for the editing session.
//!
//! `JsImageSession` keeps the working and original buffers in WASM memory
//! along with the text of the rotation angle field, so the page only passes
//! user input in and pulls display buffers out.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsImageSession();
//! try {
//!   session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!   session.draw_line("10", "10", "200", "120", "3");
//!   session.angle_text = "15";
//!   session.rotate();
//! } catch (e) {
//!   alert(e.message); // e.kind is "load" | "device" | "input"
//! }
//! const view = session.select_channel(1); // red only
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(view.to_rgba()), view.width), 0, 0);
//! ```

use retouch_core::{
    Channel, EditorConfig, ImageSession, LineInput, Outcome, RotationInput,
};
use wasm_bindgen::prelude::*;

use crate::capture::JsCaptureDevice;
use crate::error::to_js_error;
use crate::types::JsImage;

/// An image editing session for a single page.
#[wasm_bindgen]
pub struct JsImageSession {
    session: ImageSession,
    angle: RotationInput,
}

#[wasm_bindgen]
impl JsImageSession {
    /// Create a session. `config` is an optional object with any of
    /// `line_color`, `rotation_filter`, `capture_device`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsImageSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Ok(Self::from_config(config))
    }

    /// Whether an image has been loaded or captured.
    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.session.is_loaded()
    }

    /// Current text of the rotation angle field.
    #[wasm_bindgen(getter)]
    pub fn angle_text(&self) -> String {
        self.angle.angle.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_angle_text(&mut self, text: String) {
        self.angle.angle = text;
    }

    /// Decode an encoded PNG, JPEG or BMP file into the session.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session.load_bytes(bytes).map_err(to_js_error)
    }

    /// Capture one frame. Uses the configured device when `index` is omitted.
    pub fn capture_from_device(
        &mut self,
        device: &mut JsCaptureDevice,
        index: Option<u32>,
    ) -> Result<(), JsValue> {
        let index = index.unwrap_or(self.session.config().capture_device);
        self.session
            .capture_from_device(device, index)
            .map_err(to_js_error)
    }

    /// Draw a line from the five form fields. Returns false with no image.
    pub fn draw_line(
        &mut self,
        start_x: &str,
        start_y: &str,
        end_x: &str,
        end_y: &str,
        thickness: &str,
    ) -> Result<bool, JsValue> {
        let input = LineInput::new(start_x, start_y, end_x, end_y, thickness);
        self.session
            .draw_line(&input)
            .map(updated)
            .map_err(to_js_error)
    }

    /// Sharpen once more. Returns false with no image.
    pub fn sharpen(&mut self) -> bool {
        updated(self.session.sharpen())
    }

    /// Rotate by the angle held in `angle_text`. Returns false with no image.
    pub fn rotate(&mut self) -> Result<bool, JsValue> {
        self.session
            .rotate(&self.angle)
            .map(updated)
            .map_err(to_js_error)
    }

    /// Discard all edits. Returns false with no image.
    pub fn clear_edits(&mut self) -> bool {
        updated(self.session.clear_edits())
    }

    /// Discard all edits and empty `angle_text`. Returns false with no image.
    pub fn reset_rotation(&mut self) -> bool {
        updated(self.session.reset_rotation(&mut self.angle))
    }

    /// The working image, or undefined with no image.
    pub fn current(&self) -> Option<JsImage> {
        self.session.current().cloned().map(JsImage::from_buffer)
    }

    /// A display-only view: 0 = full image, 1 = red, 2 = green, 3 = blue.
    pub fn select_channel(&self, index: u32) -> Option<JsImage> {
        self.session
            .select_channel(Channel::from_index(index))
            .map(JsImage::from_buffer)
    }
}

impl JsImageSession {
    pub(crate) fn from_config(config: EditorConfig) -> Self {
        Self {
            session: ImageSession::with_config(config),
            angle: RotationInput::default(),
        }
    }
}

fn updated(outcome: Outcome) -> bool {
    outcome == Outcome::Updated
}
