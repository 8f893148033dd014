//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing session to a browser UI.
//!
//! # Module Structure
//!
//! - `session` - The editing session (load, capture, draw, sharpen, rotate, reset)
//! - `capture` - Capture device backed by JavaScript callbacks
//! - `types` - Display buffers and RGBA conversion for canvas rendering
//! - `error` - Tagged `{ kind, message }` errors thrown to JavaScript
//! - `logger` - `log` records forwarded to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsImageSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod capture;
mod error;
mod logger;
mod session;
mod types;

// Re-export public types
pub use capture::JsCaptureDevice;
pub use logger::set_log_level;
pub use session::JsImageSession;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
