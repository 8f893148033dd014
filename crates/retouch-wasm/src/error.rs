//! Conversion of session errors into JavaScript values.

use retouch_core::{ErrorKind, SessionError};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Shape of the object thrown to JavaScript: `{ kind, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&SessionError> for ErrorPayload {
    fn from(err: &SessionError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Convert an error into a tagged JS object, falling back to a plain string.
pub(crate) fn to_js_error(err: SessionError) -> JsValue {
    let payload = ErrorPayload::from(&err);
    serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| JsValue::from_str(&payload.message))
}
