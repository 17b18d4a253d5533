//! Error types.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a text generation request produced no text.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request never got an HTTP response.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {}", excerpt(.body))]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Longest stretch of a failed response body kept in the message.
const BODY_EXCERPT_CHARS: usize = 200;

fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_owned(),
    }
}

/// Failure to find or bind the page elements the app draws into.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("element #{0} not found")]
    MissingElement(&'static str),

    #[error("element #{0} has the wrong type")]
    WrongElementType(&'static str),

    #[error("2d canvas context unavailable")]
    NoContext,
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
