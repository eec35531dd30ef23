//! Response construction for the forwarding handlers.
//!
//! # Responsibilities
//! - Relay upstream bodies verbatim with a JSON content type
//! - Render the error envelope `{"error": "<message>"}`
//! - Turn extractor rejections into the same envelope
//!
//! # Design Decisions
//! - Upstream bodies are never parsed; they are relayed as opaque text
//! - Envelope messages are JSON-escaped so the body is always well formed

use axum::extract::rejection::{PathRejection, StringRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Content type on every response produced by the proxy.
pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Fixed body returned after a successful delete.
pub const DELETED_BODY: &str = r#"{"message": "Book deleted successfully"}"#;

/// Fixed message returned by get-by-id on any failure.
pub const NOT_FOUND_MESSAGE: &str = "Book not found";

/// A text body relayed with the JSON content type.
#[derive(Debug, Clone)]
pub struct JsonText {
    pub status: StatusCode,
    pub body: String,
}

impl JsonText {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn created(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: body.into(),
        }
    }
}

impl IntoResponse for JsonText {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
            self.body,
        )
            .into_response()
    }
}

/// Error envelope returned when forwarding fails.
#[derive(Debug, Clone)]
pub struct ProxyError {
    pub status: StatusCode,
    pub message: String,
}

impl ProxyError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 500 with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// 404 with the fixed "not found" message.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    /// Render the envelope body.
    pub fn body(&self) -> String {
        let message = serde_json::Value::String(self.message.clone());
        format!("{{\"error\": {}}}", message)
    }
}

impl From<PathRejection> for ProxyError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

/// Covers the body limit (413) as well as non-UTF-8 bodies (400).
impl From<StringRejection> for ProxyError {
    fn from(rejection: StringRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        JsonText {
            status: self.status,
            body: self.body(),
        }
        .into_response()
    }
}
