use super::request::HeaderVec;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// `Content-Type` used by [`HandlerResponse::json`]
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// `Content-Type` used by [`HandlerResponse::text`]
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Body of the default not-found response
pub const NOT_FOUND_BODY: &str = "Not found.";

/// Response produced by a handler.
///
/// A `Value::String` body is written verbatim, `Value::Null` as an empty body
/// and anything else is serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body
    pub body: Value,
}

impl HandlerResponse {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), CONTENT_TYPE_JSON.to_string()));
        Self::new(status, headers, body)
    }

    /// Create a plain-text response
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), CONTENT_TYPE_TEXT.to_string()));
        Self::new(status, headers, Value::String(body.into()))
    }

    /// Create a JSON error response: `{"error": message}`
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Render an error as plain text.
    ///
    /// The status comes from [`HttpError`] when `err` is one, otherwise 500.
    #[must_use]
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let status = err
            .downcast_ref::<HttpError>()
            .map_or(500, HttpError::status);
        Self::text(status, err.to_string())
    }

    /// The default response when no route matches
    #[must_use]
    pub fn not_found() -> Self {
        Self::text(404, NOT_FOUND_BODY)
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Body text, if the body is a string
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_str()
    }
}

/// Error carrying the HTTP status it should be rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    status: u16,
    message: String,
}

impl HttpError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

impl From<HttpError> for HandlerResponse {
    fn from(err: HttpError) -> Self {
        HandlerResponse::text(err.status, err.message)
    }
}
