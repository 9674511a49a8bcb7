use crate::dispatcher::HandlerResponse;
use may_minihttp::Response;
use serde_json::Value;
use tracing::{debug, error};

/// Reason phrase for the status line
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// `may_minihttp` only accepts `'static` header lines, so the content type is
/// mapped onto a fixed set.
fn content_type_header(response: &HandlerResponse) -> &'static str {
    let declared = response
        .get_header("content-type")
        .map(str::to_ascii_lowercase);
    match declared.as_deref() {
        Some(ct) if ct.starts_with("application/json") => "Content-Type: application/json",
        Some(ct) if ct.starts_with("text/plain") => "Content-Type: text/plain; charset=utf-8",
        Some(ct) if ct.starts_with("text/html") => "Content-Type: text/html; charset=utf-8",
        Some(ct) if ct.starts_with("text/event-stream") => "Content-Type: text/event-stream",
        Some(ct) if ct.starts_with("text/yaml") => "Content-Type: text/yaml",
        Some(ct) if ct.starts_with("application/octet-stream") => {
            "Content-Type: application/octet-stream"
        }
        Some(ct) if ct.starts_with("text/") => "Content-Type: text/plain; charset=utf-8",
        Some(other) => {
            debug!(content_type = %other, "Unsupported content type, inferring from body");
            infer(&response.body)
        }
        None => infer(&response.body),
    }
}

fn infer(body: &Value) -> &'static str {
    match body {
        Value::String(_) | Value::Null => "Content-Type: text/plain; charset=utf-8",
        _ => "Content-Type: application/json",
    }
}

/// Write `response` onto the wire.
///
/// A string body is written verbatim, `null` as an empty body and any other
/// value as JSON. Headers other than `Content-Type` are not written.
pub fn write_handler_response(res: &mut Response, response: HandlerResponse) {
    res.status_code(usize::from(response.status), status_reason(response.status));
    res.header(content_type_header(&response));

    let bytes = match response.body {
        Value::String(s) => s.into_bytes(),
        Value::Null => Vec::new(),
        other => match serde_json::to_vec(&other) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(error = %err, "Failed to serialize response body");
                Vec::new()
            }
        },
    };
    res.body_vec(bytes);
}
