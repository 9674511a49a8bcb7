use crate::dispatcher::{HeaderVec, RequestContext};
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use http::Method;
use may_minihttp::Request;
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, warn};

/// Build a [`RequestContext`] from an already-decoded request.
///
/// The request ID is taken from `x-request-id` when it holds a valid ULID. A
/// non-empty body is kept when it parses as JSON; other bodies are dropped.
#[must_use]
pub fn request_context(
    method: Method,
    target: &str,
    headers: HeaderVec,
    body: &str,
) -> RequestContext {
    let mut ctx = RequestContext::new(method, target);
    ctx.request_id = RequestId::from_header_or_new(
        headers
            .iter()
            .find(|(k, _)| k.as_ref() == REQUEST_ID_HEADER)
            .map(|(_, v)| v.as_str()),
    );
    ctx.headers = headers;

    if !body.is_empty() {
        match serde_json::from_str::<Value>(body) {
            Ok(json) => ctx.body = Some(json),
            Err(err) => debug!(
                request_id = %ctx.request_id,
                body_size_bytes = body.len(),
                error = %err,
                "Request body is not JSON, ignoring"
            ),
        }
    }
    ctx
}

/// A request whose method token `http` cannot represent.
///
/// It has no route table to search, so it is answered by the not-found
/// handler. `ctx.method` is a `GET` placeholder; the raw token is kept here.
#[derive(Debug)]
pub struct UnknownMethod {
    pub method: String,
    pub ctx: RequestContext,
}

/// Method token as `http` understands it, extension methods included
#[must_use]
pub fn parse_method(raw: &str) -> Option<Method> {
    Method::from_bytes(raw.as_bytes()).ok()
}

/// Parse an incoming `may_minihttp` request.
///
/// Header names are lower-cased.
///
/// # Errors
///
/// [`UnknownMethod`] when the method token is not a valid HTTP method.
pub fn parse_request(req: Request) -> Result<RequestContext, UnknownMethod> {
    let raw_method = req.method().to_string();
    let method = parse_method(&raw_method);
    let target = req.path().to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase()),
                String::from_utf8_lossy(h.value).into_owned(),
            )
        })
        .collect();

    let mut body = String::new();
    if let Err(err) = req.body().read_to_string(&mut body) {
        debug!(error = %err, "Failed to read request body");
        body.clear();
    }

    let Some(method) = method else {
        let ctx = request_context(Method::GET, &target, headers, &body);
        warn!(
            request_id = %ctx.request_id,
            method = %raw_method,
            path = %ctx.path,
            "Unparseable request method, answering with not-found"
        );
        return Err(UnknownMethod {
            method: raw_method,
            ctx,
        });
    };

    let ctx = request_context(method, &target, headers, &body);
    debug!(
        request_id = %ctx.request_id,
        method = %ctx.method,
        path = %ctx.path,
        headers_count = ctx.headers.len(),
        query_count = ctx.query_params.len(),
        has_body = ctx.body.is_some(),
        "HTTP request parsed"
    );
    Ok(ctx)
}
