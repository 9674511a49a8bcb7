use crate::ids::RequestId;
use crate::router::ParamVec;
use http::Method;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage, names lower-cased
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Parameters captured by the matched route.
///
/// Lookups use "last write wins": a pattern such as `/:id/x/:id` yields the
/// second capture for `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(ParamVec);

impl PathParams {
    /// Wrap captures produced by the matcher
    #[must_use]
    pub fn new(params: ParamVec) -> Self {
        Self(params)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate captures in pattern order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Copy into a `HashMap` (allocates; prefer [`PathParams::get`] in handlers)
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl Serialize for PathParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map = self.to_map();
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (k, v) in &map {
            out.serialize_entry(k, v)?;
        }
        out.end()
    }
}

/// Request-scoped context handed to middleware and handlers.
///
/// The dispatcher attaches the route captures before invoking the handler
/// chain; handlers only ever see a shared reference, so the captures are fixed
/// for the rest of the request. Outside a matched route (for example in the
/// not-found handler) [`RequestContext::params`] is empty.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Raw request path without the query string
    pub path: String,
    /// Query string parameters
    pub query_params: ParamVec,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
    params: PathParams,
}

impl RequestContext {
    /// Build a context for `method` and a raw request target.
    ///
    /// Anything after `?` is parsed as a URL-encoded query string and removed
    /// from [`RequestContext::path`].
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let query_params = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (Arc::from(&*k), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            request_id: RequestId::new(),
            method,
            path: path.to_string(),
            query_params,
            headers: HeaderVec::new(),
            body: None,
            params: PathParams::default(),
        }
    }

    /// Add a header; the name is stored lower-cased
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .push((Arc::from(name.to_ascii_lowercase()), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Captures of the matched route (empty outside a match)
    #[inline]
    #[must_use]
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Shorthand for `self.params().get(name)`
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Get a query parameter by name (last occurrence wins)
    #[inline]
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn set_params(&mut self, params: PathParams) {
        self.params = params;
    }
}
