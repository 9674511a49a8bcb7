//! # Dispatcher Module
//!
//! The dispatcher is the request-serving entry point of brrtmux. It owns the
//! route table and, for every request:
//!
//! 1. normalizes the raw path (separators trimmed, lower-cased),
//! 2. walks the routes registered for the request method in registration order,
//! 3. on the first match attaches the captured parameters to the
//!    [`RequestContext`] and invokes the route's composed handler,
//! 4. otherwise invokes the not-found handler (or a default `404 Not found.`).
//!
//! ## Handlers
//!
//! Anything implementing [`Handler`] can answer a request. Plain closures work:
//!
//! ```rust
//! use brrtmux::dispatcher::{Dispatcher, HandlerResponse, RequestContext};
//! use brrtmux::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/users/:id", |ctx: &RequestContext| {
//!     HandlerResponse::text(200, format!("user {}", ctx.param("id").unwrap_or("?")))
//! }, &[]);
//!
//! let dispatcher = Dispatcher::new(router);
//! let resp = dispatcher.dispatch(RequestContext::new(Method::GET, "/users/42"));
//! assert_eq!(resp.body_str(), Some("user 42"));
//! ```
//!
//! ## Request Context
//!
//! Parameters are carried explicitly on the [`RequestContext`] passed by
//! reference through middleware and handler; there is no ambient per-request
//! storage. The context is created per request and never shared.

mod core;
mod request;
mod response;

pub use core::{Dispatcher, Handler, HandlerRef};
pub use request::{HeaderVec, PathParams, RequestContext, MAX_INLINE_HEADERS};
pub use response::{
    HandlerResponse, HttpError, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT, NOT_FOUND_BODY,
};
