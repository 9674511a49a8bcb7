//! # Server Module
//!
//! Bridges the [`may_minihttp`] coroutine HTTP server to the
//! [`Dispatcher`](crate::dispatcher::Dispatcher):
//!
//! - [`parse_request`] turns a raw request into a
//!   [`RequestContext`](crate::dispatcher::RequestContext),
//! - [`MuxService`] dispatches it and writes the
//!   [`HandlerResponse`](crate::dispatcher::HandlerResponse) back,
//! - [`MuxService::start`] binds the listener and returns a [`ServerHandle`]
//!   to probe, stop or join it.
//!
//! ```no_run
//! use brrtmux::dispatcher::{Dispatcher, HandlerResponse, RequestContext};
//! use brrtmux::router::Router;
//! use brrtmux::server::MuxService;
//!
//! let mut router = Router::new();
//! router.get("/ping", |_: &RequestContext| HandlerResponse::text(200, "pong"), &[]);
//!
//! let service = MuxService::new(Dispatcher::new(router));
//! let handle = service.start("127.0.0.1:8080").unwrap();
//! handle.join().unwrap();
//! ```

mod http_server;
mod request;
mod response;
mod service;

pub use http_server::{ServerHandle, MAX_REQUEST_HEADERS};
pub use request::{parse_method, parse_request, request_context, UnknownMethod};
pub use response::{status_reason, write_handler_response};
pub use service::MuxService;
