//! # brrtmux
//!
//! **brrtmux** is a small HTTP request multiplexer for the `may` coroutine
//! runtime. Routes are `(method, pattern, handler)` triples; a request is
//! served by the first route, in registration order, whose pattern matches its
//! path.
//!
//! ## Architecture
//!
//! - **[`router`]** - pattern compiler, greedy matcher and the route table
//! - **[`dispatcher`]** - request context, handler trait, responses and the
//!   dispatch loop with its not-found fallback
//! - **[`middleware`]** - handler transforms and their composition, plus
//!   tracing and metrics middleware
//! - **[`handlers`]** - static, templated responders used by route files
//! - **[`server`]** - `may_minihttp` service adapter and server handle
//! - **[`config`]** - environment and TOML route-file configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`ids`]** - ULID request IDs
//! - **[`cli`]** - the `brrtmux` command line
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as server::MuxService
//!     participant Disp as dispatcher::Dispatcher
//!     participant Router as router::Router
//!     participant MW as middleware chain
//!     participant Handler
//!
//!     Client->>Server: GET /users/42/posts
//!     Server->>Server: parse_request → RequestContext
//!     Server->>Disp: dispatch(ctx)
//!     Disp->>Router: route(GET, "/users/42/posts")
//!     Router->>Router: normalize → "users/42/posts"
//!     Router->>Router: first matching pattern wins
//!     Router-->>Disp: RouteMatch { route, path_params }
//!     Disp->>MW: handle(&ctx) (last-registered first)
//!     MW->>Handler: handle(&ctx)
//!     Handler-->>MW: HandlerResponse
//!     MW-->>Disp: HandlerResponse
//!     Disp-->>Server: HandlerResponse
//!     Server-->>Client: 200 OK
//! ```
//!
//! ## Patterns
//!
//! A pattern is literal text with `:name` parameters. Both pattern and path are
//! trimmed of leading/trailing `/` and spaces and lower-cased before matching.
//! A parameter captures everything up to the first occurrence of the literal
//! that follows it, separators included, or the rest of the path when it is
//! last. Matching is a single left-to-right pass without backtracking.
//!
//! | Pattern | Path | Captures |
//! |---------|------|----------|
//! | `/one/:middle/three` | `/one/two/three` | `middle=two` |
//! | `/one/:middle/four` | `/one/two/three/four` | `middle=two/three` |
//! | `/head/:p1/middle/prefix:p2.html` | `/head/a/b/middle/prefixc/d.html` | `p1=a/b`, `p2=c/d` |
//! | `/static` | `/static/css/site.css` | (match, no captures) |
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtmux::dispatcher::{Dispatcher, HandlerResponse, RequestContext};
//! use brrtmux::middleware::{MiddlewareRef, TracingMiddleware};
//! use brrtmux::router::Router;
//! use http::Method;
//! use std::sync::Arc;
//!
//! let tracing: MiddlewareRef = Arc::new(TracingMiddleware);
//!
//! let mut router = Router::new();
//! router.get("/files/:path", |ctx: &RequestContext| {
//!     HandlerResponse::text(200, ctx.param("path").unwrap_or_default().to_string())
//! }, &[tracing]);
//!
//! let dispatcher = Dispatcher::new(router);
//! let resp = dispatcher.dispatch(RequestContext::new(Method::GET, "/files/a/b.txt"));
//! assert_eq!(resp.body_str(), Some("a/b.txt"));
//!
//! let resp = dispatcher.dispatch(RequestContext::new(Method::GET, "/nothing"));
//! assert_eq!(resp.status, 404);
//! assert_eq!(resp.body_str(), Some("Not found."));
//! ```
//!
//! ## Serving
//!
//! ```bash
//! brrtmux serve --config routes.toml
//! ```
//!
//! See [`config`] for the route file format and environment variables.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod server;

pub use dispatcher::{
    Dispatcher, Handler, HandlerRef, HandlerResponse, HttpError, PathParams, RequestContext,
};
pub use middleware::{compose, Middleware, MiddlewareRef};
pub use router::{Route, RouteMatch, Router};
