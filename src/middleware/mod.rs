//! # Middleware Module
//!
//! Middleware are handler transforms: [`Middleware::wrap`] receives the next
//! handler and returns a handler that wraps it. A route's middleware list is
//! folded over its handler with [`compose`], so the **last** middleware listed
//! at registration is the outermost wrapper and runs first:
//!
//! ```text
//! router.get("/x", handler, &[auth, tracing])
//!
//! request → tracing → auth → handler
//! ```
//!
//! Built-in middleware:
//! - [`TracingMiddleware`] - request span plus a completion log line
//! - [`MetricsMiddleware`] - request counts, average latency, status classes

mod core;
mod metrics;
mod tracing;

pub use core::{compose, Middleware, MiddlewareRef};
pub use metrics::MetricsMiddleware;
pub use tracing::TracingMiddleware;
