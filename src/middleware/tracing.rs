use std::sync::Arc;
use std::time::Instant;

use tracing::{info, info_span};

use super::Middleware;
use crate::dispatcher::{Handler, HandlerRef, HandlerResponse, RequestContext};

/// Opens a `request` span around the wrapped handler and logs status and
/// latency when it returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

struct Traced {
    next: HandlerRef,
}

impl Handler for Traced {
    fn handle(&self, ctx: &RequestContext) -> HandlerResponse {
        let span = info_span!(
            "request",
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.path,
        );
        let _guard = span.enter();
        let start = Instant::now();

        let response = self.next.handle(ctx);

        info!(
            status = response.status,
            latency_us = start.elapsed().as_micros(),
            params = ctx.params().len(),
            "Request completed"
        );
        response
    }
}

impl Middleware for TracingMiddleware {
    fn wrap(&self, next: HandlerRef) -> HandlerRef {
        Arc::new(Traced { next })
    }
}
