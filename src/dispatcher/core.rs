//! Dispatcher core module - hot path for request dispatch.

use super::request::{PathParams, RequestContext};
use super::response::HandlerResponse;
use crate::router::{RouteMatch, Router};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Something that can answer a request.
///
/// Closures `Fn(&RequestContext) -> HandlerResponse` implement this trait, as
/// do [`Dispatcher`] (mounted as a sub-router) and
/// [`crate::handlers::StaticResponder`].
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &RequestContext) -> HandlerResponse;
}

/// Shared, type-erased handler
pub type HandlerRef = Arc<dyn Handler>;

impl<F> Handler for F
where
    F: Fn(&RequestContext) -> HandlerResponse + Send + Sync,
{
    fn handle(&self, ctx: &RequestContext) -> HandlerResponse {
        self(ctx)
    }
}

/// Request entry point: route lookup, parameter binding and handler invocation.
///
/// The route table is owned by the dispatcher and is never mutated while
/// serving, so a dispatcher behind an `Arc` can be shared by every coroutine
/// of the server without locking.
pub struct Dispatcher {
    router: Router,
    not_found: Option<HandlerRef>,
}

impl Dispatcher {
    /// Create a dispatcher over a fully registered route table
    #[must_use]
    pub fn new(router: Router) -> Self {
        info!(routes_count = router.len(), "Dispatcher created");
        Self {
            router,
            not_found: None,
        }
    }

    /// Builder-style [`Dispatcher::set_not_found`]
    #[must_use]
    pub fn with_not_found(mut self, handler: HandlerRef) -> Self {
        self.set_not_found(handler);
        self
    }

    /// Handler invoked when no route matches.
    ///
    /// Without one, unmatched requests get a plain-text `404 Not found.`.
    pub fn set_not_found(&mut self, handler: HandlerRef) {
        self.not_found = Some(handler);
    }

    /// The route table
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Serve one request.
    ///
    /// Routes for the request method are tried in registration order; the
    /// first match wins and no later route is looked at. Any parameters already
    /// present on `ctx` are discarded, so the not-found handler always sees an
    /// empty set.
    pub fn dispatch(&self, mut ctx: RequestContext) -> HandlerResponse {
        let start = Instant::now();
        ctx.set_params(PathParams::default());

        match self.router.route(&ctx.method, &ctx.path) {
            Some(RouteMatch { route, path_params }) => {
                ctx.set_params(PathParams::new(path_params));
                let response = route.handler().handle(&ctx);
                debug!(
                    request_id = %ctx.request_id,
                    method = %ctx.method,
                    path = %ctx.path,
                    route_pattern = %route.pattern().source(),
                    status = response.status,
                    duration_us = start.elapsed().as_micros(),
                    "Request dispatched"
                );
                response
            }
            None => {
                warn!(
                    request_id = %ctx.request_id,
                    method = %ctx.method,
                    path = %ctx.path,
                    custom_handler = self.not_found.is_some(),
                    "No route matched, using not-found handler"
                );
                self.not_found(&ctx)
            }
        }
    }

    /// Answer with the not-found handler, or the default `404 Not found.`,
    /// without consulting the route table.
    #[must_use]
    pub fn not_found(&self, ctx: &RequestContext) -> HandlerResponse {
        match &self.not_found {
            Some(handler) => handler.handle(ctx),
            None => HandlerResponse::not_found(),
        }
    }
}

/// A dispatcher mounted as a route handler re-dispatches the request's own
/// method and path against its table.
impl Handler for Dispatcher {
    fn handle(&self, ctx: &RequestContext) -> HandlerResponse {
        self.dispatch(ctx.clone())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .field("custom_not_found", &self.not_found.is_some())
            .finish()
    }
}
