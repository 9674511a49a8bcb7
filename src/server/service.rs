use super::request::{parse_request, UnknownMethod};
use super::response::write_handler_response;
use crate::dispatcher::{Dispatcher, Handler, HandlerRef, HandlerResponse, RequestContext};
use crate::middleware::{Middleware, MetricsMiddleware};
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;

/// Path of the opt-in Prometheus endpoint
pub const METRICS_PATH: &str = "/metrics";

/// `may_minihttp` service serving every request through a [`Dispatcher`].
///
/// The dispatcher is shared read-only by all connections. When metrics are
/// enabled the whole dispatch (matched or not) is measured and
/// `GET /metrics` answers with the counters instead of being routed.
#[derive(Clone)]
pub struct MuxService {
    dispatcher: Arc<Dispatcher>,
    metrics: Option<MetricsMiddleware>,
    measured: Option<HandlerRef>,
}

impl MuxService {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self::from_shared(Arc::new(dispatcher))
    }

    #[must_use]
    pub fn from_shared(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            metrics: None,
            measured: None,
        }
    }

    /// Count every request with `metrics` and expose them on `GET /metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsMiddleware) -> Self {
        let entry: HandlerRef = Arc::clone(&self.dispatcher) as HandlerRef;
        self.measured = Some(metrics.wrap(entry));
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&MetricsMiddleware> {
        self.metrics.as_ref()
    }

    /// Answer one request without any socket I/O
    #[must_use]
    pub fn serve(&self, ctx: RequestContext) -> HandlerResponse {
        if let Some(metrics) = &self.metrics {
            if ctx.method == Method::GET && ctx.path == METRICS_PATH {
                return HandlerResponse::text(200, metrics.render_prometheus());
            }
        }
        match &self.measured {
            Some(handler) => handler.handle(&ctx),
            None => self.dispatcher.dispatch(ctx),
        }
    }
}

impl MuxService {
    /// Answer a parsed request; requests with an unknown method go straight
    /// to the not-found handler
    #[must_use]
    pub fn respond(&self, parsed: Result<RequestContext, UnknownMethod>) -> HandlerResponse {
        match parsed {
            Ok(ctx) => self.serve(ctx),
            Err(unknown) => self.dispatcher.not_found(&unknown.ctx),
        }
    }
}

impl HttpService for MuxService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let response = self.respond(parse_request(req));
        write_handler_response(res, response);
        Ok(())
    }
}
