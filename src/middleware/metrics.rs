use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::Middleware;
use crate::dispatcher::{Handler, HandlerRef, HandlerResponse, RequestContext};

#[derive(Default)]
struct Counters {
    request_count: AtomicUsize,
    total_latency_ns: AtomicU64,
    success: AtomicUsize,
    client_errors: AtomicUsize,
    server_errors: AtomicUsize,
}

/// Middleware collecting Prometheus-compatible request metrics.
///
/// Cloning is cheap and every clone shares the same counters, so one instance
/// can wrap many routes while the server renders the totals on `/metrics`.
/// All counters use relaxed atomics; the middleware never blocks a request.
#[derive(Clone, Default)]
pub struct MetricsMiddleware {
    counters: Arc<Counters>,
}

impl MetricsMiddleware {
    /// Create a new metrics middleware with all counters initialized to zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of requests processed
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.counters.request_count.load(Ordering::Relaxed)
    }

    /// Calculate the average request latency
    ///
    /// Returns zero duration if no requests have been processed yet.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count() as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.counters.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    /// Requests answered with a status below 400
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.counters.success.load(Ordering::Relaxed)
    }

    /// Requests answered with a 4xx status
    #[must_use]
    pub fn client_error_count(&self) -> usize {
        self.counters.client_errors.load(Ordering::Relaxed)
    }

    /// Requests answered with a 5xx status
    #[must_use]
    pub fn server_error_count(&self) -> usize {
        self.counters.server_errors.load(Ordering::Relaxed)
    }

    fn record(&self, status: u16, latency: Duration) {
        let c = &self.counters;
        c.request_count.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        c.total_latency_ns.fetch_add(nanos, Ordering::Relaxed);
        let bucket = match status {
            500.. => &c.server_errors,
            400..=499 => &c.client_errors,
            _ => &c.success,
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }

    /// Render the counters in Prometheus text exposition format
    #[must_use]
    pub fn render_prometheus(&self) -> String {
        format!(
            "# HELP brrtmux_requests_total Total number of handled requests\n\
             # TYPE brrtmux_requests_total counter\n\
             brrtmux_requests_total {}\n\
             # HELP brrtmux_request_latency_seconds Average request latency in seconds\n\
             # TYPE brrtmux_request_latency_seconds gauge\n\
             brrtmux_request_latency_seconds {}\n\
             # HELP brrtmux_responses_total Responses by status class\n\
             # TYPE brrtmux_responses_total counter\n\
             brrtmux_responses_total{{class=\"success\"}} {}\n\
             brrtmux_responses_total{{class=\"client_error\"}} {}\n\
             brrtmux_responses_total{{class=\"server_error\"}} {}\n",
            self.request_count(),
            self.average_latency().as_secs_f64(),
            self.success_count(),
            self.client_error_count(),
            self.server_error_count(),
        )
    }
}

struct Measured {
    metrics: MetricsMiddleware,
    next: HandlerRef,
}

impl Handler for Measured {
    fn handle(&self, ctx: &RequestContext) -> HandlerResponse {
        let start = Instant::now();
        let response = self.next.handle(ctx);
        self.metrics.record(response.status, start.elapsed());
        response
    }
}

impl Middleware for MetricsMiddleware {
    fn wrap(&self, next: HandlerRef) -> HandlerRef {
        Arc::new(Measured {
            metrics: self.clone(),
            next,
        })
    }
}
