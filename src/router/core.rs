//! Router core module - route table and ordered lookup.

use super::matcher::{match_path, ParamVec};
use super::pattern::{compile, normalize, CompiledPattern};
use crate::dispatcher::{HandlerRef, HandlerResponse, RequestContext};
use crate::middleware::{compose, MiddlewareRef};
use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A registered route.
///
/// The middleware chain is composed around the terminal handler once, when the
/// route is registered; [`Route::handler`] returns the composed result.
pub struct Route {
    method: Method,
    pattern: CompiledPattern,
    terminal: HandlerRef,
    middlewares: Vec<MiddlewareRef>,
    composed: HandlerRef,
}

impl Route {
    fn new(
        method: Method,
        pattern: CompiledPattern,
        terminal: HandlerRef,
        middlewares: Vec<MiddlewareRef>,
    ) -> Self {
        let composed = compose(Arc::clone(&terminal), &middlewares);
        Self {
            method,
            pattern,
            terminal,
            middlewares,
            composed,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Handler wrapped in the route's middleware (what the dispatcher invokes)
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.composed
    }

    /// Handler as registered, without middleware
    #[must_use]
    pub fn terminal(&self) -> &HandlerRef {
        &self.terminal
    }

    /// Middleware in registration order
    #[must_use]
    pub fn middlewares(&self) -> &[MiddlewareRef] {
        &self.middlewares
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.source())
            .field("tokens", &self.pattern.tokens())
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Captured path parameters in pattern order
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name ("last write wins" for repeated names)
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to a HashMap (allocates)
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Append-only route table.
///
/// Routes are kept per method in registration order; lookup returns the first
/// route whose pattern matches. There is no de-duplication and no conflict
/// detection: a route shadowed by an earlier one is simply never reached.
///
/// All registration happens through `&mut self`, lookup through `&self`, so
/// once the table is handed to a [`crate::dispatcher::Dispatcher`] it is
/// read-only for the lifetime of the server.
#[derive(Clone, Default)]
pub struct Router {
    by_method: HashMap<Method, Vec<Arc<Route>>>,
    /// All routes across methods, in registration order
    routes: Vec<Arc<Route>>,
}

impl Router {
    /// Create an empty router
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// `middlewares` are applied in order, so the last one listed is the
    /// outermost wrapper and runs first.
    pub fn add(
        &mut self,
        method: Method,
        pattern: &str,
        handler: HandlerRef,
        middlewares: &[MiddlewareRef],
    ) -> &mut Self {
        let compiled = compile(pattern);
        info!(
            method = %method,
            pattern = %pattern,
            tokens = compiled.tokens().len(),
            params = ?compiled.param_names().collect::<Vec<_>>(),
            middlewares = middlewares.len(),
            "Route registered"
        );

        let route = Arc::new(Route::new(
            method.clone(),
            compiled,
            handler,
            middlewares.to_vec(),
        ));
        self.by_method
            .entry(method)
            .or_default()
            .push(Arc::clone(&route));
        self.routes.push(route);
        self
    }

    /// Register a GET handler
    pub fn get<F>(&mut self, pattern: &str, handler: F, middlewares: &[MiddlewareRef]) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::GET, pattern, Arc::new(handler), middlewares)
    }

    /// Register a POST handler
    pub fn post<F>(&mut self, pattern: &str, handler: F, middlewares: &[MiddlewareRef]) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::POST, pattern, Arc::new(handler), middlewares)
    }

    /// Register a PUT handler
    pub fn put<F>(&mut self, pattern: &str, handler: F, middlewares: &[MiddlewareRef]) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::PUT, pattern, Arc::new(handler), middlewares)
    }

    /// Register a PATCH handler
    pub fn patch<F>(
        &mut self,
        pattern: &str,
        handler: F,
        middlewares: &[MiddlewareRef],
    ) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::PATCH, pattern, Arc::new(handler), middlewares)
    }

    /// Register a DELETE handler
    pub fn delete<F>(
        &mut self,
        pattern: &str,
        handler: F,
        middlewares: &[MiddlewareRef],
    ) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::DELETE, pattern, Arc::new(handler), middlewares)
    }

    /// Register a HEAD handler
    pub fn head<F>(&mut self, pattern: &str, handler: F, middlewares: &[MiddlewareRef]) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::HEAD, pattern, Arc::new(handler), middlewares)
    }

    /// Register an OPTIONS handler
    pub fn options<F>(
        &mut self,
        pattern: &str,
        handler: F,
        middlewares: &[MiddlewareRef],
    ) -> &mut Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        self.add(Method::OPTIONS, pattern, Arc::new(handler), middlewares)
    }

    /// Find the first route for `method` whose pattern matches `path`.
    ///
    /// `path` is the raw request path; it is normalized here. Unknown methods
    /// have no routes and never match.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let normalized = normalize(path);
        let candidates = self.by_method.get(method)?;

        debug!(
            method = %method,
            path = %path,
            normalized = %normalized,
            candidates = candidates.len(),
            "Route match attempt"
        );

        candidates.iter().find_map(|route| {
            match_path(route.pattern(), &normalized).map(|path_params| {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern().source(),
                    path_params = ?path_params,
                    "Route matched"
                );
                RouteMatch {
                    route: Arc::clone(route),
                    path_params,
                }
            })
        })
    }

    /// All routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    /// Routes registered for one method, in lookup order
    #[must_use]
    pub fn routes_for(&self, method: &Method) -> &[Arc<Route>] {
        self.by_method
            .get(method)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} -> {} (middlewares={})",
                route.method(),
                route.pattern().source(),
                route.pattern(),
                route.middlewares().len()
            );
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .finish()
    }
}
