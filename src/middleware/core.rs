use std::sync::Arc;

use crate::dispatcher::HandlerRef;

/// A handler transform: takes the next handler and returns one wrapping it.
///
/// Closures `Fn(HandlerRef) -> HandlerRef` implement this trait.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: HandlerRef) -> HandlerRef;
}

/// Shared, type-erased middleware
pub type MiddlewareRef = Arc<dyn Middleware>;

impl<F> Middleware for F
where
    F: Fn(HandlerRef) -> HandlerRef + Send + Sync,
{
    fn wrap(&self, next: HandlerRef) -> HandlerRef {
        self(next)
    }
}

/// Wrap `terminal` with `middlewares`.
///
/// `m1` wraps the terminal handler, `m2` wraps that, and so on, so for
/// `[m1, m2, m3]` a request flows `m3 → m2 → m1 → terminal`: the
/// last-registered middleware runs first.
#[must_use]
pub fn compose(terminal: HandlerRef, middlewares: &[MiddlewareRef]) -> HandlerRef {
    middlewares
        .iter()
        .fold(terminal, |next, middleware| middleware.wrap(next))
}
