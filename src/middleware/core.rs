use std::sync::Arc;

use crate::dispatcher::Handler;

/// Decorator over a [`Handler`].
///
/// `wrap` receives the next-inner handler and returns its replacement. Any
/// `Fn(Handler) -> Handler` closure is a middleware.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: Handler) -> Handler;
}

impl<F> Middleware for F
where
    F: Fn(Handler) -> Handler + Send + Sync,
{
    fn wrap(&self, next: Handler) -> Handler {
        self(next)
    }
}

/// Ordered middleware list, first entry outermost
pub type MiddlewareChain = Vec<Arc<dyn Middleware>>;

/// Wrap `handler` so that `chain[0]` runs first and the handler runs last.
#[must_use]
pub fn compose(handler: &Handler, chain: &[Arc<dyn Middleware>]) -> Handler {
    chain
        .iter()
        .rev()
        .fold(Arc::clone(handler), |next, mw| mw.wrap(next))
}
