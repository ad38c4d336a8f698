use http::Method;
use std::sync::Arc;

use crate::server::{Request, ResponseWriter};

/// A request handler: reads the request, writes the response, returns nothing.
///
/// Handlers are shared across concurrent dispatches, so they must be
/// `Send + Sync`; any interior state is the handler author's business.
pub type Handler = Arc<dyn Fn(&Request, &mut ResponseWriter) + Send + Sync>;

/// Box a closure into a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Outcome of a single dispatch. Exactly one handler ran for either variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A bound route handled the request
    Matched {
        method: Method,
        /// Registered pattern, group prefix included, e.g. `greet/:name`
        pattern: Arc<str>,
    },
    /// Nothing matched; the not-found handler ran
    NotFound,
}

impl Dispatch {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Dispatch::Matched { .. })
    }
}
