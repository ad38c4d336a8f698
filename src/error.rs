//! Registration-time errors.
//!
//! Routing table construction problems are programmer errors, so they surface
//! immediately from `Router::handle` (and the verb helpers) instead of being
//! deferred to request time. A request that matches nothing is never an error;
//! see [`crate::dispatcher::Dispatch::NotFound`].

use http::Method;
use thiserror::Error;

/// Errors returned while building a routing table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The method is outside the supported set (GET, POST, PUT, PATCH, DELETE).
    #[error("invalid method {method}: only GET, POST, PUT, PATCH and DELETE can be registered")]
    InvalidMethod {
        /// The rejected method
        method: Method,
    },

    /// A second, different parameter pattern was registered at a trie position
    /// that already owns a parameter child.
    #[error("route conflict at '{path}': parameter '{attempted}' collides with existing '{existing}'")]
    RouteConflict {
        /// Effective path being registered (group prefix included)
        path: String,
        /// Parameter pattern already installed at that position, e.g. `:id`
        existing: String,
        /// Parameter pattern that was rejected, e.g. `:name`
        attempted: String,
    },
}
