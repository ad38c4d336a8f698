//! # Middleware Module
//!
//! A middleware takes the next handler in the chain and returns a handler that
//! wraps it. Attach them with `Router::add_middleware`; the first one attached
//! runs outermost.
//!
//! ```rust
//! use std::sync::Arc;
//! use sprig::{Handler, Request, ResponseWriter, Router};
//!
//! let mut router = Router::new();
//! router.add_middleware(|next: Handler| -> Handler {
//!     Arc::new(move |req: &Request, w: &mut ResponseWriter| {
//!         w.set_header(
//!             http::header::SERVER,
//!             http::HeaderValue::from_static("sprig"),
//!         );
//!         next(req, w);
//!     })
//! });
//! ```
//!
//! Middleware bound to a route is fixed when the route is registered. Adding
//! middleware afterwards does not affect routes that already exist.
//!
//! ## Built-in middleware
//!
//! - [`TracingMiddleware`] opens a `request` span per dispatch
//! - [`MetricsMiddleware`] keeps request, latency and status-class counters

mod core;
mod metrics;
mod tracing;

pub use core::{compose, Middleware, MiddlewareChain};
pub use metrics::{MetricsMiddleware, MetricsSnapshot};
pub use tracing::TracingMiddleware;
