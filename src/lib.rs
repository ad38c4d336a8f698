//! # sprig
//!
//! **sprig** is a small HTTP request router built on a segment trie. Paths are
//! split on `/` and matched one segment at a time; a segment written as
//! `:name` captures whatever the request has in that position.
//!
//! ## Overview
//!
//! A [`Router`] keeps one trie per HTTP method. Routes are registered with
//! [`Router::get`], [`Router::post`] and friends, grouped under a shared
//! prefix with [`Router::group`], and decorated with middleware via
//! [`Router::add_middleware`]. [`Router::dispatch`] resolves a [`Request`],
//! publishes captured parameters on it and runs exactly one handler: the
//! matched route's chain or the not-found handler.
//!
//! ## Architecture
//!
//! - **[`router`]** - segment trie, registration facade, path parameters
//! - **[`dispatcher`]** - handler type and dispatch outcome
//! - **[`middleware`]** - middleware trait, chain composition, tracing and metrics
//! - **[`server`]** - request and response-writer types plus `http` crate adapters
//! - **[`error`]** - registration errors
//! - **[`otel`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - environment-driven runtime knobs
//! - **[`ids`]** - request identifiers
//!
//! ## Quick Start
//!
//! ```rust
//! use http::{Method, StatusCode};
//! use sprig::{get_param, Request, ResponseWriter, Router};
//!
//! let router = Router::new();
//! router
//!     .get("/users/:id", |req: &Request, w: &mut ResponseWriter| {
//!         w.write_str(&format!("user {}", get_param(req, "id")));
//!     })
//!     .unwrap();
//!
//! let mut w = ResponseWriter::new();
//! router.dispatch(Request::new(Method::GET, "/users/42"), &mut w);
//! assert_eq!(w.body_text(), "user 42");
//!
//! let mut w = ResponseWriter::new();
//! router.dispatch(Request::new(Method::GET, "/users"), &mut w);
//! assert_eq!(w.status(), StatusCode::NOT_FOUND);
//! ```
//!
//! ## Logging
//!
//! Registration and dispatch emit `tracing` events. Call
//! [`otel::init_logging`] once at startup to install a subscriber configured
//! from `SPRIG_LOG_*` environment variables.

pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod middleware;
pub mod otel;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{handler, Dispatch, Handler};
pub use error::RouterError;
pub use ids::RequestId;
pub use middleware::{Middleware, MetricsMiddleware, TracingMiddleware};
pub use router::{get_all_params, get_param, Params, Router};
pub use runtime_config::RuntimeConfig;
pub use server::{Request, ResponseWriter, NOT_FOUND_BODY};
