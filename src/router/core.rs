//! Router core module - registration facade and request dispatch.

use http::Method;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::params::Params;
use super::trie::{split_segments, Insertion, Trie};
use crate::dispatcher::{handler, Dispatch, Handler};
use crate::error::RouterError;
use crate::middleware::{Middleware, MiddlewareChain};
use crate::runtime_config::RuntimeConfig;
use crate::server::{Request, ResponseWriter, REQUEST_ID_HEADER};

/// Methods accepted by [`Router::handle`]
pub const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// One trie per method, shared between a router and all of its groups
type RouteTable = HashMap<Method, Trie>;

static DEFAULT_NOT_FOUND: Lazy<Handler> = Lazy::new(|| handler(|_req, w| w.not_found()));

/// Registration and dispatch facade.
///
/// A `Router` owns a handle to a per-method route table, a path prefix (empty
/// for the top-level router), its own middleware list and an optional custom
/// not-found handler. [`Router::group`] returns a sub-router that shares the
/// route table but nothing else.
///
/// Registration takes the table's write lock, dispatch takes its read lock and
/// releases it before any handler runs, so a fully built `Router` can be
/// dispatched from many threads at once.
///
/// ```rust
/// use http::{Method, StatusCode};
/// use sprig::{Request, ResponseWriter, Router};
///
/// let router = Router::new();
/// router
///     .get("/greet/:name", |req: &Request, w: &mut ResponseWriter| {
///         w.write_str(&format!("hello {}", req.param("name")));
///     })
///     .unwrap();
///
/// let mut w = ResponseWriter::new();
/// router.dispatch(Request::new(Method::GET, "/greet/world"), &mut w);
/// assert_eq!(w.status(), StatusCode::OK);
/// assert_eq!(w.body_text(), "hello world");
/// ```
pub struct Router {
    trees: Arc<RwLock<RouteTable>>,
    group: String,
    middlewares: MiddlewareChain,
    not_found: Option<Handler>,
    config: RuntimeConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create an empty router configured from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    /// Create an empty router with explicit runtime configuration
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            trees: Arc::new(RwLock::new(HashMap::new())),
            group: String::new(),
            middlewares: Vec::new(),
            not_found: None,
            config,
        }
    }

    /// Create a sub-router whose routes live under `prefix`.
    ///
    /// The group shares this router's route table, so routes registered through
    /// either are visible to both. Its middleware list starts empty and is not
    /// inherited from this router. Grouping a group nests the prefixes.
    ///
    /// The prefix is normalized the same way route paths are: one leading `/`
    /// is trimmed, so `group("/admin")` and `group("admin")` are equivalent.
    /// Nothing else is changed.
    #[must_use]
    pub fn group(&self, prefix: &str) -> Router {
        let prefix = prefix.strip_prefix('/').unwrap_or(prefix);
        let group = if self.group.is_empty() {
            prefix.to_string()
        } else {
            format!("{}/{}", self.group, prefix)
        };
        debug!(group = %group, "Route group created");
        Router {
            trees: Arc::clone(&self.trees),
            group,
            middlewares: Vec::new(),
            not_found: None,
            config: self.config,
        }
    }

    /// Prefix prepended to every path registered through this router
    #[must_use]
    pub fn group_prefix(&self) -> &str {
        &self.group
    }

    /// Append middleware to this router's list.
    ///
    /// Only routes registered afterwards, through this router, pick it up.
    pub fn add_middleware<M>(&mut self, mw: M) -> &mut Self
    where
        M: Middleware + 'static,
    {
        self.middlewares.push(Arc::new(mw));
        self
    }

    /// Append several already-shared middleware, keeping their order
    pub fn add_middlewares<I>(&mut self, mws: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Middleware>>,
    {
        self.middlewares.extend(mws);
        self
    }

    /// Replace the not-found handler for requests dispatched through this router
    pub fn not_found_page<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.not_found = Some(handler(f));
        self
    }

    /// Register `f` for `method` and `path`.
    ///
    /// One leading `/` is trimmed from `path`; nothing else is normalized. The
    /// route captures a snapshot of this router's middleware. Registering a path
    /// that is already bound replaces its handler.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidMethod`] for methods outside [`ALLOWED_METHODS`]
    /// - [`RouterError::RouteConflict`] when a different parameter pattern
    ///   already occupies one of the path's trie positions
    pub fn handle<F>(&self, method: Method, path: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        if !ALLOWED_METHODS.contains(&method) {
            error!(method = %method, path = %path, "Rejected route with unsupported method");
            return Err(RouterError::InvalidMethod { method });
        }

        let path = path.strip_prefix('/').unwrap_or(path);
        let pattern = if self.group.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.group, path)
        };

        let mut trees = self.trees.write();
        let trie = trees.entry(method.clone()).or_insert_with(Trie::new);
        match trie.insert(&pattern, handler(f), &self.middlewares) {
            Ok(Insertion::Created) => info!(
                method = %method,
                pattern = %pattern,
                middleware_count = self.middlewares.len(),
                "Route registered"
            ),
            Ok(Insertion::Replaced) => warn!(
                method = %method,
                pattern = %pattern,
                middleware_count = self.middlewares.len(),
                "Route re-registered, previous handler replaced"
            ),
            Err(e) => {
                error!(method = %method, pattern = %pattern, error = %e, "Route conflict");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Register a `GET` route
    pub fn get<F>(&self, path: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.handle(Method::GET, path, f)
    }

    /// Register a `POST` route
    pub fn post<F>(&self, path: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.handle(Method::POST, path, f)
    }

    /// Register a `PUT` route
    pub fn put<F>(&self, path: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.handle(Method::PUT, path, f)
    }

    /// Register a `PATCH` route
    pub fn patch<F>(&self, path: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.handle(Method::PATCH, path, f)
    }

    /// Register a `DELETE` route
    pub fn delete<F>(&self, path: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.handle(Method::DELETE, path, f)
    }

    /// Route `req` and run exactly one handler.
    ///
    /// On a match the captured parameters are published into `req` and the
    /// route's composed middleware chain runs. Otherwise this router's
    /// not-found handler runs (the built-in one writes `404` with a plain-text
    /// body).
    pub fn dispatch(&self, mut req: Request, w: &mut ResponseWriter) -> Dispatch {
        match self.resolve(&req.method, &req.path) {
            Some((chain, pattern, params)) => {
                debug!(
                    request_id = %req.request_id,
                    method = %req.method,
                    path = %req.path,
                    pattern = %pattern,
                    path_params = ?params,
                    "Route matched"
                );
                req.publish_params(params);
                chain(&req, w);
                Dispatch::Matched {
                    method: req.method,
                    pattern,
                }
            }
            None => {
                debug!(
                    request_id = %req.request_id,
                    method = %req.method,
                    path = %req.path,
                    "No route matched"
                );
                let not_found = self.not_found.as_ref().unwrap_or(&*DEFAULT_NOT_FOUND);
                not_found(&req, w);
                Dispatch::NotFound
            }
        }
    }

    /// Adapter for hosting servers that speak the `http` crate types.
    ///
    /// The request id (taken from `x-request-id` or freshly generated) is
    /// echoed on the response unless the handler already set that header.
    pub fn serve<B>(&self, req: http::Request<B>) -> http::Response<Vec<u8>>
    where
        B: Into<Vec<u8>>,
    {
        let req = Request::from(req);
        let request_id = req.request_id;
        let mut w = ResponseWriter::new();
        self.dispatch(req, &mut w);

        let mut response = w.into_response();
        if let Some(value) = request_id.header_value() {
            response
                .headers_mut()
                .entry(REQUEST_ID_HEADER)
                .or_insert(value);
        }
        response
    }

    /// Look up the composed handler for `method` and `path`.
    ///
    /// A path that reaches a trie node without a bound handler is a miss, same
    /// as a path that leaves the trie.
    fn resolve(&self, method: &Method, path: &str) -> Option<(Handler, Arc<str>, Params)> {
        let segments = split_segments(path);
        let start = Instant::now();

        let found = {
            let trees = self.trees.read();
            trees
                .get(method)
                .and_then(|trie| trie.find(&segments))
                .and_then(|(node, params)| {
                    node.route().map(|route| {
                        (
                            Arc::clone(route.chain()),
                            Arc::clone(route.pattern()),
                            params,
                        )
                    })
                })
        };

        let elapsed = start.elapsed();
        if elapsed > self.config.slow_match_threshold {
            warn!(
                method = %method,
                path = %path,
                segments = segments.len(),
                duration_us = elapsed.as_micros(),
                "Slow route matching detected"
            );
        }
        found
    }

    /// Every registered `(method, pattern)` pair, sorted
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        let trees = self.trees.read();
        let mut routes: Vec<(Method, String)> = trees
            .iter()
            .flat_map(|(method, trie)| {
                trie.patterns()
                    .into_iter()
                    .map(move |pattern| (method.clone(), pattern.to_string()))
            })
            .collect();
        routes.sort_by(|a, b| (a.0.as_str(), &a.1).cmp(&(b.0.as_str(), &b.1)));
        routes
    }

    /// Log the routing table at `info`
    pub fn dump_routes(&self) {
        let routes = self.routes();
        info!(routes_count = routes.len(), "Routing table");
        for (method, pattern) in &routes {
            info!(method = %method, pattern = %pattern, "Route");
        }
    }
}
