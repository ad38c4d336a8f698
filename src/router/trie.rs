//! Segment trie used for per-method route matching
//!
//! Paths are split on `/` and each segment becomes one level of the tree:
//!
//! - Literal segments (`users`) live in a child map keyed by their exact text.
//!   No normalization happens: case, empty segments and trailing slashes are
//!   all significant.
//! - A segment starting with `:` (`:id`) is a parameter. A node owns at most
//!   one parameter child; registering a different parameter pattern at the
//!   same position is a [`RouterError::RouteConflict`].
//! - A node reached by a registered path carries a [`Route`]: the handler, the
//!   middleware accumulated by every registration of that path, and the
//!   pre-composed chain that dispatch actually calls.
//!
//! Lookup walks one segment at a time, preferring the literal child and falling
//! back to the parameter child. It never backtracks: once a literal child has
//! been taken, a dead end below it is a miss even if the parameter sibling
//! would have matched.
//!
//! ```text
//! GET trie after registering `users`, `users/:id`, `users/:id/posts`, `users/me`
//!
//! (root)
//!  └── users            [route]
//!       ├── me          [route]
//!       └── :id         [route]
//!            └── posts  [route]
//! ```

use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use super::params::Params;
use crate::dispatcher::Handler;
use crate::error::RouterError;
use crate::middleware::{compose, Middleware};

/// Leading character that marks a parameter segment
pub const PARAM_MARKER: char = ':';

/// Path segments for one lookup; most paths fit inline
pub(crate) type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Split a path into segments after trimming exactly one leading `/`.
///
/// An empty remainder yields no segments, which addresses the root node.
pub(crate) fn split_segments(path: &str) -> Segments<'_> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Segments::new();
    }
    pattern_segments(path)
}

/// Split an already-normalized pattern. No slash is trimmed, so `/a` yields
/// `["", "a"]`; only `""` yields no segments.
pub(crate) fn pattern_segments(pattern: &str) -> Segments<'_> {
    if pattern.is_empty() {
        return Segments::new();
    }
    pattern.split('/').collect()
}

/// Handler bound to a trie position
#[derive(Clone)]
pub(crate) struct Route {
    pattern: Arc<str>,
    middlewares: Vec<Arc<dyn Middleware>>,
    chain: Handler,
}

impl Route {
    pub(crate) fn pattern(&self) -> &Arc<str> {
        &self.pattern
    }

    /// Handler wrapped in its middleware chain
    pub(crate) fn chain(&self) -> &Handler {
        &self.chain
    }

    #[cfg(test)]
    pub(crate) fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }
}

#[derive(Clone)]
struct ParamChild {
    /// Raw pattern text, e.g. `:id`
    pattern: Arc<str>,
    /// Capture key, the pattern without its marker
    key: Arc<str>,
    node: Box<Node>,
}

/// One trie position
#[derive(Clone, Default)]
pub(crate) struct Node {
    children: HashMap<String, Node>,
    param: Option<ParamChild>,
    route: Option<Route>,
}

impl Node {
    /// Bound route, if any. A node can exist purely as an interior position.
    pub(crate) fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Parameter pattern of the parameter child, e.g. `:id`
    #[cfg(test)]
    pub(crate) fn param_segment(&self) -> Option<&str> {
        self.param.as_ref().map(|p| p.pattern.as_ref())
    }

    fn collect_patterns(&self, out: &mut Vec<Arc<str>>) {
        if let Some(route) = &self.route {
            out.push(Arc::clone(&route.pattern));
        }
        for child in self.children.values() {
            child.collect_patterns(out);
        }
        if let Some(param) = &self.param {
            param.node.collect_patterns(out);
        }
    }
}

/// Whether an insert bound a fresh position or replaced an existing handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Insertion {
    Created,
    Replaced,
}

/// Segment trie for a single HTTP method
#[derive(Clone, Default)]
pub(crate) struct Trie {
    root: Node,
}

impl Trie {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` at `path` (no leading slash; `""` is the root).
    ///
    /// `middlewares` is the registering router's chain at this moment; it is
    /// appended to whatever the node already carries. Re-registering a bound
    /// path replaces the handler (last write wins).
    ///
    /// Conflicts can only be met while walking nodes that already exist, before
    /// anything new is created, so a failed insert leaves the trie unchanged.
    pub(crate) fn insert(
        &mut self,
        path: &str,
        handler: Handler,
        middlewares: &[Arc<dyn Middleware>],
    ) -> Result<Insertion, RouterError> {
        let mut node = &mut self.root;

        for segment in pattern_segments(path) {
            node = if segment.starts_with(PARAM_MARKER) {
                if let Some(existing) = &node.param {
                    if existing.pattern.as_ref() != segment {
                        return Err(RouterError::RouteConflict {
                            path: path.to_string(),
                            existing: existing.pattern.to_string(),
                            attempted: segment.to_string(),
                        });
                    }
                }
                let param = node.param.get_or_insert_with(|| ParamChild {
                    pattern: Arc::from(segment),
                    key: Arc::from(&segment[PARAM_MARKER.len_utf8()..]),
                    node: Box::default(),
                });
                &mut *param.node
            } else {
                node.children.entry(segment.to_string()).or_default()
            };
        }

        let (insertion, mut chain_mws) = match node.route.take() {
            Some(previous) => (Insertion::Replaced, previous.middlewares),
            None => (Insertion::Created, Vec::new()),
        };
        chain_mws.extend(middlewares.iter().map(Arc::clone));
        let chain = compose(&handler, &chain_mws);
        node.route = Some(Route {
            pattern: Arc::from(path),
            middlewares: chain_mws,
            chain,
        });
        Ok(insertion)
    }

    /// Walk `segments` from the root, capturing parameters on the way.
    ///
    /// Returns the node reached and the captures (empty, never absent, when the
    /// path has no parameters). `None` means some segment matched neither a
    /// literal nor a parameter child. A returned node may still have no route.
    pub(crate) fn find(&self, segments: &[&str]) -> Option<(&Node, Params)> {
        let mut node = &self.root;
        let mut params = Params::new();

        for &segment in segments {
            node = match (node.children.get(segment), &node.param) {
                (Some(child), _) => child,
                (None, Some(param)) => {
                    params.insert(Arc::clone(&param.key), segment.to_string());
                    &*param.node
                }
                (None, None) => return None,
            };
        }

        Some((node, params))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Node {
        &self.root
    }

    /// Every bound pattern in this trie
    pub(crate) fn patterns(&self) -> Vec<Arc<str>> {
        let mut out = Vec::new();
        self.root.collect_patterns(&mut out);
        out
    }
}
