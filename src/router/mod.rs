//! # Router Module
//!
//! Path matching, route registration and request dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Keeping one segment trie per HTTP method
//! - Registering handlers (with a snapshot of middleware) at trie positions
//! - Matching incoming requests and capturing `:name` parameters
//! - Running exactly one handler per request: the matched one, or not-found
//!
//! ## Path Patterns
//!
//! | Pattern | Request path | Params |
//! |---------|--------------|--------|
//! | `users` | `/users` | - |
//! | `users/:id` | `/users/42` | `id = "42"` |
//! | `users/:id/posts` | `/users/42/posts` | `id = "42"` |
//! | `""` (root) | `/` | - |
//!
//! One leading slash is trimmed from both patterns and request paths. Case,
//! repeated slashes and trailing slashes are significant. A node has at most
//! one parameter child; `users/:id` and `users/:name` cannot coexist.
//!
//! ## Groups
//!
//! ```rust
//! use sprig::{Request, ResponseWriter, Router};
//!
//! let router = Router::new();
//! let admin = router.group("admin");
//! admin.get("stats", |_req: &Request, w: &mut ResponseWriter| w.write_str("ok")).unwrap();
//!
//! // Shared route table: the parent sees the group's route.
//! assert!(router.routes().iter().any(|(_, p)| p == "admin/stats"));
//! ```

mod core;
mod params;
mod trie;

pub use core::{Router, ALLOWED_METHODS};
pub use params::{get_all_params, get_param, ParamVec, Params, MAX_INLINE_PARAMS};
pub use trie::PARAM_MARKER;
