use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::server::Request;

/// Maximum number of path parameters stored inline before spilling to the heap.
/// Only one parameter is captured per segment, so this covers paths up to
/// eight parameterised segments deep.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Inline `(name, value)` storage for captured parameters.
///
/// Names are `Arc<str>` shared with the trie node that declared them; values
/// are per-request copies of the matched segment.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Parameters captured during one lookup, keyed by name without the `:` marker.
///
/// Built fresh for every dispatch and never shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a capture. A repeated name keeps only the newest value.
    pub fn insert(&mut self, key: Arc<str>, value: String) {
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.inner.push((key, value)),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate captures in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Owned map copy. Allocates; prefer [`Params::get`] on hot paths.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// All parameters published for `req`, or `None` if no dispatch published any.
#[must_use]
pub fn get_all_params(req: &Request) -> Option<HashMap<String, String>> {
    req.params().map(Params::to_map)
}

/// One parameter by name, `""` when absent or when nothing was published.
#[must_use]
pub fn get_param<'a>(req: &'a Request, key: &str) -> &'a str {
    req.param(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_insert_and_get() {
        let mut params = Params::new();
        params.insert(Arc::from("id"), "42".to_string());
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("name"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_repeated_name_keeps_newest() {
        let mut params = Params::new();
        params.insert(Arc::from("id"), "org".to_string());
        params.insert(Arc::from("id"), "user".to_string());
        assert_eq!(params.get("id"), Some("user"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_to_map() {
        let mut params = Params::new();
        params.insert(Arc::from("a"), "1".to_string());
        params.insert(Arc::from("b"), "2".to_string());
        let map = params.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "2");
    }

    #[test]
    fn test_accessors_without_published_params() {
        let req = Request::new(Method::GET, "/anything");
        assert!(get_all_params(&req).is_none());
        assert_eq!(get_param(&req, "id"), "");
    }

    #[test]
    fn test_accessors_with_published_params() {
        let mut req = Request::new(Method::GET, "/user/42");
        let mut params = Params::new();
        params.insert(Arc::from("id"), "42".to_string());
        req.publish_params(params);

        assert_eq!(get_param(&req, "id"), "42");
        assert_eq!(get_param(&req, "missing"), "");
        let all = get_all_params(&req).unwrap();
        assert_eq!(all.get("id").map(String::as_str), Some("42"));
    }
}
