//! Request correlation ids.
//!
//! Every [`crate::server::Request`] carries a [`RequestId`]. Adapters reuse an
//! upstream `x-request-id` when it holds a ULID and mint a fresh one otherwise;
//! `Router::serve` echoes the id back on the response so callers can match
//! their logs against the router's dispatch events and `request` spans.

use http::{HeaderMap, HeaderValue};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use ulid::Ulid;

use crate::server::REQUEST_ID_HEADER;

/// ULID-backed request id; sorts by creation time
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    /// Mint a fresh id
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Take the id from `x-request-id`, or mint one when the header is missing
    /// or not a ULID.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(raw) = headers.get(REQUEST_ID_HEADER) else {
            return Self::new();
        };
        match raw.to_str().ok().and_then(|s| s.parse().ok()) {
            Some(id) => id,
            None => {
                let id = Self::new();
                debug!(inbound = ?raw, request_id = %id, "Ignoring malformed inbound request id");
                id
            }
        }
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }

    /// The id as an `x-request-id` header value
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0.to_string()).ok()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim()).map(Self)
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_inbound_ulid_is_reused() {
        let id = RequestId::new();
        assert_eq!(RequestId::from_headers(&headers_with(&id.to_string())), id);
    }

    #[test]
    fn test_malformed_or_missing_header_mints_fresh_id() {
        let id = RequestId::from_headers(&headers_with("not-a-ulid"));
        assert_eq!(id.to_string().len(), 26);
        let id = RequestId::from_headers(&HeaderMap::new());
        assert_eq!(id.to_string().len(), 26);
    }

    #[test]
    fn test_header_value_matches_display() {
        let id = RequestId::new();
        assert_eq!(id.header_value().unwrap(), id.to_string().as_str());
    }

    #[test]
    fn test_ids_sort_by_mint_time() {
        let first = RequestId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = RequestId::new();
        assert!(first < second);
        assert!(first.timestamp_ms() <= second.timestamp_ms());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = RequestId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
