use http::header::HeaderMap;
use http::Method;
use tracing::debug;

use crate::ids::RequestId;
use crate::router::Params;

/// Header carrying an upstream request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Inbound request as seen by handlers and middleware.
///
/// Transport adapters build one per request (see the `From<http::Request<B>>`
/// impl). The router publishes captured path parameters into it right before
/// the matched handler runs; until then [`Request::params`] is `None`.
#[derive(Debug, Clone)]
pub struct Request {
    /// Correlation id, taken from `x-request-id` when valid
    pub request_id: RequestId,
    /// HTTP method
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Raw query string (after `?`), if any
    pub query: Option<String>,
    /// Request headers
    pub headers: HeaderMap,
    /// Raw request body
    pub body: Vec<u8>,
    params: Option<Params>,
}

impl Request {
    /// Build a request from a method and a path, which may carry a `?query`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut path = path.into();
        let query = path.find('?').map(|pos| {
            let query = path[pos + 1..].to_string();
            path.truncate(pos);
            query
        });
        Self {
            request_id: RequestId::new(),
            method,
            path,
            query,
            headers: HeaderMap::new(),
            body: Vec::new(),
            params: None,
        }
    }

    /// Replace the body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value by name (case-insensitive). Non-UTF-8 values read as `None`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Path parameters published by the router for this request.
    ///
    /// `None` when the request has not been through a successful dispatch.
    #[inline]
    #[must_use]
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// A single path parameter, or `""` when absent.
    #[inline]
    #[must_use]
    pub fn param(&self, key: &str) -> &str {
        self.params.as_ref().and_then(|p| p.get(key)).unwrap_or("")
    }

    pub(crate) fn publish_params(&mut self, params: Params) {
        self.params = Some(params);
    }
}

impl<B> From<http::Request<B>> for Request
where
    B: Into<Vec<u8>>,
{
    fn from(req: http::Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        let request_id = RequestId::from_headers(&parts.headers);
        let request = Self {
            request_id,
            method: parts.method,
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers,
            body: body.into(),
            params: None,
        };
        debug!(
            request_id = %request.request_id,
            method = %request.method,
            path = %request.path,
            "Request converted from http::Request"
        );
        request
    }
}
