use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::Serialize;
use tracing::warn;

/// Body written by the built-in not-found handler
pub const NOT_FOUND_BODY: &str = "404! Not Found Page!!";

/// Response-writing capability handed to handlers.
///
/// The status line is written at most once: the first explicit
/// [`write_header`](Self::write_header) wins, and writing body bytes before
/// any status commits `200 OK`.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit the status code. Later calls are ignored and logged.
    pub fn write_header(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(existing) => warn!(
                existing = existing.as_u16(),
                attempted = status.as_u16(),
                "Superfluous write_header call ignored"
            ),
        }
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Append raw bytes to the body
    pub fn write(&mut self, bytes: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
    }

    /// Append UTF-8 text to the body
    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Serialize `value` as the JSON body with the given status
    pub fn write_json<T: Serialize>(
        &mut self,
        status: StatusCode,
        value: &T,
    ) -> serde_json::Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.write_header(status);
        self.write(&bytes);
        Ok(())
    }

    /// Write the default `404` plain-text page
    pub fn not_found(&mut self) {
        self.set_header(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.write_header(StatusCode::NOT_FOUND);
        self.write_str(NOT_FOUND_BODY);
    }

    /// Committed status, `200 OK` if nothing has been written yet
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Whether a status has been committed
    #[must_use]
    pub fn header_written(&self) -> bool {
        self.status.is_some()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, lossy on invalid UTF-8
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Convert into an `http::Response` for the hosting server
    #[must_use]
    pub fn into_response(self) -> http::Response<Vec<u8>> {
        let status = self.status();
        let mut response = http::Response::new(self.body);
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}
