use std::sync::Arc;
use std::time::Instant;

use tracing::{field, info_span};

use super::Middleware;
use crate::dispatcher::Handler;
use crate::server::{Request, ResponseWriter};

/// Opens a `request` span around the rest of the chain.
///
/// The span carries `method`, `path` and `request_id` up front, and records
/// `status` and `latency_ms` once the inner handler returns. Events emitted by
/// inner middleware and the handler are nested under it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |req: &Request, w: &mut ResponseWriter| {
            let span = info_span!(
                "request",
                method = %req.method,
                path = %req.path,
                request_id = %req.request_id,
                status = field::Empty,
                latency_ms = field::Empty,
            );
            let _entered = span.enter();
            let start = Instant::now();

            next(req, w);

            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            span.record("status", w.status().as_u16());
            span.record("latency_ms", latency_ms);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::handler;
    use http::{Method, StatusCode};

    #[test]
    fn test_tracing_is_transparent() {
        let inner = handler(|req, w| {
            w.write_header(StatusCode::CREATED);
            w.write_str(req.param("missing"));
            w.write_str("made");
        });
        let wrapped = TracingMiddleware.wrap(inner);

        let mut w = ResponseWriter::new();
        wrapped(&Request::new(Method::POST, "/things"), &mut w);
        assert_eq!(w.status(), StatusCode::CREATED);
        assert_eq!(w.body_text(), "made");
    }
}
