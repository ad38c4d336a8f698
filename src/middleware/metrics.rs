use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::Middleware;
use crate::dispatcher::Handler;
use crate::server::{Request, ResponseWriter};

/// Point-in-time copy of the counters, ready to serve as JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub request_count: usize,
    pub average_latency_us: u64,
    pub success: usize,
    pub client_errors: usize,
    pub server_errors: usize,
}

#[derive(Debug, Default)]
struct Counters {
    request_count: AtomicUsize,
    total_latency_ns: AtomicU64,
    success: AtomicUsize,
    client_errors: AtomicUsize,
    server_errors: AtomicUsize,
}

/// Request counters for the routes it wraps
///
/// Counts requests, accumulates latency and buckets final status codes by
/// class. Clones share the same counters, so keep one clone for reading and
/// hand the other to `Router::add_middleware`.
///
/// Requests answered by the not-found handler never pass through route
/// middleware and are not counted.
#[derive(Debug, Default, Clone)]
pub struct MetricsMiddleware {
    counters: Arc<Counters>,
}

impl MetricsMiddleware {
    /// Create a new metrics middleware with all counters initialized to zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of requests processed
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.counters.request_count.load(Ordering::Relaxed)
    }

    /// Mean handling time, zero before the first request
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count() as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.counters.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    /// Requests that finished with a 1xx, 2xx or 3xx status
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.counters.success.load(Ordering::Relaxed)
    }

    /// Requests that finished with a 4xx status
    #[must_use]
    pub fn client_error_count(&self) -> usize {
        self.counters.client_errors.load(Ordering::Relaxed)
    }

    /// Requests that finished with a 5xx status
    #[must_use]
    pub fn server_error_count(&self) -> usize {
        self.counters.server_errors.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            request_count: self.request_count(),
            average_latency_us: u64::try_from(self.average_latency().as_micros())
                .unwrap_or(u64::MAX),
            success: self.success_count(),
            client_errors: self.client_error_count(),
            server_errors: self.server_error_count(),
        }
    }
}

impl Counters {
    fn record(&self, w: &ResponseWriter, latency: Duration) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.total_latency_ns.fetch_add(nanos, Ordering::Relaxed);

        let status = w.status();
        let bucket = if status.is_server_error() {
            &self.server_errors
        } else if status.is_client_error() {
            &self.client_errors
        } else {
            &self.success
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }
}

impl Middleware for MetricsMiddleware {
    fn wrap(&self, next: Handler) -> Handler {
        let counters = Arc::clone(&self.counters);
        Arc::new(move |req: &Request, w: &mut ResponseWriter| {
            let start = Instant::now();
            next(req, w);
            counters.record(w, start.elapsed());
        })
    }
}
