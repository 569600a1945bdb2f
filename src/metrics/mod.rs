//! Request metrics for the API client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics collector.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total requests sent
    pub requests_total: AtomicU64,
    /// Requests answered with `Success: true`
    pub requests_success: AtomicU64,
    /// Requests that failed in transport or with an HTTP error status
    pub requests_failed: AtomicU64,
    /// Requests answered with `Success: false`
    pub remote_errors: AtomicU64,
    /// Cumulative request latency in milliseconds
    pub latency_ms_total: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Increment requests total.
    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment successful requests.
    pub fn inc_success(&self) {
        self.requests_success.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment failed requests.
    pub fn inc_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment remote errors.
    pub fn inc_remote_errors(&self) {
        self.remote_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Add a request latency sample.
    pub fn observe_latency(&self, ms: u64) {
        self.latency_ms_total.fetch_add(ms, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            remote_errors: self.remote_errors.load(Ordering::Relaxed),
            latency_ms_total: self.latency_ms_total.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"# HELP arubacloud_requests_total Total number of API requests
# TYPE arubacloud_requests_total counter
arubacloud_requests_total {}

# HELP arubacloud_requests_success Successful API requests
# TYPE arubacloud_requests_success counter
arubacloud_requests_success {}

# HELP arubacloud_requests_failed Transport or HTTP failures
# TYPE arubacloud_requests_failed counter
arubacloud_requests_failed {}

# HELP arubacloud_remote_errors Requests rejected by the API
# TYPE arubacloud_remote_errors counter
arubacloud_remote_errors {}

# HELP arubacloud_request_latency_ms_total Cumulative request latency
# TYPE arubacloud_request_latency_ms_total counter
arubacloud_request_latency_ms_total {}
"#,
            s.requests_total,
            s.requests_success,
            s.requests_failed,
            s.remote_errors,
            s.latency_ms_total
        )
    }
}

/// Metrics snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_success: u64,
    pub requests_failed: u64,
    pub remote_errors: u64,
    pub latency_ms_total: u64,
}

/// Timer for measuring durations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
