//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all folio metrics
pub const METRICS_PREFIX: &str = "folio";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000,
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Archive metrics
    describe_counter!(
        format!("{}_documents_submitted_total", METRICS_PREFIX),
        Unit::Count,
        "Total documents submitted to the archive"
    );

    describe_counter!(
        format!("{}_deposits_taken_total", METRICS_PREFIX),
        Unit::Count,
        "Total deposits taken"
    );

    // Printing metrics
    describe_counter!(
        format!("{}_print_jobs_total", METRICS_PREFIX),
        Unit::Count,
        "Total print jobs submitted"
    );

    describe_counter!(
        format!("{}_pages_printed_total", METRICS_PREFIX),
        Unit::Count,
        "Total pages submitted for printing"
    );

    describe_counter!(
        format!("{}_erroneous_copies_total", METRICS_PREFIX),
        Unit::Count,
        "Total misprinted pages reported for accounting"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a submitted document
pub fn record_document_submitted(department: &str) {
    counter!(
        format!("{}_documents_submitted_total", METRICS_PREFIX),
        "department" => department.to_string()
    )
    .increment(1);
}

/// Record a taken deposit
pub fn record_deposit_taken() {
    counter!(format!("{}_deposits_taken_total", METRICS_PREFIX)).increment(1);
}

/// Record a submitted print job
pub fn record_print_job(printer: &str, pages: u64) {
    counter!(
        format!("{}_print_jobs_total", METRICS_PREFIX),
        "printer" => printer.to_string()
    )
    .increment(1);

    counter!(
        format!("{}_pages_printed_total", METRICS_PREFIX),
        "printer" => printer.to_string()
    )
    .increment(pages);
}

/// Record misprinted pages for accounting
pub fn record_erroneous_copies(pages: u64) {
    counter!(format!("{}_erroneous_copies_total", METRICS_PREFIX)).increment(pages);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_are_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/data/lectures");
        metrics.finish(200);
        // Just verify it runs without panic
    }
}
