// Private module declaration
mod endpoint;

use std::time::Instant;

use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

// Re-export for public API
pub use endpoint::metrics_handler;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides:
// - Process metrics (memory, CPU, fds, start time) and uptime
// - HTTP request counts and latency per route
// - Order creation, validation failures and store errors
//
// The registry is owned by `Metrics`, which `main` constructs once and shares
// with the HTTP layer. Everything is scraped via GET /metrics.
// ============================================================================

pub struct Metrics {
    registry: Registry,
    started_at: Instant,

    // Process Metrics
    pub process_uptime: Gauge,

    // HTTP Metrics
    pub http_requests_total: IntCounterVec,
    pub http_request_duration: HistogramVec,

    // Order Metrics
    pub orders_created: IntCounter,
    pub order_validation_failures: IntCounterVec,
    pub order_store_errors: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        let process_uptime = Gauge::new(
            "process_uptime_seconds",
            "Seconds since the service process started",
        )?;
        registry.register(Box::new(process_uptime.clone()))?;

        // HTTP Metrics
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests handled"),
            &["method", "route", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["method", "route"],
        )?;
        registry.register(Box::new(http_request_duration.clone()))?;

        // Order Metrics
        let orders_created = IntCounter::new("orders_created_total", "Total orders persisted")?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_validation_failures = IntCounterVec::new(
            Opts::new(
                "order_validation_failures_total",
                "Order submissions rejected by validation",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(order_validation_failures.clone()))?;

        let order_store_errors = IntCounterVec::new(
            Opts::new("order_store_errors_total", "Failed order store operations"),
            &["operation"],
        )?;
        registry.register(Box::new(order_store_errors.clone()))?;

        Ok(Self {
            registry,
            started_at: Instant::now(),
            process_uptime,
            http_requests_total,
            http_request_duration,
            orders_created,
            order_validation_failures,
            order_store_errors,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a finished HTTP request
    pub fn record_http_request(&self, method: &str, route: &str, status: u16, duration_secs: f64) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, route, status.as_str()])
            .inc();
        self.http_request_duration
            .with_label_values(&[method, route])
            .observe(duration_secs);
    }

    pub fn record_order_created(&self) {
        self.orders_created.inc();
    }

    pub fn record_validation_failure(&self, reason: &str) {
        self.order_validation_failures.with_label_values(&[reason]).inc();
    }

    pub fn record_store_error(&self, operation: &str) {
        self.order_store_errors.with_label_values(&[operation]).inc();
    }

    /// Refresh uptime and encode every registered metric in the text format.
    pub fn encode(&self) -> Result<Vec<u8>, prometheus::Error> {
        self.process_uptime
            .set(self.started_at.elapsed().as_secs_f64());

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(metrics: &Metrics) -> String {
        String::from_utf8(metrics.encode().unwrap()).unwrap()
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_independent_registries() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_order_created();

        assert_eq!(a.orders_created.get(), 1);
        assert_eq!(b.orders_created.get(), 0);
    }

    #[test]
    fn test_record_http_request() {
        let metrics = Metrics::new().unwrap();
        metrics.record_http_request("GET", "/api/orders", 200, 0.002);
        metrics.record_http_request("GET", "/api/orders", 200, 0.004);
        metrics.record_http_request("POST", "/api/orders", 400, 0.001);

        assert_eq!(
            metrics
                .http_requests_total
                .with_label_values(&["GET", "/api/orders", "200"])
                .get(),
            2
        );
        assert_eq!(
            metrics
                .http_requests_total
                .with_label_values(&["POST", "/api/orders", "400"])
                .get(),
            1
        );
    }

    #[test]
    fn test_order_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_created();
        metrics.record_validation_failure("missing_fields");
        metrics.record_store_error("list");

        let text = encoded(&metrics);
        assert!(text.contains("orders_created_total 1"));
        assert!(text.contains("order_validation_failures_total{reason=\"missing_fields\"} 1"));
        assert!(text.contains("order_store_errors_total{operation=\"list\"} 1"));
    }

    #[test]
    fn test_encode_includes_uptime() {
        let metrics = Metrics::new().unwrap();
        let text = encoded(&metrics);

        assert!(text.contains("# TYPE process_uptime_seconds gauge"));
        assert!(metrics.process_uptime.get() >= 0.0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_process_metrics_on_linux() {
        let metrics = Metrics::new().unwrap();
        let text = encoded(&metrics);
        assert!(text.contains("process_resident_memory_bytes"));
    }
}
