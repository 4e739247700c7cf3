use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Registry,
    TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()), $labels)
                .unwrap()
        })
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
macro_rules! gauge {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntGauge::new($name, $help).unwrap())
    };
}

const LATENCY_BUCKETS: [f64; 14] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);
pub static HTTP_IN_FLIGHT: Lazy<IntGauge> = gauge!("http_requests_in_flight", "In-flight HTTP requests");

// ── Listings ────────────────────────────────────────────────────────────────
pub static LISTINGS_CREATED: Lazy<IntCounter> = counter!("listings_created_total", "Listings created");
pub static LISTINGS_DELETED: Lazy<IntCounter> = counter!("listings_deleted_total", "Listings deleted");
pub static LISTINGS_RETURNED: Lazy<IntCounter> =
    counter!("listings_returned_total", "Listings returned by list calls");

// ── Validation ──────────────────────────────────────────────────────────────
pub static VALIDATION_FAILURES: Lazy<IntCounterVec> =
    counter_vec!("validation_failures_total", "Rejected input fields", &["field"]);
pub static INTEGRITY_FAILURES: Lazy<IntCounter> =
    counter!("integrity_failures_total", "List calls failed by the output schema");

// ── Storage ─────────────────────────────────────────────────────────────────
pub static STORAGE_ERRORS: Lazy<IntCounterVec> =
    counter_vec!("storage_errors_total", "Failed repository calls", &["operation"]);
pub static DB_QUERY_DURATION: Lazy<HistogramVec> =
    histogram_vec!("db_query_duration_seconds", "Database query latency", &["query"]);

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(HTTP_IN_FLIGHT.clone()))?;
    r.register(Box::new(LISTINGS_CREATED.clone()))?;
    r.register(Box::new(LISTINGS_DELETED.clone()))?;
    r.register(Box::new(LISTINGS_RETURNED.clone()))?;
    r.register(Box::new(VALIDATION_FAILURES.clone()))?;
    r.register(Box::new(INTEGRITY_FAILURES.clone()))?;
    r.register(Box::new(STORAGE_ERRORS.clone()))?;
    r.register(Box::new(DB_QUERY_DURATION.clone()))?;
    Ok(())
}

/// A fresh registry with every listing metric registered under `prefix`
pub fn new_registry(prefix: &str) -> prometheus::Result<Registry> {
    let registry = Registry::new_custom(Some(prefix.to_string()), None)?;
    register_all(&registry)?;
    Ok(registry)
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn observe_db_query(query: &str, duration_secs: f64) {
    DB_QUERY_DURATION
        .with_label_values(&[query])
        .observe(duration_secs);
}

pub fn record_validation_failure(field: &str) {
    VALIDATION_FAILURES.with_label_values(&[field]).inc();
}

pub fn record_storage_error(operation: &str) {
    STORAGE_ERRORS.with_label_values(&[operation]).inc();
}
