use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::metrics;

/// Holds one slot of the in-flight gauge until dropped, including when the
/// request future is cancelled mid-flight.
struct InFlightGuard;

impl InFlightGuard {
    fn enter() -> Self {
        metrics::HTTP_IN_FLIGHT.inc();
        InFlightGuard
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        metrics::HTTP_IN_FLIGHT.dec();
    }
}

/// Log every request and record the HTTP metrics.
///
/// The metrics path label is the matched route template (`/api/listing/:id`),
/// never the raw URI, so label cardinality stays bounded.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = std::time::Instant::now();

    let in_flight = InFlightGuard::enter();
    let response = next.run(req).await;
    drop(in_flight);

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    metrics::observe_http(method.as_str(), &path, status, elapsed.as_secs_f64());
    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}
