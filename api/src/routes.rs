use axum::{
    http::{header, Method},
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config, handlers, logging_middleware, metrics_handler, state::AppState,
};

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler::metrics_endpoint))
}

pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/listing",
            get(handlers::list_listings).post(handlers::create_listing),
        )
        .route("/api/listing/:id", delete(handlers::delete_listing))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

/// Assemble the full application router
pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origins.clone())
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(listing_routes())
        .merge(health_routes())
        .merge(observability_routes())
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(logging_middleware::request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
