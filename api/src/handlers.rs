use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use listings_shared::{Listing, StoredRecord};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::ApiError,
    listing_service::ListingError,
    state::AppState,
    validation::RawJson,
};

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();
    let backend = state.listings.backend();

    let store_ok = state.listings.ping().await.is_ok();

    if store_ok {
        tracing::debug!(uptime_secs = uptime, "health check passed");
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime,
                "storage": backend
            })),
        )
    } else {
        tracing::warn!(uptime_secs = uptime, storage = backend, "health check degraded, listing store unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime,
                "storage": backend
            })),
        )
    }
}

/// POST /api/listing
pub async fn create_listing(
    State(state): State<AppState>,
    RawJson(payload): RawJson,
) -> Result<(StatusCode, Json<StoredRecord>), ListingError> {
    let record = state.listings.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/listing
pub async fn list_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Listing>>, ListingError> {
    let listings = state.listings.list().await?;
    tracing::debug!(count = listings.len(), "listings fetched");
    Ok(Json(listings))
}

/// DELETE /api/listing/:id
pub async fn delete_listing(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let listing_id = match Uuid::parse_str(&id) {
        Ok(listing_id) => listing_id,
        Err(_) => {
            return ApiError::bad_request(
                "InvalidListingId",
                format!("Invalid listing ID format: {}", id),
            )
            .into_response()
        }
    };

    match state.listings.delete(listing_id).await {
        Ok(record) => Json(record).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"})))
}
