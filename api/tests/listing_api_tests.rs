// tests/listing_api_tests.rs
//
// End-to-end tests for the listing routes. The full router is driven with
// `tower::ServiceExt::oneshot` against the in-memory repository, so no
// database is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use listings_api::config::Config;
use listings_api::metrics;
use listings_api::repository::InMemoryListingRepository;
use listings_api::routes;
use listings_api::state::AppState;

fn test_app() -> (Router, Arc<InMemoryListingRepository>) {
    let repo = Arc::new(InMemoryListingRepository::new());
    let registry = metrics::new_registry("it").unwrap();
    let config = Config::from_lookup(|_| None).unwrap();
    let app = routes::app(AppState::new(repo.clone(), registry), &config);
    (app, repo)
}

fn loft() -> Value {
    json!({
        "title": "  Loft  ",
        "description": "Bright corner unit",
        "rent": "1500",
        "rooms": 2,
        "address": "1 Main St",
        "contact": "+1 (617) 555-0101"
    })
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_normalizes_and_returns_201() {
    let (app, repo) = test_app();

    let (status, body) = send(&app, json_request(Method::POST, "/api/listing", &loft())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Loft");
    assert_eq!(body["rent"], json!(1500));
    assert_eq!(body["rooms"], json!(2));
    assert_eq!(body["contact"], "6175550101");
    assert!(body["created_at"].is_string());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let (app, repo) = test_app();
    let payload = json!({
        "title": "",
        "description": "Bright",
        "rent": "abc",
        "rooms": 0,
        "address": "1 Main St",
        "contact": "12345"
    });

    let (status, body) = send(&app, json_request(Method::POST, "/api/listing", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "rent", "rooms", "contact"]);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let (app, repo) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/listing")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "body");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_storage_failure_is_500() {
    let (app, repo) = test_app();
    repo.set_unavailable(true);

    let (status, body) = send(&app, json_request(Method::POST, "/api/listing", &loft())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to create listing");
}

#[tokio::test]
async fn test_create_with_unstorable_rent_leaves_list_readable() {
    let (app, repo) = test_app();
    let (status, _) = send(&app, json_request(Method::POST, "/api/listing", &loft())).await;
    assert_eq!(status, StatusCode::CREATED);

    for rent in [json!("1500.50"), json!(1e20)] {
        let mut payload = loft();
        payload["rent"] = rent;

        let (status, body) = send(&app, json_request(Method::POST, "/api/listing", &payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to create listing");
    }

    let (status, body) = send(&app, empty_request(Method::GET, "/api/listing")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(repo.len().await, 1);
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_empty_store() {
    let (app, _) = test_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/listing")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_returns_created_listings_in_order() {
    let (app, _) = test_app();
    for title in ["first", "second"] {
        let mut payload = loft();
        payload["title"] = json!(title);
        let (status, _) = send(&app, json_request(Method::POST, "/api/listing", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, empty_request(Method::GET, "/api/listing")).await;

    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0]["title"], "first");
    assert_eq!(listings[1]["title"], "second");
    assert_eq!(listings[0]["rent"], json!(1500));
}

#[tokio::test]
async fn test_list_with_corrupt_record_is_500() {
    let (app, repo) = test_app();
    repo.insert_raw(json!({
        "id": uuid::Uuid::new_v4(),
        "title": "Drifted",
        "description": "Contact lost its digits",
        "rent": 900,
        "rooms": 1,
        "address": "3 Main St",
        "contact": "n/a",
        "created_at": "2026-01-01T00:00:00Z"
    }))
    .await;

    let (status, body) = send(&app, empty_request(Method::GET, "/api/listing")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error: invalid data format");
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_returns_removed_record() {
    let (app, repo) = test_app();
    let (_, created) = send(&app, json_request(Method::POST, "/api/listing", &loft())).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        empty_request(Method::DELETE, &format!("/api/listing/{}", id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let (app, _) = test_app();
    let (_, created) = send(&app, json_request(Method::POST, "/api/listing", &loft())).await;
    let uri = format!("/api/listing/{}", created["id"].as_str().unwrap());

    let (first, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
    let (second, body) = send(&app, empty_request(Method::DELETE, &uri)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ListingNotFound");
}

#[tokio::test]
async fn test_delete_malformed_id_is_400() {
    let (app, _) = test_app();

    let (status, body) = send(&app, empty_request(Method::DELETE, "/api/listing/42")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidListingId");
}

// ─── Ambient routes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_storage_backend() {
    let (app, _) = test_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = test_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/listings")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_prefixed_metrics() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/metrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("it_listings_created_total"));
}
