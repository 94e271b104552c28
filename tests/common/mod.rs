// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use mapty_tracker::config::Config;
use mapty_tracker::db::LocalStorage;
use mapty_tracker::routes::create_router;
use mapty_tracker::services::WorkoutTracker;
use mapty_tracker::AppState;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Create a test app backed by in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_storage(LocalStorage::in_memory())
}

/// Create a test app on top of the given storage.
#[allow(dead_code)]
pub fn create_test_app_with_storage(storage: LocalStorage) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let tracker = WorkoutTracker::open(storage, config.storage_key.clone());

    let state = Arc::new(AppState {
        config,
        tracker: Mutex::new(tracker),
    });

    (create_router(state.clone()), state)
}

/// Build a request with a JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A valid running submission.
#[allow(dead_code)]
pub fn running_form() -> serde_json::Value {
    serde_json::json!({
        "kind": "running",
        "coords": [45.0, 7.6],
        "distance_km": 5.0,
        "duration_min": 30.0,
        "cadence_spm": 150.0
    })
}

/// A valid cycling submission.
#[allow(dead_code)]
pub fn cycling_form() -> serde_json::Value {
    serde_json::json!({
        "kind": "cycling",
        "coords": [45.1, 7.7],
        "distance_km": 20.0,
        "duration_min": 60.0,
        "elevation_gain_m": 400.0
    })
}
