// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use mapty_tracker::error::AppError;
use mapty_tracker::models::WorkoutId;
use mapty_tracker::services::{StoreError, TrackerError};

#[test]
fn test_tracker_not_found_maps_to_404() {
    let err: AppError = TrackerError::Store(StoreError::NotFound(WorkoutId::from("x"))).into();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_kind_mismatch_maps_to_conflict() {
    let err: AppError = TrackerError::Store(StoreError::KindMismatch {
        id: WorkoutId::from("x"),
        existing: "running",
        requested: "cycling",
    })
    .into();
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}

#[test]
fn test_internal_errors_hide_details() {
    let err = AppError::Internal(anyhow::anyhow!("secret path /var/lib"));
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let err = AppError::Storage("disk full".to_string());
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
