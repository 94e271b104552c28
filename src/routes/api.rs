// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes.
//!
//! Request bodies are validated here before anything reaches the tracker.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, Workout, WorkoutBounds, WorkoutId, WorkoutKind};
use crate::services::{SubmitOutcome, WorkoutInput, WorkoutTracker};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Workout API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts)
                .post(create_workout)
                .delete(delete_all_workouts),
        )
        .route("/api/workouts/bounds", get(get_bounds))
        .route(
            "/api/workouts/{id}",
            put(edit_workout).delete(delete_workout),
        )
        .route("/api/workouts/{id}/select", post(select_workout))
}

// ─── Responses ───────────────────────────────────────────────

/// A workout as shown in the list and on the map.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSummary {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "\"running\" | \"cycling\""))]
    pub kind: WorkoutKind,
    pub label: String,
    pub created_at: String,
    pub interaction_count: u32,
    pub coords: [f64; 2],
    pub distance_km: f64,
    pub duration_min: f64,
    pub cadence_spm: Option<f64>,
    pub pace_min_per_km: Option<f64>,
    pub elevation_gain_m: Option<f64>,
    pub speed_kmh: Option<f64>,
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        let mut summary = Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            label: workout.label().to_string(),
            created_at: format_utc_rfc3339(workout.created_at()),
            interaction_count: workout.interaction_count(),
            coords: workout.coordinates().into(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            cadence_spm: None,
            pace_min_per_km: None,
            elevation_gain_m: None,
            speed_kmh: None,
        };

        match workout {
            Workout::Running(r) => {
                summary.cadence_spm = Some(r.cadence_spm());
                summary.pace_min_per_km = Some(r.pace_min_per_km());
            }
            Workout::Cycling(c) => {
                summary.elevation_gain_m = Some(c.elevation_gain_m());
                summary.speed_kmh = Some(c.speed_kmh());
            }
        }

        summary
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    pub workouts: Vec<WorkoutSummary>,
    pub total: u32,
}

/// Result of adding or editing a workout.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitResponse {
    /// Position of the workout in the list
    pub index: u32,
    /// True when an existing workout was replaced
    pub replaced: bool,
    pub workout: WorkoutSummary,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SelectResponse {
    pub id: String,
    pub interaction_count: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    pub deleted: u32,
}

// ─── Requests ────────────────────────────────────────────────

/// Workout form submission.
#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutForm {
    #[cfg_attr(feature = "binding-generation", ts(type = "\"running\" | \"cycling\""))]
    pub kind: WorkoutKind,
    /// `[lat, lng]` of the map click. Optional on edit.
    #[validate(nested)]
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number] | null"))]
    pub coords: Option<Coordinates>,
    #[validate(range(exclusive_min = 0.0))]
    pub distance_km: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub duration_min: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub cadence_spm: Option<f64>,
    pub elevation_gain_m: Option<f64>,
}

impl WorkoutForm {
    /// Validate and convert to tracker input, falling back to `default_coords`.
    fn into_input(self, default_coords: Option<Coordinates>) -> Result<WorkoutInput> {
        self.validate()?;

        let coordinates = self
            .coords
            .or(default_coords)
            .ok_or_else(|| AppError::BadRequest("'coords' is required".to_string()))?;

        let metric = match self.kind {
            WorkoutKind::Running => self.cadence_spm.ok_or_else(|| {
                AppError::BadRequest("'cadence_spm' is required for running".to_string())
            })?,
            WorkoutKind::Cycling => self.elevation_gain_m.ok_or_else(|| {
                AppError::BadRequest("'elevation_gain_m' is required for cycling".to_string())
            })?,
        };

        Ok(WorkoutInput {
            kind: self.kind,
            coordinates,
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            metric,
        })
    }
}

// ─── Handlers ────────────────────────────────────────────────

fn submit_response(workouts: &[Workout], outcome: SubmitOutcome) -> Result<SubmitResponse> {
    let index = outcome.index();
    let workout = workouts.get(index).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Workout index {} out of range", index))
    })?;

    Ok(SubmitResponse {
        index: index as u32,
        replaced: matches!(outcome, SubmitOutcome::Replaced { .. }),
        workout: WorkoutSummary::from(workout),
    })
}

/// List all workouts in creation order.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<WorkoutsResponse> {
    let tracker = state.tracker.lock().await;
    let workouts: Vec<WorkoutSummary> = tracker
        .workouts()
        .iter()
        .map(WorkoutSummary::from)
        .collect();

    Json(WorkoutsResponse {
        total: workouts.len() as u32,
        workouts,
    })
}

/// Run a tracker operation on the blocking pool, since it may write the
/// storage file.
async fn with_tracker<T, F>(state: &Arc<AppState>, op: F) -> Result<T>
where
    F: FnOnce(&mut WorkoutTracker) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let mut tracker = state.tracker.blocking_lock();
        op(&mut *tracker)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Tracker task failed: {}", e)))?
}

/// Record a new workout.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WorkoutForm>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let input = form.into_input(None)?;

    let response = with_tracker(&state, move |tracker| {
        let outcome = tracker.submit(input, None)?;
        submit_response(tracker.workouts(), outcome)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Replace an existing workout with edited values.
///
/// The workout keeps its id, creation time, interaction count and, unless
/// new `coords` are given, its position.
async fn edit_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<WorkoutForm>,
) -> Result<Json<SubmitResponse>> {
    let id = WorkoutId::from(id);

    let response = with_tracker(&state, move |tracker| {
        let existing_coords = tracker
            .find(&id)
            .map(Workout::coordinates)
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;

        let input = form.into_input(Some(existing_coords))?;
        let outcome = tracker.submit(input, Some(&id))?;
        submit_response(tracker.workouts(), outcome)
    })
    .await?;

    Ok(Json(response))
}

/// Record that the user selected a workout in the list.
async fn select_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SelectResponse>> {
    let id = WorkoutId::from(id);
    let selected = id.clone();
    let interaction_count =
        with_tracker(&state, move |tracker| Ok(tracker.select(&selected)?)).await?;

    tracing::debug!(id = %id, interaction_count, "Workout selected");

    Ok(Json(SelectResponse {
        id: id.to_string(),
        interaction_count,
    }))
}

/// Delete one workout.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = WorkoutId::from(id);
    with_tracker(&state, move |tracker| Ok(tracker.delete(&id)?)).await?;
    Ok(Json(DeleteResponse { deleted: 1 }))
}

/// Delete every workout.
async fn delete_all_workouts(State(state): State<Arc<AppState>>) -> Result<Json<DeleteResponse>> {
    let deleted = with_tracker(&state, |tracker| Ok(tracker.delete_all()?)).await?;
    Ok(Json(DeleteResponse {
        deleted: deleted as u32,
    }))
}

/// Bounding box of all workouts, for fitting the map to every marker.
async fn get_bounds(State(state): State<Arc<AppState>>) -> Json<Option<WorkoutBounds>> {
    Json(state.tracker.lock().await.bounds())
}
