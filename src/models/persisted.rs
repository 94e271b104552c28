// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Type-erased workout representation written to storage.
//!
//! The `kind` tag is kept as a plain string and the kind-specific values are
//! optional, so any stored entry can be read back before deciding which
//! variant it becomes. Derived values are written for convenience but never
//! read as authoritative.
//!
//! Entries saved by the earlier browser version of the tracker (`type`,
//! `date`, `clicks`, `coords`, ...) are accepted through field aliases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::workout::{Coordinates, Identity, Workout, WorkoutId};

/// One stored workout entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWorkout {
    #[serde(alias = "type")]
    pub kind: String,
    pub id: WorkoutId,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "clicks")]
    pub interaction_count: u32,
    #[serde(alias = "coords")]
    pub coordinates: Coordinates,
    #[serde(alias = "distance")]
    pub distance_km: f64,
    #[serde(alias = "duration")]
    pub duration_min: f64,
    #[serde(default, alias = "cadence", skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<f64>,
    #[serde(
        default,
        alias = "elevationGain",
        skip_serializing_if = "Option::is_none"
    )]
    pub elevation_gain_m: Option<f64>,

    // ─── Derived (informational only) ────────────────────────────
    #[serde(default, alias = "pace", skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,
    #[serde(default, alias = "speed", skip_serializing_if = "Option::is_none")]
    pub speed_kmh: Option<f64>,
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PersistedWorkout {
    /// The identity carried by this entry.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            created_at: self.created_at,
            interaction_count: self.interaction_count,
        }
    }
}

impl From<&Workout> for PersistedWorkout {
    fn from(workout: &Workout) -> Self {
        let (cadence_spm, elevation_gain_m, pace_min_per_km, speed_kmh) = match workout {
            Workout::Running(r) => (
                Some(r.cadence_spm()),
                None,
                Some(r.pace_min_per_km()),
                None,
            ),
            Workout::Cycling(c) => (None, Some(c.elevation_gain_m()), None, Some(c.speed_kmh())),
        };

        Self {
            kind: workout.kind().as_str().to_string(),
            id: workout.id().clone(),
            created_at: workout.created_at(),
            interaction_count: workout.interaction_count(),
            coordinates: workout.coordinates(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            cadence_spm,
            elevation_gain_m,
            pace_min_per_km,
            speed_kmh,
            label: Some(workout.label().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_current_format() {
        let json = r#"{
            "kind": "running",
            "id": "abc",
            "createdAt": "2024-04-14T09:05:00.123Z",
            "interactionCount": 2,
            "coordinates": [45.0, 7.6],
            "distanceKm": 5.0,
            "durationMin": 30.0,
            "cadenceSpm": 150.0
        }"#;

        let entry: PersistedWorkout = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, "running");
        assert_eq!(entry.id.as_str(), "abc");
        assert_eq!(entry.interaction_count, 2);
        assert_eq!(entry.coordinates, Coordinates::new(45.0, 7.6));
        assert_eq!(entry.cadence_spm, Some(150.0));
        assert_eq!(entry.elevation_gain_m, None);
        assert_eq!(entry.created_at.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parses_legacy_browser_format() {
        let json = r#"{
            "date": "2023-06-01T17:42:10.500Z",
            "id": "1685641330500",
            "clicks": 4,
            "coords": [38.72, -9.14],
            "distance": 24,
            "duration": 70,
            "type": "cycling",
            "elevationGain": 320,
            "speed": 20.571428571428573,
            "description": "Cycling on June 1 at 42"
        }"#;

        let entry: PersistedWorkout = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, "cycling");
        assert_eq!(entry.interaction_count, 4);
        assert_eq!(entry.distance_km, 24.0);
        assert_eq!(entry.duration_min, 70.0);
        assert_eq!(entry.elevation_gain_m, Some(320.0));
        assert_eq!(entry.label.as_deref(), Some("Cycling on June 1 at 42"));
    }

    #[test]
    fn test_missing_interaction_count_defaults_to_zero() {
        let json = r#"{
            "kind": "cycling",
            "id": "x",
            "createdAt": "2024-01-01T00:00:00Z",
            "coordinates": [0.0, 0.0],
            "distanceKm": 1.0,
            "durationMin": 1.0,
            "elevationGainM": 0.0
        }"#;

        let entry: PersistedWorkout = serde_json::from_str(json).unwrap();
        assert_eq!(entry.interaction_count, 0);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{ "kind": "running", "id": "x", "coordinates": [0.0, 0.0] }"#;
        assert!(serde_json::from_str::<PersistedWorkout>(json).is_err());
    }
}
