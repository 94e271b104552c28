// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Construction of typed workouts from raw inputs or stored entries.

use crate::models::{
    Coordinates, Cycling, Identity, PersistedWorkout, Running, Workout, WorkoutCommon,
    WorkoutKind,
};
use validator::Validate;

/// Build a workout of the given kind.
///
/// `metric` is the cadence (steps/min) for running or the elevation gain
/// (metres) for cycling. When `prior` is given the new record takes over its
/// id, creation time and interaction count; otherwise a fresh identity is
/// generated.
///
/// Inputs are expected to be validated by the caller: a zero distance or
/// duration produces non-finite derived metrics.
pub fn create(
    kind: WorkoutKind,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    metric: f64,
    prior: Option<Identity>,
) -> Workout {
    let identity = prior.unwrap_or_else(Identity::fresh);
    let common = WorkoutCommon::new(kind, identity, coordinates, distance_km, duration_min);

    match kind {
        WorkoutKind::Running => Workout::Running(Running::new(common, metric)),
        WorkoutKind::Cycling => Workout::Cycling(Cycling::new(common, metric)),
    }
}

/// Rebuild a typed workout from a stored entry.
///
/// Derived values in the entry are ignored and recomputed.
pub fn reconstruct(entry: &PersistedWorkout) -> Result<Workout, DecodeError> {
    let kind: WorkoutKind = entry
        .kind
        .parse()
        .map_err(|_| DecodeError::UnknownKind(entry.kind.clone()))?;

    entry
        .coordinates
        .validate()
        .map_err(DecodeError::InvalidCoordinates)?;
    check_positive("distanceKm", entry.distance_km)?;
    check_positive("durationMin", entry.duration_min)?;

    let metric = match kind {
        WorkoutKind::Running => {
            let cadence = entry
                .cadence_spm
                .ok_or(DecodeError::MissingField("cadenceSpm"))?;
            check_positive("cadenceSpm", cadence)?;
            cadence
        }
        WorkoutKind::Cycling => entry
            .elevation_gain_m
            .ok_or(DecodeError::MissingField("elevationGainM"))?,
    };

    Ok(create(
        kind,
        entry.coordinates,
        entry.distance_km,
        entry.duration_min,
        metric,
        Some(entry.identity()),
    ))
}

fn check_positive(field: &'static str, value: f64) -> Result<(), DecodeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DecodeError::InvalidValue { field, value })
    }
}

/// Errors from turning stored data back into workouts.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed workout entry: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown workout kind: {0}")]
    UnknownKind(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Coordinates out of range: {0}")]
    InvalidCoordinates(validator::ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutId;
    use chrono::{TimeZone, Utc};

    fn prior() -> Identity {
        Identity {
            id: WorkoutId::from("kept-id"),
            created_at: Utc.with_ymd_and_hms(2024, 4, 14, 9, 5, 0).unwrap(),
            interaction_count: 7,
        }
    }

    fn running_entry() -> PersistedWorkout {
        PersistedWorkout::from(&create(
            WorkoutKind::Running,
            Coordinates::new(45.0, 7.6),
            5.0,
            30.0,
            150.0,
            Some(prior()),
        ))
    }

    #[test]
    fn test_create_running() {
        let workout = create(
            WorkoutKind::Running,
            Coordinates::new(45.0, 7.6),
            5.0,
            30.0,
            150.0,
            None,
        );

        let Workout::Running(running) = &workout else {
            panic!("expected running workout");
        };
        assert_eq!(running.pace_min_per_km(), 6.0);
        assert_eq!(workout.interaction_count(), 0);

        let expected_label = format!(
            "Running on {}",
            workout.created_at().format("%B %-d at %H:%M")
        );
        assert_eq!(workout.label(), expected_label);
    }

    #[test]
    fn test_create_cycling() {
        let workout = create(
            WorkoutKind::Cycling,
            Coordinates::new(45.0, 7.6),
            20.0,
            60.0,
            400.0,
            None,
        );

        let Workout::Cycling(cycling) = &workout else {
            panic!("expected cycling workout");
        };
        assert_eq!(cycling.speed_kmh(), 20.0);
        assert_eq!(cycling.elevation_gain_m(), 400.0);
        assert!(workout.label().starts_with("Cycling on "));
    }

    #[test]
    fn test_create_with_prior_keeps_identity() {
        let prior = prior();
        let workout = create(
            WorkoutKind::Running,
            Coordinates::new(1.0, 2.0),
            10.0,
            50.0,
            160.0,
            Some(prior.clone()),
        );

        assert_eq!(workout.id(), &prior.id);
        assert_eq!(workout.created_at(), prior.created_at);
        assert_eq!(workout.interaction_count(), prior.interaction_count);
        assert_eq!(workout.label(), "Running on April 14 at 09:05");
    }

    #[test]
    fn test_fresh_workouts_get_distinct_ids() {
        let coords = Coordinates::new(0.0, 0.0);
        let a = create(WorkoutKind::Running, coords, 1.0, 1.0, 1.0, None);
        let b = create(WorkoutKind::Running, coords, 1.0, 1.0, 1.0, None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_reconstruct_restores_workout() {
        let original = create(
            WorkoutKind::Cycling,
            Coordinates::new(45.0, 7.6),
            20.0,
            60.0,
            400.0,
            Some(prior()),
        );

        let rebuilt = reconstruct(&PersistedWorkout::from(&original)).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_reconstruct_ignores_stored_derived_values() {
        let mut entry = running_entry();
        entry.pace_min_per_km = Some(99.0);
        entry.label = Some("tampered".to_string());

        let Workout::Running(running) = reconstruct(&entry).unwrap() else {
            panic!("expected running workout");
        };
        assert_eq!(running.pace_min_per_km(), 6.0);
        assert_eq!(running.common().label(), "Running on April 14 at 09:05");
    }

    #[test]
    fn test_reconstruct_unknown_kind() {
        let mut entry = running_entry();
        entry.kind = "swimming".to_string();

        let err = reconstruct(&entry).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownKind(k) if k == "swimming"));
    }

    #[test]
    fn test_reconstruct_missing_type_specific_value() {
        let mut entry = running_entry();
        entry.cadence_spm = None;

        let err = reconstruct(&entry).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("cadenceSpm")));
    }

    #[test]
    fn test_reconstruct_rejects_zero_duration() {
        let mut entry = running_entry();
        entry.duration_min = 0.0;

        let err = reconstruct(&entry).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidValue {
                field: "durationMin",
                ..
            }
        ));
    }

    #[test]
    fn test_reconstruct_rejects_out_of_range_coordinates() {
        let mut entry = running_entry();
        entry.coordinates = Coordinates::new(999.0, 999.0);

        let err = reconstruct(&entry).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidCoordinates(_)));
    }

    #[test]
    fn test_reconstruct_allows_negative_elevation() {
        let mut entry = PersistedWorkout::from(&create(
            WorkoutKind::Cycling,
            Coordinates::new(0.0, 0.0),
            10.0,
            30.0,
            0.0,
            None,
        ));
        entry.elevation_gain_m = Some(-15.0);

        let workout = reconstruct(&entry).unwrap();
        assert_eq!(workout.type_specific_value(), -15.0);
    }
}
