// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout records: shared identity and measurements plus the
//! running/cycling variants with their derived metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::time_utils::format_label_time;

/// Discriminator for the workout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag as stored and sent over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in labels.
    pub fn title(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised workout kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown workout kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Opaque, stable workout identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map position of a workout. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// The part of a workout that survives edits and reloads.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: WorkoutId,
    pub created_at: DateTime<Utc>,
    pub interaction_count: u32,
}

impl Identity {
    /// Identity for a brand-new entry: new id, created now, never selected.
    pub fn fresh() -> Self {
        Self {
            id: WorkoutId::generate(),
            created_at: Utc::now(),
            interaction_count: 0,
        }
    }
}

/// Build the display label for a workout, e.g. `Running on April 14 at 09:05`.
///
/// The date and time are in UTC, not the user's local zone.
pub fn compute_label(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.title(), format_label_time(created_at))
}

/// Fields shared by every workout variant.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCommon {
    identity: Identity,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    label: String,
}

impl WorkoutCommon {
    /// Computes the label from `kind` and the creation time.
    pub fn new(
        kind: WorkoutKind,
        identity: Identity,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
    ) -> Self {
        let label = compute_label(kind, identity.created_at);
        Self {
            identity,
            coordinates,
            distance_km,
            duration_min,
            label,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A running workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    common: WorkoutCommon,
    cadence_spm: f64,
    pace_min_per_km: f64,
}

impl Running {
    pub fn new(common: WorkoutCommon, cadence_spm: f64) -> Self {
        let pace_min_per_km = common.duration_min / common.distance_km;
        Self {
            common,
            cadence_spm,
            pace_min_per_km,
        }
    }

    pub fn common(&self) -> &WorkoutCommon {
        &self.common
    }

    /// Steps per minute.
    pub fn cadence_spm(&self) -> f64 {
        self.cadence_spm
    }

    /// Minutes per kilometre.
    pub fn pace_min_per_km(&self) -> f64 {
        self.pace_min_per_km
    }
}

/// A cycling workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycling {
    common: WorkoutCommon,
    elevation_gain_m: f64,
    speed_kmh: f64,
}

impl Cycling {
    pub fn new(common: WorkoutCommon, elevation_gain_m: f64) -> Self {
        let speed_kmh = common.distance_km / (common.duration_min / 60.0);
        Self {
            common,
            elevation_gain_m,
            speed_kmh,
        }
    }

    pub fn common(&self) -> &WorkoutCommon {
        &self.common
    }

    pub fn elevation_gain_m(&self) -> f64 {
        self.elevation_gain_m
    }

    /// Kilometres per hour.
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

/// A typed workout record.
#[derive(Debug, Clone, PartialEq)]
pub enum Workout {
    Running(Running),
    Cycling(Cycling),
}

impl Workout {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Workout::Running(_) => WorkoutKind::Running,
            Workout::Cycling(_) => WorkoutKind::Cycling,
        }
    }

    pub fn common(&self) -> &WorkoutCommon {
        match self {
            Workout::Running(r) => &r.common,
            Workout::Cycling(c) => &c.common,
        }
    }

    fn common_mut(&mut self) -> &mut WorkoutCommon {
        match self {
            Workout::Running(r) => &mut r.common,
            Workout::Cycling(c) => &mut c.common,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.common().identity
    }

    pub fn id(&self) -> &WorkoutId {
        &self.identity().id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.identity().created_at
    }

    pub fn interaction_count(&self) -> u32 {
        self.identity().interaction_count
    }

    pub fn coordinates(&self) -> Coordinates {
        self.common().coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.common().distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.common().duration_min
    }

    pub fn label(&self) -> &str {
        &self.common().label
    }

    /// The kind-specific input: cadence for running, elevation gain for cycling.
    pub fn type_specific_value(&self) -> f64 {
        match self {
            Workout::Running(r) => r.cadence_spm,
            Workout::Cycling(c) => c.elevation_gain_m,
        }
    }

    /// Note that the user selected this workout.
    pub fn record_interaction(&mut self) {
        let identity = &mut self.common_mut().identity;
        identity.interaction_count = identity.interaction_count.saturating_add(1);
    }
}
