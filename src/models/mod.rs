// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod bounds;
pub mod persisted;
pub mod workout;

pub use bounds::WorkoutBounds;
pub use persisted::PersistedWorkout;
pub use workout::{
    Coordinates, Cycling, Identity, Running, Workout, WorkoutCommon, WorkoutId, WorkoutKind,
};
