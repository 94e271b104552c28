// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod factory;
pub mod store;
pub mod tracker;

pub use factory::DecodeError;
pub use store::{LoadReport, StoreError, WorkoutStore};
pub use tracker::{SubmitOutcome, TrackerError, WorkoutInput, WorkoutTracker};
