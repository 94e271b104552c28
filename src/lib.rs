// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty: record running and cycling workouts at places on a map.
//!
//! This crate provides the workout model, its local persistence and the
//! JSON API used by the map frontend.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::WorkoutTracker;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<WorkoutTracker>,
}
