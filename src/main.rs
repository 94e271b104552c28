// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty API Server
//!
//! Records running and cycling workouts placed on a map and keeps them in
//! a local storage file.

use mapty_tracker::{config::Config, db::LocalStorage, services::WorkoutTracker, AppState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Mapty API");

    // Open local storage and load saved workouts
    tracing::info!(path = %config.data_path.display(), "Opening workout storage");
    let storage = LocalStorage::open(&config.data_path)?;
    let tracker = WorkoutTracker::open(storage, config.storage_key.clone());
    tracing::info!(count = tracker.workouts().len(), "Workout tracker ready");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tracker: Mutex::new(tracker),
    });

    // Build router
    let app = mapty_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mapty_tracker=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
