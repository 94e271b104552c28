// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: the entry point used by the API layer.
//!
//! Owns the workout store and its storage, and writes the full workout list
//! back to storage after every change:
//! 1. Build the typed workout (new or edited)
//! 2. Add it, or replace the edited one in place
//! 3. Serialize the whole store under the workouts key
//!
//! If the write fails the store is put back as it was, so memory never holds
//! a change that was reported as failed.

use crate::db::{LocalStorage, StorageError};
use crate::models::{Coordinates, Workout, WorkoutBounds, WorkoutId, WorkoutKind};
use crate::services::factory;
use crate::services::store::{LoadReport, StoreError, WorkoutStore};

/// Raw workout values submitted by a user, already validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub kind: WorkoutKind,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence for running, elevation gain for cycling.
    pub metric: f64,
}

/// What a submission did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added { index: usize },
    Replaced { index: usize },
}

impl SubmitOutcome {
    pub fn index(self) -> usize {
        match self {
            SubmitOutcome::Added { index } | SubmitOutcome::Replaced { index } => index,
        }
    }
}

/// Application controller for workouts.
#[derive(Debug)]
pub struct WorkoutTracker {
    store: WorkoutStore,
    storage: LocalStorage,
    key: String,
}

impl WorkoutTracker {
    /// Create a tracker and load whatever is saved under `key`.
    ///
    /// Unreadable saved data results in an empty tracker rather than an error.
    pub fn open(storage: LocalStorage, key: impl Into<String>) -> Self {
        let mut tracker = Self {
            store: WorkoutStore::new(),
            storage,
            key: key.into(),
        };
        let report = tracker.load();
        tracing::info!(
            key = %tracker.key,
            loaded = report.loaded,
            skipped = report.skipped,
            "Workouts loaded"
        );
        tracker
    }

    /// Reload the store from storage.
    pub fn load(&mut self) -> LoadReport {
        let entries = match self.storage.get_item(&self.key) {
            None => None,
            Some(raw) => match serde_json::from_str::<Option<Vec<serde_json::Value>>>(raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "Saved workouts unreadable, starting empty");
                    None
                }
            },
        };
        self.store.load_from(entries)
    }

    /// Write the current store to storage.
    pub fn persist(&mut self) -> Result<(), TrackerError> {
        let json = serde_json::to_string(&self.store.to_persistable())?;
        self.storage.set_item(&self.key, json)?;
        tracing::debug!(key = %self.key, count = self.store.len(), "Workouts persisted");
        Ok(())
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.workouts()
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    pub fn bounds(&self) -> Option<WorkoutBounds> {
        self.store.bounds()
    }

    /// Persist after a mutation, restoring `snapshot` if the write fails.
    fn commit(&mut self, snapshot: WorkoutStore) -> Result<(), TrackerError> {
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "Write failed, discarding change");
            self.store = snapshot;
            return Err(e);
        }
        Ok(())
    }

    /// Record a new workout, or replace `editing` with the submitted values.
    ///
    /// An edit keeps the id, creation time and interaction count of the
    /// workout it replaces.
    pub fn submit(
        &mut self,
        input: WorkoutInput,
        editing: Option<&WorkoutId>,
    ) -> Result<SubmitOutcome, TrackerError> {
        let snapshot = self.store.clone();
        let outcome = match editing {
            None => {
                let workout = factory::create(
                    input.kind,
                    input.coordinates,
                    input.distance_km,
                    input.duration_min,
                    input.metric,
                    None,
                );
                tracing::info!(id = %workout.id(), kind = %input.kind, "Adding workout");
                SubmitOutcome::Added {
                    index: self.store.add(workout)?,
                }
            }
            Some(id) => {
                let prior = self
                    .store
                    .find_by_id(id)
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?
                    .identity()
                    .clone();
                let workout = factory::create(
                    input.kind,
                    input.coordinates,
                    input.distance_km,
                    input.duration_min,
                    input.metric,
                    Some(prior),
                );
                tracing::info!(id = %id, kind = %input.kind, "Replacing workout");
                SubmitOutcome::Replaced {
                    index: self.store.replace(workout)?,
                }
            }
        };

        self.commit(snapshot)?;
        Ok(outcome)
    }

    /// Note that the user selected a workout. Returns the new interaction count.
    pub fn select(&mut self, id: &WorkoutId) -> Result<u32, TrackerError> {
        let snapshot = self.store.clone();
        let count = self.store.record_interaction(id)?;
        self.commit(snapshot)?;
        Ok(count)
    }

    /// Delete one workout, returning the index it occupied.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<usize, TrackerError> {
        let snapshot = self.store.clone();
        let (index, _) = self.store.remove(id)?;
        self.commit(snapshot)?;
        tracing::info!(id = %id, index, "Deleted workout");
        Ok(index)
    }

    /// Delete every workout and drop the saved list entirely.
    pub fn delete_all(&mut self) -> Result<usize, TrackerError> {
        let snapshot = self.store.clone();
        let count = self.store.len();
        self.store.clear();
        if let Err(e) = self.storage.remove_item(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Write failed, keeping workouts");
            self.store = snapshot;
            return Err(e.into());
        }
        tracing::info!(count, "Deleted all workouts");
        Ok(count)
    }
}

/// Errors from tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize workouts: {0}")]
    Serialize(#[from] serde_json::Error),
}
