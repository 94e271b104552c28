// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered in-memory collection of workouts.
//!
//! Order is creation order. Edits replace a workout in place so its position
//! never changes. Each id appears at most once.

use crate::models::{PersistedWorkout, Workout, WorkoutBounds, WorkoutId};
use crate::services::factory::{self, DecodeError};

/// Ordered workout collection.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current workouts in order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.workouts.iter().position(|w| w.id() == id)
    }

    /// Append a new workout, returning its index.
    pub fn add(&mut self, workout: Workout) -> Result<usize, StoreError> {
        if self.position(workout.id()).is_some() {
            return Err(StoreError::DuplicateId(workout.id().clone()));
        }
        self.workouts.push(workout);
        Ok(self.workouts.len() - 1)
    }

    /// Swap in a new version of an existing workout at the same index.
    ///
    /// Returns the index so callers can refresh whatever they render for it.
    pub fn replace(&mut self, workout: Workout) -> Result<usize, StoreError> {
        let index = self
            .position(workout.id())
            .ok_or_else(|| StoreError::NotFound(workout.id().clone()))?;

        let existing = self.workouts[index].kind();
        if existing != workout.kind() {
            return Err(StoreError::KindMismatch {
                id: workout.id().clone(),
                existing: existing.as_str(),
                requested: workout.kind().as_str(),
            });
        }

        self.workouts[index] = workout;
        Ok(index)
    }

    /// Remove a workout by id, returning it and the index it occupied.
    pub fn remove(&mut self, id: &WorkoutId) -> Result<(usize, Workout), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok((index, self.workouts.remove(index)))
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    /// Increment the interaction count of a workout and return the new count.
    pub fn record_interaction(&mut self, id: &WorkoutId) -> Result<u32, StoreError> {
        let workout = self
            .find_by_id_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        workout.record_interaction();
        Ok(workout.interaction_count())
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    /// Plain representation of every workout, in order.
    pub fn to_persistable(&self) -> Vec<PersistedWorkout> {
        self.workouts.iter().map(PersistedWorkout::from).collect()
    }

    /// Replace the contents with workouts rebuilt from stored entries.
    ///
    /// Entries that cannot be rebuilt, or repeat an id already loaded, are
    /// skipped. `None` or an empty list leaves the store empty.
    pub fn load_from(&mut self, entries: Option<Vec<serde_json::Value>>) -> LoadReport {
        self.workouts.clear();
        let mut report = LoadReport::default();

        for (index, raw) in entries.unwrap_or_default().into_iter().enumerate() {
            let result = serde_json::from_value::<PersistedWorkout>(raw)
                .map_err(DecodeError::from)
                .and_then(|entry| factory::reconstruct(&entry));

            match result {
                Ok(workout) => {
                    let id = workout.id().clone();
                    if self.add(workout).is_ok() {
                        report.loaded += 1;
                    } else {
                        tracing::warn!(index, id = %id, "Skipping stored workout with duplicate id");
                        report.skipped += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable stored workout");
                    report.skipped += 1;
                }
            }
        }

        report
    }

    /// Bounding box of all workout positions, or `None` when empty.
    pub fn bounds(&self) -> Option<WorkoutBounds> {
        WorkoutBounds::from_coordinates(self.workouts.iter().map(Workout::coordinates))
    }
}

/// Outcome of [`WorkoutStore::load_from`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Errors from store mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    #[error("Workout already exists: {0}")]
    DuplicateId(WorkoutId),

    #[error("Workout {id} is {existing}; it cannot become {requested}")]
    KindMismatch {
        id: WorkoutId,
        existing: &'static str,
        requested: &'static str,
    },
}
