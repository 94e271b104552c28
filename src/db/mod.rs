//! Persistence layer (key/value local storage).

pub mod local_storage;

pub use local_storage::{LocalStorage, StorageError};

/// Storage keys as constants.
pub mod keys {
    /// Serialized workout list.
    pub const WORKOUTS: &str = "workouts";
}
