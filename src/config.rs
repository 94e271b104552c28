//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::db::keys;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JSON file holding the local storage items
    pub data_path: PathBuf,
    /// Storage key under which the workout list is saved
    pub storage_key: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            data_path: PathBuf::from("data/workouts.json"),
            storage_key: keys::WORKOUTS.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let storage_key = env::var("WORKOUTS_STORAGE_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| keys::WORKOUTS.to_string());
        if storage_key.is_empty() {
            return Err(ConfigError::Invalid("WORKOUTS_STORAGE_KEY", storage_key));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port,
            data_path: env::var("WORKOUTS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/workouts.json")),
            storage_key,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
