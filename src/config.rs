//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the fitted model bundle (JSON)
    pub model_bundle_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_bundle_path: env::var("MODEL_BUNDLE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets/model_bundle.json")),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            model_bundle_path: PathBuf::from("assets/model_bundle.json"),
            environment: "development".to_string(),
        }
    }
}
