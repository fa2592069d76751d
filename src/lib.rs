//! Disaster Response Service
//!
//! Turns a disaster scenario into an emergency response recommendation by
//! chaining three fitted models and a deterministic rule layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      DISASTER RESPONSE                           │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  raw request ─▶ Category Encoder ─▶ Feature Assembler            │
//! │                                          │                       │
//! │                                          ▼                       │
//! │                                     Scaler Bank                  │
//! │                                          │                       │
//! │        ┌─────────────────────────────────┼───────────────┐       │
//! │        ▼                                 ▼               │       │
//! │  A: major disaster             B: damage index ──▶ C: response   │
//! │        └─────────────────────────────────┬───────────────┘       │
//! │                                          ▼                       │
//! │                              Decision Rule Engine                │
//! │                                          │                       │
//! │                                          ▼                       │
//! │                               Response Assembler                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};
use logic::pipeline::ResponsePipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ResponsePipeline>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::health::status))
        .route("/api/disaster-types", get(handlers::catalog::disaster_types))
        .route("/api/model-info", get(handlers::catalog::model_info))
        .route("/api/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
