//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    status: &'static str,
    message: &'static str,
    version: &'static str,
    training_date: Option<String>,
    model_accuracy: String,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let metadata = state.pipeline.metadata();
    Json(StatusResponse {
        status: "online",
        message: "Disaster Prediction API is running",
        version: env!("CARGO_PKG_VERSION"),
        training_date: metadata.training_date.clone(),
        model_accuracy: percent(metadata.model_accuracy),
    })
}

/// 0.9551 -> "95.51%"
pub(crate) fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
