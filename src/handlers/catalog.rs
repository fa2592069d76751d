//! Catalog handlers: known vocabularies and model metadata

use axum::{extract::State, Json};
use serde::Serialize;

use crate::handlers::health::percent;
use crate::logic::features::Stage;
use crate::logic::response::round_to;
use crate::AppState;

#[derive(Serialize)]
pub struct DisasterTypesResponse {
    disaster_types: Vec<String>,
    locations: Vec<String>,
}

pub async fn disaster_types(State(state): State<AppState>) -> Json<DisasterTypesResponse> {
    Json(DisasterTypesResponse {
        disaster_types: state.pipeline.disaster_types().to_vec(),
        locations: state.pipeline.locations().to_vec(),
    })
}

#[derive(Serialize)]
pub struct ModelInfoResponse {
    training_date: Option<String>,
    dataset_size: Option<u64>,
    model_performance: ModelPerformance,
    features: StageFeatures,
}

#[derive(Serialize)]
pub struct ModelPerformance {
    accuracy: String,
    damage_r2_score: f64,
    response_r2_score: f64,
}

#[derive(Serialize)]
pub struct StageFeatures {
    disaster_prediction: Vec<String>,
    damage_assessment: Vec<String>,
    response_optimization: Vec<String>,
}

pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let metadata = state.pipeline.metadata();
    let recorded = &metadata.feature_columns;

    Json(ModelInfoResponse {
        training_date: metadata.training_date.clone(),
        dataset_size: metadata.dataset_size,
        model_performance: ModelPerformance {
            accuracy: percent(metadata.model_accuracy),
            damage_r2_score: round_to(metadata.damage_r2_score, 4),
            response_r2_score: round_to(metadata.response_r2_score, 4),
        },
        features: StageFeatures {
            disaster_prediction: columns(&recorded.disaster_prediction, Stage::Disaster),
            damage_assessment: columns(&recorded.damage_assessment, Stage::Damage),
            response_optimization: columns(&recorded.response_optimization, Stage::Response),
        },
    })
}

// Bundles without recorded columns report the compiled layout
fn columns(recorded: &[String], stage: Stage) -> Vec<String> {
    if recorded.is_empty() {
        stage.layout().iter().map(|name| name.to_string()).collect()
    } else {
        recorded.to_vec()
    }
}
