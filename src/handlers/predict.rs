//! Prediction handler

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::models::assessment::AssessmentResponse;
use crate::models::scenario::RawScenario;
use crate::{AppError, AppResult, AppState};

/// Run the full assessment for one scenario
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<RawScenario>, JsonRejection>,
) -> AppResult<Json<AssessmentResponse>> {
    let Json(raw) = payload?;
    let today = chrono::Local::now().date_naive();

    // Inference is CPU-bound; keep it off the async workers
    let pipeline = state.pipeline.clone();
    let assessment = tokio::task::spawn_blocking(move || pipeline.assess(&raw, today))
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))??;

    Ok(Json(assessment))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::handlers::testing::{json_body, state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::post("/api/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_predict_earthquake() {
        let payload = json!({
            "disaster_type": "Earthquake",
            "location": "Japan",
            "latitude": 35.6762,
            "longitude": 139.6503,
            "severity_level": 9,
            "affected_population": 50000,
            "economic_loss": 1000000000,
            "month": 7
        });
        let response = create_router(state()).oneshot(post(payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["emergency_response"]["priority"], "CRITICAL");
        assert_eq!(body["emergency_response"]["alert_level"], "LEVEL 5 - MAXIMUM ALERT");
        assert_eq!(body["emergency_response"]["action_items"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_predict_accepts_numeric_strings() {
        let payload = json!({
            "disaster_type": "Flood",
            "location": "India",
            "latitude": "20.5",
            "longitude": "78.9",
            "severity_level": "3",
            "affected_population": "1000",
            "economic_loss": "0"
        });
        let response = create_router(state()).oneshot(post(payload.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_predict_invalid_field() {
        let payload = json!({
            "disaster_type": "Flood",
            "location": "India",
            "latitude": "north",
            "longitude": 78.9,
            "severity_level": 3,
            "affected_population": 1000,
            "economic_loss": 0
        });
        let response = create_router(state()).oneshot(post(payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("latitude"));
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let response = create_router(state()).oneshot(post("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 400);
    }
}
