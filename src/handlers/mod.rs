//! HTTP handlers

pub mod health;
pub mod catalog;
pub mod predict;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Response;

    use crate::logic::model::bundle::sample_bundle;
    use crate::logic::pipeline::ResponsePipeline;
    use crate::AppState;

    pub fn state() -> AppState {
        AppState {
            pipeline: Arc::new(ResponsePipeline::from_bundle(sample_bundle()).unwrap()),
        }
    }

    pub async fn json_body(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
