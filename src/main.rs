//! Disaster Response Server
//!
//! Loads the fitted model bundle once and serves recommendations over HTTP.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use disaster_response::{
    config::Config,
    create_router,
    logic::{model::ModelBundle, pipeline::ResponsePipeline},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "disaster_response=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Disaster Response Server starting ({})...", config.environment);
    tracing::info!("Model bundle: {}", config.model_bundle_path.display());

    // Load models once; they are read-only for the lifetime of the process
    let bundle = ModelBundle::from_path(&config.model_bundle_path)
        .with_context(|| format!("failed to load model bundle from {}", config.model_bundle_path.display()))?;
    let pipeline = ResponsePipeline::from_bundle(bundle)
        .context("failed to build response pipeline")?;

    let metadata = pipeline.metadata();
    tracing::info!(
        "Models loaded: trained {}, accuracy {:.2}%, {} records",
        metadata.training_date.as_deref().unwrap_or("Unknown"),
        metadata.model_accuracy * 100.0,
        metadata.dataset_size.unwrap_or(0),
    );
    if pipeline.can_estimate_parameters() {
        tracing::info!("Parameter estimation enabled");
    }

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
