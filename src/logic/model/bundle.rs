//! Model Bundle
//!
//! JSON document carrying every fitted artifact the pipeline needs: label
//! vocabularies, per-stage scalers, the three cascade models and, optionally,
//! the parameter estimation models. Loaded once at startup and validated
//! against the compiled feature layouts before anything is served.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::predictor::{LinearModel, LogisticModel};
use crate::logic::features::{validate_layout, LayoutMismatchError, Stage};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model bundle: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model bundle: {0}")]
    Invalid(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Training metadata, reported by the status and model-info endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetadata {
    pub training_date: Option<String>,
    pub dataset_size: Option<u64>,
    pub model_accuracy: f64,
    pub damage_r2_score: f64,
    pub response_r2_score: f64,
    pub feature_columns: FeatureColumns,
}

/// Column names recorded at training time (empty when not recorded)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureColumns {
    pub disaster_prediction: Vec<String>,
    pub damage_assessment: Vec<String>,
    pub response_optimization: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderClasses {
    pub disaster_type: Vec<String>,
    pub location: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageScalers {
    pub disaster: ScalerParams,
    pub damage: ScalerParams,
    pub response: ScalerParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeModels {
    pub disaster_classifier: LogisticModel,
    pub damage_regressor: LinearModel,
    pub response_regressor: LinearModel,
}

/// Models inferring severity, population and economic loss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterModels {
    pub scaler: ScalerParams,
    pub severity: LinearModel,
    pub population: LinearModel,
    pub economic_loss: LinearModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    #[serde(default)]
    pub metadata: ModelMetadata,
    pub encoders: EncoderClasses,
    pub scalers: StageScalers,
    pub models: CascadeModels,
    #[serde(default)]
    pub parameter_models: Option<ParameterModels>,
}

// ============================================================================
// LOADING
// ============================================================================

impl ModelBundle {
    /// Read, parse and validate a bundle file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BundleError> {
        let path = path.as_ref();
        tracing::info!("Loading model bundle from: {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a bundle document
    pub fn from_json(raw: &str) -> Result<Self, BundleError> {
        let bundle: Self = serde_json::from_str(raw)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check every fitted arity against the compiled stage layouts
    pub fn validate(&self) -> Result<(), BundleError> {
        check_scaler(Stage::Disaster, &self.scalers.disaster)?;
        check_scaler(Stage::Damage, &self.scalers.damage)?;
        check_scaler(Stage::Response, &self.scalers.response)?;

        check_width("disaster_classifier", Stage::Disaster, self.models.disaster_classifier.width())?;
        check_width("damage_regressor", Stage::Damage, self.models.damage_regressor.width())?;
        check_width("response_regressor", Stage::Response, self.models.response_regressor.width())?;

        let threshold = self.models.disaster_classifier.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(BundleError::Invalid(format!(
                "disaster_classifier threshold {} outside [0, 1]", threshold
            )));
        }

        let columns = &self.metadata.feature_columns;
        for (stage, recorded) in [
            (Stage::Disaster, &columns.disaster_prediction),
            (Stage::Damage, &columns.damage_assessment),
            (Stage::Response, &columns.response_optimization),
        ] {
            if !recorded.is_empty() {
                validate_layout(stage, recorded)?;
            }
        }

        if let Some(params) = &self.parameter_models {
            check_scaler(Stage::Parameters, &params.scaler)?;
            check_width("severity", Stage::Parameters, params.severity.width())?;
            check_width("population", Stage::Parameters, params.population.width())?;
            check_width("economic_loss", Stage::Parameters, params.economic_loss.width())?;
        }

        if self.encoders.disaster_type.is_empty() || self.encoders.location.is_empty() {
            tracing::warn!("Model bundle has an empty label vocabulary; every label will use the fallback code");
        }

        Ok(())
    }
}

fn check_scaler(stage: Stage, params: &ScalerParams) -> Result<(), BundleError> {
    check_width(&format!("{} scaler mean", stage), stage, params.mean.len())?;
    check_width(&format!("{} scaler scale", stage), stage, params.scale.len())?;
    if params.mean.iter().chain(&params.scale).any(|v| !v.is_finite()) {
        return Err(BundleError::Invalid(format!("{} scaler has non-finite parameters", stage)));
    }
    Ok(())
}

fn check_width(name: &str, stage: Stage, width: usize) -> Result<(), BundleError> {
    if width != stage.width() {
        return Err(BundleError::Invalid(format!(
            "{} has {} columns, {} layout needs {}",
            name, width, stage, stage.width()
        )));
    }
    Ok(())
}

/// Sample bundle shipped in `assets/`, shared by tests across the crate
#[cfg(test)]
pub(crate) fn sample_bundle() -> ModelBundle {
    ModelBundle::from_json(include_str!("../../../assets/model_bundle.json"))
        .expect("sample bundle is valid")
}
