//! Model Module - fitted parameters and inference
//!
//! Inference kept apart from the rule layer: scalers, predictors and the bundle that
//! carries their fitted parameters. Everything here is read-only once loaded.

use thiserror::Error;

use crate::logic::features::Stage;

pub mod scaler;
pub mod predictor;
pub mod bundle;

// Re-export common types
pub use scaler::{StandardScaler, ScalerBank};
pub use predictor::{Classifier, Regressor, LinearModel, LogisticModel};
pub use bundle::{BundleError, ModelBundle, ModelMetadata};

/// Contract violation between assembled features and fitted parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{component} shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch {
        component: String,
        expected: usize,
        actual: usize,
    },

    #[error("no scaler fitted for the {0} stage")]
    MissingScaler(Stage),

    #[error("{0} stage produced a non-finite value")]
    NonFinite(Stage),

    #[error("classifier probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}
