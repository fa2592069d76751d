//! Predictors
//!
//! The cascade only sees the [`Classifier`] and [`Regressor`] traits, so any
//! fitted model can be plugged in. The bundle format ships linear and logistic
//! models.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::ModelError;

// ============================================================================
// TRAITS
// ============================================================================

/// Binary classifier over a scaled feature vector
pub trait Classifier: Send + Sync {
    fn predict(&self, features: ArrayView1<f64>) -> Result<bool, ModelError>;
    /// Probability of the positive class
    fn predict_probability(&self, features: ArrayView1<f64>) -> Result<f64, ModelError>;
}

/// Scalar regressor over a scaled feature vector
pub trait Regressor: Send + Sync {
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, ModelError>;
}

// ============================================================================
// LINEAR MODELS
// ============================================================================

/// `intercept + coefficients · x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    pub fn width(&self) -> usize {
        self.coefficients.len()
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, ModelError> {
        decision(&self.coefficients, self.intercept, features, "linear model")
    }
}

fn decision(
    coefficients: &[f64],
    intercept: f64,
    features: ArrayView1<f64>,
    component: &str,
) -> Result<f64, ModelError> {
    if features.len() != coefficients.len() {
        return Err(ModelError::ShapeMismatch {
            component: component.to_string(),
            expected: coefficients.len(),
            actual: features.len(),
        });
    }
    Ok(intercept + ArrayView1::from(coefficients).dot(&features))
}

fn default_threshold() -> f64 {
    0.5
}

/// Logistic regression: `sigmoid(intercept + coefficients · x)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Positive when probability is strictly above this
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self { coefficients, intercept, threshold: default_threshold() }
    }

    pub fn width(&self) -> usize {
        self.coefficients.len()
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: ArrayView1<f64>) -> Result<bool, ModelError> {
        Ok(self.predict_probability(features)? > self.threshold)
    }

    fn predict_probability(&self, features: ArrayView1<f64>) -> Result<f64, ModelError> {
        let z = decision(&self.coefficients, self.intercept, features, "logistic model")?;
        Ok(sigmoid(z))
    }
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
