//! Scaler Bank - fitted standard normalization per stage

use std::collections::HashMap;

use ndarray::Array1;

use super::ModelError;
use crate::logic::features::{Stage, StageVector};

/// `(x - mean) / scale`, fitted per column
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Zero scales (constant training columns) are replaced by 1.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        if mean.len() != scale.len() {
            return Err(ModelError::ShapeMismatch {
                component: "scaler parameters".to_string(),
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        let scale = scale.into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Array1<f64>>();
        Ok(Self { mean: Array1::from(mean), scale })
    }

    /// Pass-through scaler of the given width
    #[cfg(test)]
    pub(crate) fn identity(width: usize) -> Self {
        Self {
            mean: Array1::zeros(width),
            scale: Array1::ones(width),
        }
    }

    /// Number of columns the scaler was fitted on
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, values: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
        if values.len() != self.width() {
            return Err(ModelError::ShapeMismatch {
                component: "scaler".to_string(),
                expected: self.width(),
                actual: values.len(),
            });
        }
        Ok((values - &self.mean) / &self.scale)
    }
}

/// One fitted scaler per stage
#[derive(Debug, Clone, Default)]
pub struct ScalerBank {
    scalers: HashMap<Stage, StandardScaler>,
}

impl ScalerBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stage: Stage, scaler: StandardScaler) -> Self {
        self.scalers.insert(stage, scaler);
        self
    }

    pub fn get(&self, stage: Stage) -> Option<&StandardScaler> {
        self.scalers.get(&stage)
    }

    /// Scale a stage vector with the scaler fitted for its stage
    pub fn transform(&self, vector: &StageVector) -> Result<Array1<f64>, ModelError> {
        let scaler = self.get(vector.stage)
            .ok_or(ModelError::MissingScaler(vector.stage))?;
        scaler.transform(&vector.values).map_err(|e| match e {
            ModelError::ShapeMismatch { expected, actual, .. } => ModelError::ShapeMismatch {
                component: format!("{} scaler", vector.stage),
                expected,
                actual,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_transform() {
        let scaler = StandardScaler::new(vec![1.0, 10.0], vec![2.0, 5.0]).unwrap();
        let out = scaler.transform(&array![3.0, 0.0]).unwrap();
        assert_eq!(out, array![1.0, -2.0]);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let scaler = StandardScaler::new(vec![0.5], vec![0.0]).unwrap();
        assert_eq!(scaler.transform(&array![0.5]).unwrap(), array![0.0]);
    }

    #[test]
    fn test_mismatched_parameters() {
        assert!(StandardScaler::new(vec![0.0, 1.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_shape_mismatch_names_stage() {
        let bank = ScalerBank::new().with(Stage::Damage, StandardScaler::identity(9));
        let vector = StageVector { stage: Stage::Damage, values: Array1::zeros(8) };
        match bank.transform(&vector) {
            Err(ModelError::ShapeMismatch { component, expected, actual }) => {
                assert_eq!(component, "damage scaler");
                assert_eq!((expected, actual), (9, 8));
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_stage_scaler() {
        let bank = ScalerBank::new();
        let vector = StageVector { stage: Stage::Response, values: Array1::zeros(8) };
        assert_eq!(bank.transform(&vector), Err(ModelError::MissingScaler(Stage::Response)));
    }
}
