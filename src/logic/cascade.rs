//! Cascaded Predictor
//!
//! Three stages, no branching back:
//!
//! ```text
//!   A: disaster vector ─▶ Classifier ─▶ (is_major, major_probability)
//!   B: damage vector   ─▶ DamageRegressor ─▶ predicted_damage_index ─┐
//!   C: response vector (embeds B) ─▶ ResponseRegressor ◀──────────────┘
//! ```
//!
//! A and B are independent; C needs B. Any failure aborts the cascade, there is
//! no partial result.

use serde::Serialize;

use crate::logic::encoding::CategoryCodes;
use crate::logic::features::{damage_vector, disaster_vector, response_vector, Stage};
use crate::logic::model::{Classifier, ModelError, Regressor, ScalerBank};
use crate::models::scenario::ScenarioRequest;

/// Raw outputs of the three stages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CascadeResult {
    pub is_major: bool,
    /// Probability of a major disaster, in [0, 1]
    pub major_probability: f64,
    /// Roughly [0, 1], not clamped
    pub predicted_damage_index: f64,
    /// Not clamped
    pub predicted_response_time_hours: f64,
}

pub struct CascadedPredictor {
    scalers: ScalerBank,
    classifier: Box<dyn Classifier>,
    damage: Box<dyn Regressor>,
    response: Box<dyn Regressor>,
}

impl CascadedPredictor {
    pub fn new(
        scalers: ScalerBank,
        classifier: Box<dyn Classifier>,
        damage: Box<dyn Regressor>,
        response: Box<dyn Regressor>,
    ) -> Self {
        Self { scalers, classifier, damage, response }
    }

    pub fn run(&self, request: &ScenarioRequest, codes: CategoryCodes) -> Result<CascadeResult, ModelError> {
        let (is_major, major_probability) = self.classify(request, codes)?;
        let predicted_damage_index = self.assess_damage(request, codes)?;
        let predicted_response_time_hours = self.estimate_response_time(request, codes, predicted_damage_index)?;

        Ok(CascadeResult {
            is_major,
            major_probability,
            predicted_damage_index,
            predicted_response_time_hours,
        })
    }

    /// Stage A
    fn classify(&self, request: &ScenarioRequest, codes: CategoryCodes) -> Result<(bool, f64), ModelError> {
        let scaled = self.scalers.transform(&disaster_vector(request, codes))?;
        let is_major = self.classifier.predict(scaled.view())?;
        let probability = finite(Stage::Disaster, self.classifier.predict_probability(scaled.view())?)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::ProbabilityOutOfRange(probability));
        }
        tracing::debug!("Stage A: is_major={} probability={:.4}", is_major, probability);
        Ok((is_major, probability))
    }

    /// Stage B
    fn assess_damage(&self, request: &ScenarioRequest, codes: CategoryCodes) -> Result<f64, ModelError> {
        let scaled = self.scalers.transform(&damage_vector(request, codes))?;
        let damage = finite(Stage::Damage, self.damage.predict(scaled.view())?)?;
        tracing::debug!("Stage B: damage_index={:.4}", damage);
        Ok(damage)
    }

    /// Stage C, fed by stage B
    fn estimate_response_time(
        &self,
        request: &ScenarioRequest,
        codes: CategoryCodes,
        damage: f64,
    ) -> Result<f64, ModelError> {
        let scaled = self.scalers.transform(&response_vector(request, codes, damage))?;
        let hours = finite(Stage::Response, self.response.predict(scaled.view())?)?;
        tracing::debug!("Stage C: response_time={:.2}h", hours);
        Ok(hours)
    }
}

fn finite(stage: Stage, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite(stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{LinearModel, LogisticModel, StandardScaler};
    use crate::models::scenario::Calendar;
    use ndarray::ArrayView1;

    fn request() -> ScenarioRequest {
        ScenarioRequest {
            disaster_type: "Flood".to_string(),
            location: "India".to_string(),
            latitude: 20.0,
            longitude: 78.0,
            severity_level: 5,
            affected_population: 1000,
            economic_loss: 2.0e6,
            calendar: Calendar { month: 8, quarter: 3, day_of_year: 220, week: 3 },
            parameters_estimated: false,
        }
    }

    const CODES: CategoryCodes = CategoryCodes { disaster: 2, location: 5 };

    fn identity_scalers() -> ScalerBank {
        ScalerBank::new()
            .with(Stage::Disaster, StandardScaler::identity(Stage::Disaster.width()))
            .with(Stage::Damage, StandardScaler::identity(Stage::Damage.width()))
            .with(Stage::Response, StandardScaler::identity(Stage::Response.width()))
    }

    fn one_hot(width: usize, index: usize, weight: f64) -> Vec<f64> {
        let mut coefficients = vec![0.0; width];
        coefficients[index] = weight;
        coefficients
    }

    /// Damage = severity / 10; response = 10 × damage slot
    fn predictor() -> CascadedPredictor {
        CascadedPredictor::new(
            identity_scalers(),
            Box::new(LogisticModel::new(one_hot(10, 4, 1.0), -5.0)),
            Box::new(LinearModel::new(one_hot(9, 4, 0.1), 0.0)),
            Box::new(LinearModel::new(one_hot(8, 6, 10.0), 0.0)),
        )
    }

    struct Failing;

    impl Classifier for Failing {
        fn predict(&self, _: ArrayView1<f64>) -> Result<bool, ModelError> {
            Err(ModelError::ShapeMismatch { component: "test".to_string(), expected: 1, actual: 0 })
        }
        fn predict_probability(&self, _: ArrayView1<f64>) -> Result<f64, ModelError> {
            Err(ModelError::ShapeMismatch { component: "test".to_string(), expected: 1, actual: 0 })
        }
    }

    /// Reports a fixed probability regardless of input
    struct FixedProbability(f64);

    impl Classifier for FixedProbability {
        fn predict(&self, _: ArrayView1<f64>) -> Result<bool, ModelError> {
            Ok(self.0 > 0.5)
        }
        fn predict_probability(&self, _: ArrayView1<f64>) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _: ArrayView1<f64>) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_response_stage_consumes_damage_output() {
        let result = predictor().run(&request(), CODES).unwrap();
        assert!((result.predicted_damage_index - 0.5).abs() < 1e-12);
        assert!((result.predicted_response_time_hours - 5.0).abs() < 1e-12);
        // sigmoid(5 - 5) = 0.5, not strictly above threshold
        assert_eq!(result.major_probability, 0.5);
        assert!(!result.is_major);
    }

    #[test]
    fn test_classifier_failure_aborts() {
        let cascade = CascadedPredictor::new(
            identity_scalers(),
            Box::new(Failing),
            Box::new(Constant(0.3)),
            Box::new(Constant(12.0)),
        );
        assert!(cascade.run(&request(), CODES).is_err());
    }

    #[test]
    fn test_shape_mismatch_aborts() {
        let scalers = identity_scalers()
            .with(Stage::Response, StandardScaler::identity(7));
        let cascade = CascadedPredictor::new(
            scalers,
            Box::new(LogisticModel::new(vec![0.0; 10], 0.0)),
            Box::new(Constant(0.3)),
            Box::new(Constant(12.0)),
        );
        match cascade.run(&request(), CODES) {
            Err(ModelError::ShapeMismatch { component, .. }) => assert_eq!(component, "response scaler"),
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_output_aborts() {
        let cascade = CascadedPredictor::new(
            identity_scalers(),
            Box::new(LogisticModel::new(vec![0.0; 10], 0.0)),
            Box::new(Constant(f64::NAN)),
            Box::new(Constant(12.0)),
        );
        assert_eq!(cascade.run(&request(), CODES), Err(ModelError::NonFinite(Stage::Damage)));
    }

    #[test]
    fn test_outputs_not_clamped() {
        let cascade = CascadedPredictor::new(
            identity_scalers(),
            Box::new(LogisticModel::new(vec![0.0; 10], 0.0)),
            Box::new(Constant(1.4)),
            Box::new(Constant(-2.0)),
        );
        let result = cascade.run(&request(), CODES).unwrap();
        assert_eq!(result.predicted_damage_index, 1.4);
        assert_eq!(result.predicted_response_time_hours, -2.0);
    }

    #[test]
    fn test_probability_outside_unit_interval_aborts() {
        for p in [1.3, -0.01] {
            let cascade = CascadedPredictor::new(
                identity_scalers(),
                Box::new(FixedProbability(p)),
                Box::new(Constant(0.3)),
                Box::new(Constant(12.0)),
            );
            assert_eq!(cascade.run(&request(), CODES), Err(ModelError::ProbabilityOutOfRange(p)));
        }
    }

    #[test]
    fn test_probability_bounds_accepted() {
        for p in [0.0, 1.0] {
            let cascade = CascadedPredictor::new(
                identity_scalers(),
                Box::new(FixedProbability(p)),
                Box::new(Constant(0.3)),
                Box::new(Constant(12.0)),
            );
            assert_eq!(cascade.run(&request(), CODES).unwrap().major_probability, p);
        }
    }
}
