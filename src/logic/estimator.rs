//! Parameter Estimator
//!
//! Infers severity, affected population and economic loss when the caller
//! leaves them out, from the disaster type, location, coordinates and calendar.

use crate::logic::encoding::CategoryCodes;
use crate::logic::features::{parameter_vector, Stage};
use crate::logic::model::{ModelError, Regressor, StandardScaler};
use crate::models::scenario::{Calendar, ImpactParameters};

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 10;

pub struct ParameterEstimator {
    scaler: StandardScaler,
    severity: Box<dyn Regressor>,
    population: Box<dyn Regressor>,
    economic_loss: Box<dyn Regressor>,
}

impl ParameterEstimator {
    pub fn new(
        scaler: StandardScaler,
        severity: Box<dyn Regressor>,
        population: Box<dyn Regressor>,
        economic_loss: Box<dyn Regressor>,
    ) -> Self {
        Self { scaler, severity, population, economic_loss }
    }

    pub fn estimate(
        &self,
        codes: CategoryCodes,
        latitude: f64,
        longitude: f64,
        calendar: &Calendar,
    ) -> Result<ImpactParameters, ModelError> {
        let vector = parameter_vector(codes, latitude, longitude, calendar);
        let scaled = self.scaler.transform(&vector.values).map_err(|e| match e {
            ModelError::ShapeMismatch { expected, actual, .. } => ModelError::ShapeMismatch {
                component: format!("{} scaler", Stage::Parameters),
                expected,
                actual,
            },
            other => other,
        })?;

        let severity = self.severity.predict(scaled.view())?;
        let population = self.population.predict(scaled.view())?;
        let loss = self.economic_loss.predict(scaled.view())?;
        if !(severity.is_finite() && population.is_finite() && loss.is_finite()) {
            return Err(ModelError::NonFinite(Stage::Parameters));
        }

        let estimated = ImpactParameters {
            // truncation toward zero, then clamped into the severity scale
            severity_level: (severity.trunc().clamp(MIN_SEVERITY as f64, MAX_SEVERITY as f64)) as u8,
            affected_population: population.trunc().max(0.0) as u64,
            economic_loss: loss.max(0.0),
        };
        tracing::debug!(
            "Estimated parameters: severity={} population={} loss={:.0}",
            estimated.severity_level, estimated.affected_population, estimated.economic_loss
        );
        Ok(estimated)
    }
}
