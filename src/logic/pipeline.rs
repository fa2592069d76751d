//! Response Pipeline
//!
//! Built once from a model bundle and shared read-only (behind `Arc`) by every
//! request. A run holds no state between calls, so identical input and
//! parameters always give identical output.

use chrono::NaiveDate;
use thiserror::Error;

use crate::logic::cascade::{CascadeResult, CascadedPredictor};
use crate::logic::decision::{decide, DecisionOutput};
use crate::logic::encoding::{CategoryCodes, CategoryEncoder, LabelCodec};
use crate::logic::estimator::ParameterEstimator;
use crate::logic::features::Stage;
use crate::logic::model::{BundleError, ModelBundle, ModelError, ModelMetadata, ScalerBank, StandardScaler};
use crate::logic::model::bundle::ScalerParams;
use crate::logic::response::assemble;
use crate::models::assessment::AssessmentResponse;
use crate::models::scenario::{RawScenario, ScenarioInput, ScenarioRequest};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected before any model runs
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub struct ResponsePipeline {
    encoder: CategoryEncoder,
    cascade: CascadedPredictor,
    estimator: Option<ParameterEstimator>,
    metadata: ModelMetadata,
}

impl ResponsePipeline {
    pub fn new(
        encoder: CategoryEncoder,
        cascade: CascadedPredictor,
        estimator: Option<ParameterEstimator>,
        metadata: ModelMetadata,
    ) -> Self {
        Self { encoder, cascade, estimator, metadata }
    }

    pub fn from_bundle(bundle: ModelBundle) -> Result<Self, BundleError> {
        bundle.validate()?;

        let encoder = CategoryEncoder::new(
            Box::new(LabelCodec::new(bundle.encoders.disaster_type)),
            Box::new(LabelCodec::new(bundle.encoders.location)),
        );

        let scalers = ScalerBank::new()
            .with(Stage::Disaster, scaler(Stage::Disaster, bundle.scalers.disaster)?)
            .with(Stage::Damage, scaler(Stage::Damage, bundle.scalers.damage)?)
            .with(Stage::Response, scaler(Stage::Response, bundle.scalers.response)?);

        let cascade = CascadedPredictor::new(
            scalers,
            Box::new(bundle.models.disaster_classifier),
            Box::new(bundle.models.damage_regressor),
            Box::new(bundle.models.response_regressor),
        );

        let estimator = match bundle.parameter_models {
            Some(params) => Some(ParameterEstimator::new(
                scaler(Stage::Parameters, params.scaler)?,
                Box::new(params.severity),
                Box::new(params.population),
                Box::new(params.economic_loss),
            )),
            None => None,
        };

        Ok(Self::new(encoder, cascade, estimator, bundle.metadata))
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn can_estimate_parameters(&self) -> bool {
        self.estimator.is_some()
    }

    pub fn disaster_types(&self) -> &[String] {
        self.encoder.disaster_types()
    }

    pub fn locations(&self) -> &[String] {
        self.encoder.locations()
    }

    /// Full run: parse, resolve, predict, decide, assemble
    pub fn assess(&self, raw: &RawScenario, today: NaiveDate) -> Result<AssessmentResponse, PipelineError> {
        let input = ScenarioInput::parse(raw, today)?;
        let codes = self.encoder.encode(&input.disaster_type, &input.location);
        let request = self.resolve(input, codes)?;

        let (cascade, decision) = self.evaluate_encoded(&request, codes)?;

        tracing::info!(
            "Assessment: {} in {} -> {} (p={:.2}, damage={:.3}, response={:.1}h, evacuate={})",
            request.disaster_type,
            request.location,
            decision.priority,
            cascade.major_probability,
            cascade.predicted_damage_index,
            cascade.predicted_response_time_hours,
            decision.evacuation.is_some(),
        );

        Ok(assemble(&request, &cascade, decision))
    }

    /// Cascade + rule engine for a resolved request
    #[cfg(test)]
    fn evaluate(&self, request: &ScenarioRequest) -> Result<(CascadeResult, DecisionOutput), PipelineError> {
        let codes = self.encoder.encode(&request.disaster_type, &request.location);
        self.evaluate_encoded(request, codes)
    }

    fn evaluate_encoded(
        &self,
        request: &ScenarioRequest,
        codes: CategoryCodes,
    ) -> Result<(CascadeResult, DecisionOutput), PipelineError> {
        let cascade = self.cascade.run(request, codes)?;
        let decision = decide(&cascade, request);
        Ok((cascade, decision))
    }

    /// Fill missing impact parameters from the estimator when available
    fn resolve(&self, input: ScenarioInput, codes: CategoryCodes) -> Result<ScenarioRequest, PipelineError> {
        if input.is_complete() {
            return input.complete(None);
        }
        let estimated = match &self.estimator {
            Some(estimator) => Some(estimator.estimate(codes, input.latitude, input.longitude, &input.calendar)?),
            None => None,
        };
        input.complete(estimated)
    }
}

fn scaler(stage: Stage, params: ScalerParams) -> Result<StandardScaler, BundleError> {
    StandardScaler::new(params.mean, params.scale)
        .map_err(|e| BundleError::Invalid(format!("{} scaler: {}", stage, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::decision::Priority;
    use crate::logic::model::bundle::sample_bundle;
    use crate::models::scenario::Calendar;
    use serde_json::json;

    fn pipeline() -> ResponsePipeline {
        ResponsePipeline::from_bundle(sample_bundle()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 9).unwrap()
    }

    fn raw(value: serde_json::Value) -> RawScenario {
        serde_json::from_value(value).unwrap()
    }

    fn tokyo_quake() -> serde_json::Value {
        json!({
            "disaster_type": "Earthquake",
            "location": "Japan",
            "latitude": 35.6762,
            "longitude": 139.6503,
            "severity_level": 9,
            "affected_population": 50000,
            "economic_loss": 1.0e9,
            "month": 7
        })
    }

    #[test]
    fn test_earthquake_in_japan() {
        let out = pipeline().assess(&raw(tokyo_quake()), today()).unwrap();
        let response = &out.emergency_response;

        assert_eq!(response.priority, Priority::Critical);
        assert_eq!(response.priority_level, 5);
        assert_eq!(response.resources.personnel, "500+ emergency responders");

        let shelters = response.resources.temporary_shelters;
        assert!(shelters <= 50_000);
        let damage = out.predictions.predicted_damage_index;
        let expected = if damage > 0.7 { 30_000 } else if damage > 0.4 { 20_000 } else { 10_000 };
        assert_eq!(shelters, expected);

        assert_eq!(out.input.quarter, 3);
        assert!(!out.input.parameters_estimated);
    }

    #[test]
    fn test_sample_bundle_cascade_values() {
        let p = pipeline();
        let request = ScenarioInput::parse(&raw(tokyo_quake()), today()).unwrap().complete(None).unwrap();
        let (cascade, decision) = p.evaluate(&request).unwrap();

        assert!(cascade.is_major);
        assert!(cascade.major_probability > 0.9);
        assert!(cascade.predicted_damage_index > 0.7);
        assert!(cascade.predicted_response_time_hours > 0.0);

        let evacuation = decision.evacuation.unwrap();
        assert_eq!(evacuation.people_to_evacuate, 35_000);
        assert_eq!(evacuation.evacuation_centers, 70);
        assert_eq!(evacuation.vehicles_needed, 700);
    }

    #[test]
    fn test_unknown_categories_still_predict() {
        let mut payload = tokyo_quake();
        payload["disaster_type"] = json!("Meteor Strike");
        payload["location"] = json!("Atlantis");
        let out = pipeline().assess(&raw(payload), today()).unwrap();
        assert!(out.success);
        assert_eq!(out.input.disaster_type, "Meteor Strike");
    }

    #[test]
    fn test_unknown_category_uses_code_zero() {
        let p = pipeline();
        let mut request = ScenarioInput::parse(&raw(tokyo_quake()), today()).unwrap().complete(None).unwrap();
        request.disaster_type = "Meteor Strike".to_string();
        let unknown = p.evaluate(&request).unwrap();

        // code 0 in the sample vocabulary is "Drought"
        request.disaster_type = "Drought".to_string();
        let drought = p.evaluate(&request).unwrap();
        assert_eq!(unknown, drought);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let p = pipeline();
        let payload = raw(tokyo_quake());
        let first = serde_json::to_string(&p.assess(&payload, today()).unwrap()).unwrap();
        for _ in 0..5 {
            let again = serde_json::to_string(&p.assess(&payload, today()).unwrap()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_invalid_input_rejected_before_models() {
        let mut payload = tokyo_quake();
        payload["longitude"] = json!("east");
        match pipeline().assess(&raw(payload), today()) {
            Err(PipelineError::InvalidInput(msg)) => assert!(msg.contains("longitude")),
            other => panic!("expected invalid input, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_parameters_estimated() {
        let out = pipeline()
            .assess(&raw(json!({
                "disaster_type": "Earthquake",
                "location": "Japan",
                "latitude": 35.6762,
                "longitude": 139.6503,
                "month": 7,
                "week": 2
            })), today())
            .unwrap();

        assert!(out.input.parameters_estimated);
        assert!((1..=10).contains(&out.input.severity_level));
        assert!(out.input.economic_loss >= 0.0);
    }

    #[test]
    fn test_missing_parameters_without_estimator() {
        let mut bundle = sample_bundle();
        bundle.parameter_models = None;
        let p = ResponsePipeline::from_bundle(bundle).unwrap();
        assert!(!p.can_estimate_parameters());

        let mut payload = tokyo_quake();
        payload.as_object_mut().unwrap().remove("severity_level");
        let err = p.assess(&raw(payload), today()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(err.to_string().contains("severity_level"));
    }

    #[test]
    fn test_bundle_arity_checked_at_construction() {
        let mut bundle = sample_bundle();
        bundle.scalers.response.mean.pop();
        bundle.scalers.response.scale.pop();
        assert!(matches!(ResponsePipeline::from_bundle(bundle), Err(BundleError::Invalid(_))));
    }

    #[test]
    fn test_low_risk_scenario() {
        let p = pipeline();
        let request = ScenarioRequest {
            disaster_type: "Flood".to_string(),
            location: "India".to_string(),
            latitude: 20.0,
            longitude: 78.0,
            severity_level: 2,
            affected_population: 100,
            economic_loss: 0.0,
            calendar: Calendar { month: 1, quarter: 1, day_of_year: 5, week: 1 },
            parameters_estimated: false,
        };
        let (cascade, decision) = p.evaluate(&request).unwrap();
        assert!(cascade.major_probability < 0.3);
        assert_eq!(decision.priority, Priority::Low);
        assert!(decision.evacuation.is_none());
    }

    #[test]
    fn test_catalog_lists_vocabulary() {
        let p = pipeline();
        assert_eq!(p.disaster_types().len(), 8);
        assert_eq!(p.locations().len(), 12);
        assert_eq!(p.disaster_types()[0], "Drought");
    }
}
