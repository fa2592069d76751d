//! Response Assembler
//!
//! Merges the scenario echo, rounded cascade outputs and the decision into the
//! transport shape. No further computation.

use crate::logic::cascade::CascadeResult;
use crate::logic::decision::DecisionOutput;
use crate::models::assessment::{
    AssessmentResponse, EmergencyResponse, EvacuationSummary, PredictionSummary,
    ResourceSummary, ScenarioEcho,
};
use crate::models::scenario::ScenarioRequest;

pub fn assemble(
    request: &ScenarioRequest,
    cascade: &CascadeResult,
    decision: DecisionOutput,
) -> AssessmentResponse {
    let evacuation = decision.evacuation;

    AssessmentResponse {
        success: true,
        input: ScenarioEcho {
            disaster_type: request.disaster_type.clone(),
            location: request.location.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            severity_level: request.severity_level,
            affected_population: request.affected_population,
            economic_loss: request.economic_loss,
            month: request.calendar.month,
            quarter: request.calendar.quarter,
            day_of_year: request.calendar.day_of_year,
            parameters_estimated: request.parameters_estimated,
        },
        predictions: PredictionSummary {
            is_major_disaster: cascade.is_major,
            major_probability: round_to(cascade.major_probability * 100.0, 2),
            predicted_damage_index: round_to(cascade.predicted_damage_index, 3),
            predicted_response_time_hours: round_to(cascade.predicted_response_time_hours, 1),
        },
        emergency_response: EmergencyResponse {
            priority: decision.priority,
            priority_level: decision.priority_level,
            alert_level: decision.alert_level,
            resources: ResourceSummary {
                personnel: decision.resources.personnel,
                medical_teams: decision.resources.medical_teams,
                rescue_units: decision.resources.rescue_units,
                temporary_shelters: decision.shelter.temporary_shelters,
                equipment: decision.shelter.equipment,
            },
            evacuation: EvacuationSummary {
                recommended: evacuation.is_some(),
                people_to_evacuate: evacuation.map(|e| e.people_to_evacuate),
                evacuation_centers: evacuation.map(|e| e.evacuation_centers),
                vehicles_needed: evacuation.map(|e| e.vehicles_needed),
            },
            action_items: decision.action_items,
        },
    }
}

/// Round to a number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::decision::decide;
    use crate::models::scenario::Calendar;
    use serde_json::json;

    fn request() -> ScenarioRequest {
        ScenarioRequest {
            disaster_type: "Flood".to_string(),
            location: "Bangladesh".to_string(),
            latitude: 23.7,
            longitude: 90.4,
            severity_level: 3,
            affected_population: 12_000,
            economic_loss: 3.5e6,
            calendar: Calendar { month: 8, quarter: 3, day_of_year: 225, week: 1 },
            parameters_estimated: false,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(95.51234, 2), 95.51);
        assert_eq!(round_to(0.83844, 3), 0.838);
        assert_eq!(round_to(21.97, 1), 22.0);
        assert_eq!(round_to(-2.04, 1), -2.0);
    }

    #[test]
    fn test_rounding_and_echo() {
        let cascade = CascadeResult {
            is_major: false,
            major_probability: 0.123456,
            predicted_damage_index: 0.35791,
            predicted_response_time_hours: 8.04,
        };
        let req = request();
        let out = assemble(&req, &cascade, decide(&cascade, &req));

        assert!(out.success);
        assert_eq!(out.predictions.major_probability, 12.35);
        assert_eq!(out.predictions.predicted_damage_index, 0.358);
        assert_eq!(out.predictions.predicted_response_time_hours, 8.0);
        assert_eq!(out.input.location, "Bangladesh");
        assert_eq!(out.input.quarter, 3);
    }

    #[test]
    fn test_no_evacuation_serializes_as_null() {
        let cascade = CascadeResult {
            is_major: false,
            major_probability: 0.2,
            predicted_damage_index: 0.1,
            predicted_response_time_hours: 6.0,
        };
        let req = request();
        let value = serde_json::to_value(assemble(&req, &cascade, decide(&cascade, &req))).unwrap();

        assert_eq!(
            value["emergency_response"]["evacuation"],
            json!({
                "recommended": false,
                "people_to_evacuate": null,
                "evacuation_centers": null,
                "vehicles_needed": null
            })
        );
        assert_eq!(value["emergency_response"]["priority"], "LOW");
        assert_eq!(value["emergency_response"]["resources"]["temporary_shelters"], 2400);
    }
}
