//! Assessment response model

use serde::Serialize;

use crate::logic::decision::Priority;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResponse {
    pub success: bool,
    pub input: ScenarioEcho,
    pub predictions: PredictionSummary,
    pub emergency_response: EmergencyResponse,
}

/// The scenario as the pipeline saw it, after defaults and estimation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEcho {
    pub disaster_type: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity_level: u8,
    pub affected_population: u64,
    pub economic_loss: f64,
    pub month: u8,
    pub quarter: u8,
    pub day_of_year: u16,
    pub parameters_estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub is_major_disaster: bool,
    /// Percentage, 2 decimals
    pub major_probability: f64,
    /// 3 decimals
    pub predicted_damage_index: f64,
    /// 1 decimal
    pub predicted_response_time_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyResponse {
    pub priority: Priority,
    pub priority_level: u8,
    pub alert_level: &'static str,
    pub resources: ResourceSummary,
    pub evacuation: EvacuationSummary,
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub personnel: &'static str,
    pub medical_teams: &'static str,
    pub rescue_units: &'static str,
    pub temporary_shelters: u64,
    pub equipment: &'static str,
}

/// Counts are null (not zero) when evacuation is not recommended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvacuationSummary {
    pub recommended: bool,
    pub people_to_evacuate: Option<u64>,
    pub evacuation_centers: Option<u64>,
    pub vehicles_needed: Option<u64>,
}
