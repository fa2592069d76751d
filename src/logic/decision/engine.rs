//! Decision Rule Engine
//!
//! Input: CascadeResult + ScenarioRequest
//! Output: DecisionOutput
//!
//! Pure and deterministic. All thresholds come from `rules.rs`.

use super::rules::*;
use super::types::*;
use crate::logic::cascade::CascadeResult;
use crate::models::scenario::ScenarioRequest;

// ============================================================================
// MAIN DECISION FUNCTION
// ============================================================================

pub fn decide(cascade: &CascadeResult, request: &ScenarioRequest) -> DecisionOutput {
    let priority = priority_for(cascade.major_probability, request.severity_level);

    DecisionOutput {
        priority,
        priority_level: priority.level(),
        alert_level: priority.alert_label(),
        resources: resources_for(request.affected_population),
        shelter: shelter_for(cascade.predicted_damage_index, request.affected_population),
        evacuation: evacuation_for(
            cascade.major_probability,
            cascade.predicted_damage_index,
            request.affected_population,
        ),
        action_items: action_items(cascade.predicted_response_time_hours),
    }
}

// ============================================================================
// RULES
// ============================================================================

pub fn priority_for(probability: f64, severity: u8) -> Priority {
    PRIORITY_TIERS
        .iter()
        .find(|tier| tier.matches(probability, severity))
        .map(|tier| tier.priority)
        .unwrap_or(BASELINE_PRIORITY)
}

pub fn resources_for(population: u64) -> ResourcePlan {
    RESOURCE_BANDS
        .iter()
        .find(|band| population > band.population_above)
        .map(|band| band.plan)
        .unwrap_or(BASELINE_RESOURCES)
}

pub fn shelter_for(damage_index: f64, population: u64) -> ShelterPlan {
    let (percent, equipment) = SHELTER_TIERS
        .iter()
        .find(|tier| damage_index > tier.damage_above)
        .map(|tier| (tier.shelter_percent, tier.equipment))
        .unwrap_or((BASELINE_SHELTER_PERCENT, BASELINE_EQUIPMENT));

    ShelterPlan {
        temporary_shelters: share_rounded(population, percent),
        equipment,
    }
}

/// `None` means no evacuation recommended, which is distinct from zero people.
pub fn evacuation_for(probability: f64, damage_index: f64, population: u64) -> Option<EvacuationPlan> {
    if !(probability > EVACUATION_PROBABILITY_THRESHOLD || damage_index > EVACUATION_DAMAGE_THRESHOLD) {
        return None;
    }

    let people = share_floored(population, EVACUATION_PERCENT);
    Some(EvacuationPlan {
        people_to_evacuate: people,
        evacuation_centers: people / PEOPLE_PER_CENTER,
        vehicles_needed: people / PEOPLE_PER_VEHICLE,
    })
}

pub fn action_items(response_hours: f64) -> Vec<String> {
    let mut items = vec![
        format!("Activate Emergency Operations Center within {:.1} hours", response_hours / 2.0),
        format!("Deploy first responders within {:.1} hours", response_hours),
    ];
    items.extend(STANDING_ACTIONS.iter().map(|s| s.to_string()));
    items
}

// Integer percentages keep shares exact (no float drift at band edges).

fn share_floored(population: u64, percent: u64) -> u64 {
    (population as u128 * percent as u128 / 100) as u64
}

/// Rounds half up
fn share_rounded(population: u64, percent: u64) -> u64 {
    ((population as u128 * percent as u128 + 50) / 100) as u64
}

// ============================================================================
// TESTS
// ============================================================================
