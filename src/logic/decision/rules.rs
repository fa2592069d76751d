//! Decision Rules & Thresholds
//!
//! Ordered tables evaluated top-down, first match wins. Constants and table
//! rows only; the evaluation lives in `engine.rs`.

use super::types::{Priority, ResourcePlan};

// ============================================================================
// PRIORITY TIERS
// ============================================================================

/// Tier applies when probability is above `probability_above` OR severity is
/// at least `severity_at_least`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityTier {
    pub probability_above: f64,
    pub severity_at_least: u8,
    pub priority: Priority,
}

impl PriorityTier {
    pub fn matches(&self, probability: f64, severity: u8) -> bool {
        probability > self.probability_above || severity >= self.severity_at_least
    }
}

pub const PRIORITY_TIERS: &[PriorityTier] = &[
    PriorityTier { probability_above: 0.70, severity_at_least: 8, priority: Priority::Critical },
    PriorityTier { probability_above: 0.50, severity_at_least: 6, priority: Priority::High },
    PriorityTier { probability_above: 0.30, severity_at_least: 4, priority: Priority::Medium },
];

/// When no tier matches
pub const BASELINE_PRIORITY: Priority = Priority::Low;

// ============================================================================
// RESOURCE BANDS (by affected population)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceBand {
    /// Strictly greater than
    pub population_above: u64,
    pub plan: ResourcePlan,
}

pub const RESOURCE_BANDS: &[ResourceBand] = &[
    ResourceBand {
        population_above: 40_000,
        plan: ResourcePlan {
            personnel: "500+ emergency responders",
            medical_teams: "20+ teams",
            rescue_units: "30+ units",
        },
    },
    ResourceBand {
        population_above: 20_000,
        plan: ResourcePlan {
            personnel: "200-500 emergency responders",
            medical_teams: "10-20 teams",
            rescue_units: "15-30 units",
        },
    },
];

pub const BASELINE_RESOURCES: ResourcePlan = ResourcePlan {
    personnel: "100-200 emergency responders",
    medical_teams: "5-10 teams",
    rescue_units: "10-15 units",
};

// ============================================================================
// SHELTER TIERS (by predicted damage index)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelterTier {
    /// Strictly greater than
    pub damage_above: f64,
    /// Share of the affected population needing shelter, in percent
    pub shelter_percent: u64,
    pub equipment: &'static str,
}

pub const SHELTER_TIERS: &[ShelterTier] = &[
    ShelterTier {
        damage_above: 0.7,
        shelter_percent: 60,
        equipment: "Heavy equipment: Bulldozers, cranes, excavators (HIGH PRIORITY)",
    },
    ShelterTier {
        damage_above: 0.4,
        shelter_percent: 40,
        equipment: "Heavy equipment: Moderate deployment required",
    },
];

pub const BASELINE_SHELTER_PERCENT: u64 = 20;
pub const BASELINE_EQUIPMENT: &str = "Heavy equipment: Standard deployment";

// ============================================================================
// EVACUATION
// ============================================================================

/// Evacuate when major-disaster probability is above this...
pub const EVACUATION_PROBABILITY_THRESHOLD: f64 = 0.6;
/// ...or when the damage index is above this
pub const EVACUATION_DAMAGE_THRESHOLD: f64 = 0.6;

/// Share of the affected population to evacuate, in percent (floored)
pub const EVACUATION_PERCENT: u64 = 70;
pub const PEOPLE_PER_CENTER: u64 = 500;
pub const PEOPLE_PER_VEHICLE: u64 = 50;

// ============================================================================
// ACTION ITEMS
// ============================================================================

pub const STANDING_ACTIONS: &[&str] = &[
    "Establish communication networks and evacuation routes",
    "Coordinate with local hospitals and emergency services",
    "Set up relief distribution centers",
];
