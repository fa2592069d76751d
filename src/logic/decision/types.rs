//! Decision Types
//!
//! Data structures only, no logic.

use serde::Serialize;

// ============================================================================
// PRIORITY
// ============================================================================

/// Priority tier of the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }

    /// Numeric level, 2 (LOW) to 5 (CRITICAL)
    pub fn level(&self) -> u8 {
        match self {
            Priority::Low => 2,
            Priority::Medium => 3,
            Priority::High => 4,
            Priority::Critical => 5,
        }
    }

    pub fn alert_label(&self) -> &'static str {
        match self {
            Priority::Low => "LEVEL 2 - LOW ALERT",
            Priority::Medium => "LEVEL 3 - MODERATE ALERT",
            Priority::High => "LEVEL 4 - HIGH ALERT",
            Priority::Critical => "LEVEL 5 - MAXIMUM ALERT",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PLANS
// ============================================================================

/// Staffing bands, always ranges rather than exact counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourcePlan {
    pub personnel: &'static str,
    pub medical_teams: &'static str,
    pub rescue_units: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShelterPlan {
    pub temporary_shelters: u64,
    pub equipment: &'static str,
}

/// Present only when evacuation is recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvacuationPlan {
    pub people_to_evacuate: u64,
    pub evacuation_centers: u64,
    pub vehicles_needed: u64,
}

// ============================================================================
// DECISION OUTPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutput {
    pub priority: Priority,
    pub priority_level: u8,
    pub alert_level: &'static str,
    pub resources: ResourcePlan,
    pub shelter: ShelterPlan,
    pub evacuation: Option<EvacuationPlan>,
    pub action_items: Vec<String>,
}
