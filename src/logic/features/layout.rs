//! Feature Layouts - Centralized Column Definitions
//!
//! **These lists are the contract with the fitted models.**
//!
//! Every predictor and scaler was fitted on columns in exactly this order.
//! Reordering a layout does not raise an error anywhere; it silently corrupts
//! predictions. Change a layout only together with the model bundle.

use serde::Serialize;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Damage index placed in the classification vector.
///
/// The real damage index is produced by the damage stage, which runs after the
/// classifier's inputs are built. The classifier was fitted with this neutral
/// prior in the slot so it never depends on the damage model.
pub const DAMAGE_INDEX_PRIOR: f64 = 0.5;

// ============================================================================
// STAGE LAYOUTS (Authoritative source)
// ============================================================================

/// Stage A: major-disaster classification
pub const DISASTER_LAYOUT: &[&str] = &[
    "disaster_encoded",      // 0
    "location_encoded",      // 1
    "latitude",              // 2
    "longitude",             // 3
    "severity_level",        // 4
    "affected_population",   // 5
    "damage_index_prior",    // 6: always DAMAGE_INDEX_PRIOR
    "month",                 // 7
    "quarter",               // 8
    "day_of_year",           // 9
];

/// Stage B: damage index regression
pub const DAMAGE_LAYOUT: &[&str] = &[
    "disaster_encoded",      // 0
    "location_encoded",      // 1
    "latitude",              // 2
    "longitude",             // 3
    "severity_level",        // 4
    "affected_population",   // 5
    "economic_loss",         // 6
    "month",                 // 7
    "quarter",               // 8
];

/// Stage C: response time regression (consumes stage B output)
pub const RESPONSE_LAYOUT: &[&str] = &[
    "disaster_encoded",      // 0
    "location_encoded",      // 1
    "latitude",              // 2
    "longitude",             // 3
    "severity_level",        // 4
    "affected_population",   // 5
    "predicted_damage_index", // 6: stage B output
    "economic_loss",         // 7
];

/// Parameter estimation (severity, population, economic loss)
pub const PARAMETER_LAYOUT: &[&str] = &[
    "disaster_encoded",      // 0
    "location_encoded",      // 1
    "latitude",              // 2
    "longitude",             // 3
    "month",                 // 4
    "week",                  // 5
    "quarter",               // 6
    "is_summer",             // 7
    "is_winter",             // 8
];

// ============================================================================
// STAGE IDENTITY
// ============================================================================

/// Identity of a feature vector, selects layout and scaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Disaster,
    Damage,
    Response,
    Parameters,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Disaster => "disaster",
            Stage::Damage => "damage",
            Stage::Response => "response",
            Stage::Parameters => "parameters",
        }
    }

    pub fn layout(&self) -> &'static [&'static str] {
        match self {
            Stage::Disaster => DISASTER_LAYOUT,
            Stage::Damage => DAMAGE_LAYOUT,
            Stage::Response => RESPONSE_LAYOUT,
            Stage::Parameters => PARAMETER_LAYOUT,
        }
    }

    pub fn width(&self) -> usize {
        self.layout().len()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Column names recorded with a model do not match the compiled layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub stage: Stage,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} feature layout mismatch: expected {:?}, got {:?}",
            self.stage, self.expected, self.actual
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Check column names recorded at training time against a stage layout
pub fn validate_layout(stage: Stage, columns: &[String]) -> Result<(), LayoutMismatchError> {
    let layout = stage.layout();
    if columns.len() == layout.len() && columns.iter().zip(layout).all(|(a, b)| a == b) {
        return Ok(());
    }
    Err(LayoutMismatchError {
        stage,
        expected: layout.iter().map(|s| s.to_string()).collect(),
        actual: columns.to_vec(),
    })
}

/// Get feature index by name within a stage
pub fn feature_index(stage: Stage, name: &str) -> Option<usize> {
    stage.layout().iter().position(|&n| n == name)
}
