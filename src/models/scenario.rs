//! Scenario request model
//!
//! `RawScenario` is the payload as received. Numeric fields may arrive as JSON
//! numbers or as numeric strings, so they are parsed explicitly into
//! `ScenarioInput` and validated before any model runs. `ScenarioRequest` is
//! the fully resolved scenario the pipeline consumes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::logic::pipeline::PipelineError;

// ============================================================================
// RAW PAYLOAD
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScenario {
    pub disaster_type: Option<Value>,
    pub location: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub severity_level: Option<Value>,
    pub affected_population: Option<Value>,
    pub economic_loss: Option<Value>,
    pub month: Option<Value>,
    pub quarter: Option<Value>,
    pub day_of_year: Option<Value>,
    pub week: Option<Value>,
}

// ============================================================================
// CALENDAR FEATURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Validate)]
pub struct Calendar {
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub month: u8,
    #[validate(range(min = 1, max = 4, message = "must be between 1 and 4"))]
    pub quarter: u8,
    #[validate(range(min = 1, max = 366, message = "must be between 1 and 366"))]
    pub day_of_year: u16,
    #[validate(range(min = 1, max = 4, message = "must be between 1 and 4"))]
    pub week: u8,
}

impl Calendar {
    /// Calendar features of a date
    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month() as u8;
        Self {
            month,
            quarter: quarter_of(month),
            day_of_year: date.ordinal() as u16,
            week: week_of(date),
        }
    }

    /// Resolve caller overrides against `today`.
    ///
    /// A missing quarter is derived from the effective month, not from today.
    pub fn resolve(
        month: Option<u8>,
        quarter: Option<u8>,
        day_of_year: Option<u16>,
        week: Option<u8>,
        today: NaiveDate,
    ) -> Self {
        let current = Self::from_date(today);
        let month = month.unwrap_or(current.month);
        Self {
            month,
            quarter: quarter.unwrap_or_else(|| quarter_of(month)),
            day_of_year: day_of_year.unwrap_or(current.day_of_year),
            week: week.unwrap_or(current.week),
        }
    }

    pub fn is_summer(&self) -> bool {
        matches!(self.month, 6..=8)
    }

    pub fn is_winter(&self) -> bool {
        matches!(self.month, 12 | 1 | 2)
    }
}

/// quarter = ((month - 1) div 3) + 1
pub fn quarter_of(month: u8) -> u8 {
    month.saturating_sub(1) / 3 + 1
}

/// Four-week cycle position (1-4) derived from the ISO week number
pub fn week_of(date: NaiveDate) -> u8 {
    (date.iso_week().week() % 4 + 1) as u8
}

// ============================================================================
// PARSED INPUT
// ============================================================================

/// Parsed and validated scenario; the three impact parameters may still be
/// missing and left to the parameter estimator.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ScenarioInput {
    pub disaster_type: String,
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
    #[validate(range(min = 1, max = 10, message = "must be between 1 and 10"))]
    pub severity_level: Option<i64>,
    #[validate(range(min = 0, message = "must be non-negative"))]
    pub affected_population: Option<i64>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub economic_loss: Option<f64>,
    #[validate(nested)]
    pub calendar: Calendar,
}

impl ScenarioInput {
    /// Parse a raw payload, defaulting calendar fields to `today`
    pub fn parse(raw: &RawScenario, today: NaiveDate) -> Result<Self, PipelineError> {
        let input = Self {
            disaster_type: required(&raw.disaster_type, "disaster_type", parse_label)?,
            location: required(&raw.location, "location", parse_label)?,
            latitude: required(&raw.latitude, "latitude", parse_float)?,
            longitude: required(&raw.longitude, "longitude", parse_float)?,
            severity_level: optional(&raw.severity_level, "severity_level", parse_int)?,
            affected_population: optional(&raw.affected_population, "affected_population", parse_int)?,
            economic_loss: optional(&raw.economic_loss, "economic_loss", parse_float)?,
            calendar: Calendar::resolve(
                optional(&raw.month, "month", parse_small)?,
                optional(&raw.quarter, "quarter", parse_small)?,
                optional(&raw.day_of_year, "day_of_year", parse_small)?,
                optional(&raw.week, "week", parse_small)?,
                today,
            ),
        };

        input.validate()
            .map_err(|e| PipelineError::InvalidInput(e.to_string()))?;

        Ok(input)
    }

    /// True when every impact parameter was supplied by the caller
    pub fn is_complete(&self) -> bool {
        self.severity_level.is_some()
            && self.affected_population.is_some()
            && self.economic_loss.is_some()
    }

    /// Resolve into a full request. Caller-supplied values win over `estimated`.
    pub fn complete(self, estimated: Option<ImpactParameters>) -> Result<ScenarioRequest, PipelineError> {
        let parameters_estimated = estimated.is_some() && !self.is_complete();
        let missing = |field: &str| PipelineError::InvalidInput(format!("missing required field: {}", field));

        let severity_level = match (self.severity_level, estimated) {
            (Some(v), _) => v as u8,
            (None, Some(e)) => e.severity_level,
            (None, None) => return Err(missing("severity_level")),
        };
        let affected_population = match (self.affected_population, estimated) {
            (Some(v), _) => v as u64,
            (None, Some(e)) => e.affected_population,
            (None, None) => return Err(missing("affected_population")),
        };
        let economic_loss = match (self.economic_loss, estimated) {
            (Some(v), _) => v,
            (None, Some(e)) => e.economic_loss,
            (None, None) => return Err(missing("economic_loss")),
        };

        Ok(ScenarioRequest {
            disaster_type: self.disaster_type,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            severity_level,
            affected_population,
            economic_loss,
            calendar: self.calendar,
            parameters_estimated,
        })
    }
}

/// Impact parameters inferred by the parameter estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactParameters {
    pub severity_level: u8,
    pub affected_population: u64,
    pub economic_loss: f64,
}

// ============================================================================
// RESOLVED REQUEST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRequest {
    pub disaster_type: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity_level: u8,
    pub affected_population: u64,
    pub economic_loss: f64,
    pub calendar: Calendar,
    pub parameters_estimated: bool,
}

// ============================================================================
// FIELD PARSERS
// ============================================================================

fn required<T>(
    value: &Option<Value>,
    field: &str,
    parse: fn(&Value, &str) -> Result<T, PipelineError>,
) -> Result<T, PipelineError> {
    match value {
        None | Some(Value::Null) => Err(PipelineError::InvalidInput(format!("missing required field: {}", field))),
        Some(v) => parse(v, field),
    }
}

fn optional<T>(
    value: &Option<Value>,
    field: &str,
    parse: fn(&Value, &str) -> Result<T, PipelineError>,
) -> Result<Option<T>, PipelineError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse(v, field).map(Some),
    }
}

fn invalid(field: &str, expected: &str, value: &Value) -> PipelineError {
    PipelineError::InvalidInput(format!("{} must be {}, got {}", field, expected, value))
}

fn parse_label(value: &Value, field: &str) -> Result<String, PipelineError> {
    value.as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(field, "a string", value))
}

fn parse_float(value: &Value, field: &str) -> Result<f64, PipelineError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(field, "a number", value))
}

/// Integers accept whole JSON numbers, truncated floats and integer strings
fn parse_int(value: &Value, field: &str) -> Result<i64, PipelineError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
                .map(|v| v.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(field, "an integer", value))
}

fn parse_small<T: TryFrom<i64>>(value: &Value, field: &str) -> Result<T, PipelineError> {
    let v = parse_int(value, field)?;
    T::try_from(v).map_err(|_| invalid(field, "a valid calendar value", value))
}
