//! # Core Type Definitions
//!
//! This module contains the data model shared by every LabTrack component:
//! - The five monitored parameters (`Parameter`)
//! - A day's raw readings (`Readings`) and per-parameter flags (`ComplianceMap`)
//! - The stored daily record (`MeasurementSample`)
//! - Error types (`LabTrackError`)
//!
//! ## Wire Shape
//!
//! Field names match the JSON exchanged with the temperature endpoints:
//! `refrigerator_temp`, `freezer_temp`, `ln2_level`, `room_temp`, `humidity`,
//! `corrective_action`, `is_compliant` and `compliance`.

use crate::classifier::{
    FREEZER_RANGE, HUMIDITY_RANGE, LN2_RANGE, REFRIGERATOR_RANGE, ROOM_RANGE, ReferenceRange,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// PARAMETER
// =============================================================================

/// A monitored environmental parameter.
///
/// Declaration order is the display order everywhere (cards, CSV columns,
/// status dots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    /// Refrigerator temperature, °C.
    Refrigerator,
    /// Freezer temperature, °C.
    Freezer,
    /// Liquid nitrogen fill level, %.
    Ln2,
    /// Room temperature, °C.
    Room,
    /// Relative humidity, %.
    Humidity,
}

impl Parameter {
    /// All parameters in display order.
    pub const ALL: [Parameter; 5] = [
        Parameter::Refrigerator,
        Parameter::Freezer,
        Parameter::Ln2,
        Parameter::Room,
        Parameter::Humidity,
    ];

    /// Key used in the `compliance` and `parameters` JSON maps.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Parameter::Refrigerator => "refrigerator",
            Parameter::Freezer => "freezer",
            Parameter::Ln2 => "ln2",
            Parameter::Room => "room",
            Parameter::Humidity => "humidity",
        }
    }

    /// Name of the reading field on a sample.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Parameter::Refrigerator => "refrigerator_temp",
            Parameter::Freezer => "freezer_temp",
            Parameter::Ln2 => "ln2_level",
            Parameter::Room => "room_temp",
            Parameter::Humidity => "humidity",
        }
    }

    /// Translation key of the human-readable label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Parameter::Refrigerator => "refrigerator",
            Parameter::Freezer => "freezer",
            Parameter::Ln2 => "ln2_level",
            Parameter::Room => "room_temp",
            Parameter::Humidity => "humidity",
        }
    }

    /// Measurement unit.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Parameter::Refrigerator | Parameter::Freezer | Parameter::Room => "°C",
            Parameter::Ln2 | Parameter::Humidity => "%",
        }
    }

    /// The fixed reference range for this parameter.
    #[must_use]
    pub const fn range(self) -> ReferenceRange {
        match self {
            Parameter::Refrigerator => REFRIGERATOR_RANGE,
            Parameter::Freezer => FREEZER_RANGE,
            Parameter::Ln2 => LN2_RANGE,
            Parameter::Room => ROOM_RANGE,
            Parameter::Humidity => HUMIDITY_RANGE,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = LabTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Parameter::ALL
            .into_iter()
            .find(|p| p.key() == needle || p.field_name() == needle)
            .ok_or_else(|| LabTrackError::UnknownParameter(s.to_string()))
    }
}

// =============================================================================
// READINGS
// =============================================================================

/// One day's raw readings. Every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Readings {
    #[serde(default)]
    pub refrigerator_temp: Option<f64>,
    #[serde(default)]
    pub freezer_temp: Option<f64>,
    #[serde(default)]
    pub ln2_level: Option<f64>,
    #[serde(default)]
    pub room_temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl Readings {
    /// Create an empty set of readings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a reading. Non-finite values (NaN, ±inf) count as absent.
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        let raw = match parameter {
            Parameter::Refrigerator => self.refrigerator_temp,
            Parameter::Freezer => self.freezer_temp,
            Parameter::Ln2 => self.ln2_level,
            Parameter::Room => self.room_temp,
            Parameter::Humidity => self.humidity,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Set or clear a reading.
    pub fn set(&mut self, parameter: Parameter, value: Option<f64>) {
        let slot = match parameter {
            Parameter::Refrigerator => &mut self.refrigerator_temp,
            Parameter::Freezer => &mut self.freezer_temp,
            Parameter::Ln2 => &mut self.ln2_level,
            Parameter::Room => &mut self.room_temp,
            Parameter::Humidity => &mut self.humidity,
        };
        *slot = value;
    }

    /// Builder form of [`Readings::set`].
    #[must_use]
    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        self.set(parameter, Some(value));
        self
    }

    /// Parameters with no usable reading, in display order.
    pub fn missing(&self) -> impl Iterator<Item = Parameter> + '_ {
        Parameter::ALL
            .into_iter()
            .filter(|p| self.get(*p).is_none())
    }

    /// True if all five readings are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().next().is_none()
    }
}

// =============================================================================
// COMPLIANCE MAP
// =============================================================================

/// Per-parameter compliance flags.
///
/// Defaults to all-compliant, which is what an empty set of readings evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceMap {
    pub refrigerator: bool,
    pub freezer: bool,
    pub ln2: bool,
    pub room: bool,
    pub humidity: bool,
}

impl Default for ComplianceMap {
    fn default() -> Self {
        Self::from_fn(|_| true)
    }
}

impl ComplianceMap {
    /// Build a map by evaluating `f` for each parameter.
    pub fn from_fn(mut f: impl FnMut(Parameter) -> bool) -> Self {
        Self {
            refrigerator: f(Parameter::Refrigerator),
            freezer: f(Parameter::Freezer),
            ln2: f(Parameter::Ln2),
            room: f(Parameter::Room),
            humidity: f(Parameter::Humidity),
        }
    }

    /// Flag for one parameter.
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> bool {
        match parameter {
            Parameter::Refrigerator => self.refrigerator,
            Parameter::Freezer => self.freezer,
            Parameter::Ln2 => self.ln2,
            Parameter::Room => self.room,
            Parameter::Humidity => self.humidity,
        }
    }

    /// Iterate `(parameter, flag)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, bool)> + '_ {
        Parameter::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Logical AND over all flags.
    #[must_use]
    pub fn all(&self) -> bool {
        self.iter().all(|(_, ok)| ok)
    }
}

// =============================================================================
// MEASUREMENT SAMPLE
// =============================================================================

/// One calendar day's stored record.
///
/// `is_compliant` and `compliance` are derived from the readings; use
/// [`MeasurementSample::new`] or [`MeasurementSample::refresh`] to keep them
/// consistent rather than setting them by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    /// The day this sample belongs to (unique key).
    pub date: NaiveDate,
    /// Raw readings.
    #[serde(flatten)]
    pub readings: Readings,
    /// Free-text note; required when any reading is out of range.
    /// `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub corrective_action: String,
    /// True iff every present reading is within range.
    #[serde(default)]
    pub is_compliant: bool,
    /// Per-parameter flags.
    #[serde(default)]
    pub compliance: ComplianceMap,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl MeasurementSample {
    /// Create a sample with derived compliance flags.
    ///
    /// This does not enforce the corrective-action rule; see
    /// [`crate::evaluator::validate_submission`] and [`MeasurementSample::record`].
    #[must_use]
    pub fn new(date: NaiveDate, readings: Readings, corrective_action: impl Into<String>) -> Self {
        let evaluation = crate::evaluator::evaluate(&readings);
        Self {
            date,
            readings,
            corrective_action: corrective_action.into(),
            is_compliant: evaluation.is_compliant,
            compliance: evaluation.compliance,
        }
    }

    /// Create a sample that passed the submission gate under `policy`.
    pub fn record(
        date: NaiveDate,
        readings: Readings,
        corrective_action: &str,
        policy: crate::evaluator::CompletenessPolicy,
    ) -> Result<Self, LabTrackError> {
        let evaluation =
            crate::evaluator::validate_submission(&readings, corrective_action, policy)?;
        Ok(Self {
            date,
            readings,
            corrective_action: corrective_action.trim().to_string(),
            is_compliant: evaluation.is_compliant,
            compliance: evaluation.compliance,
        })
    }

    /// Re-derive `is_compliant` and `compliance` from the readings.
    pub fn refresh(&mut self) {
        let evaluation = crate::evaluator::evaluate(&self.readings);
        self.is_compliant = evaluation.is_compliant;
        self.compliance = evaluation.compliance;
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the LabTrack core.
///
/// Every variant is a recoverable validation failure; the core never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabTrackError {
    /// A reading is out of range and no corrective action was given.
    #[error("Corrective action is required for out-of-range values")]
    CorrectiveActionRequired,

    /// The strict completeness policy requires every reading.
    #[error("Missing reading: {0}")]
    MissingReading(Parameter),

    /// Uploaded document body is below the minimum length.
    #[error("Content must be at least {min} characters (got {actual})")]
    ContentTooShort { min: usize, actual: usize },

    /// A required text field is blank.
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// A text field exceeds its maximum length.
    #[error("{field} exceeds maximum length of {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    /// Export requested for an empty chat transcript.
    #[error("No messages to export")]
    NoMessages,

    /// A date range whose start is after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A date or month that does not exist or cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Language code other than "en" or "es".
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Parameter name that is not one of the five monitored parameters.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
    }

    #[test]
    fn parameter_keys_match_wire_names() {
        let keys: Vec<_> = Parameter::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["refrigerator", "freezer", "ln2", "room", "humidity"]);
        let json = serde_json::to_string(&Parameter::Ln2).expect("serialize");
        assert_eq!(json, "\"ln2\"");
    }

    #[test]
    fn parameter_parses_key_or_field_name() {
        assert_eq!("ln2".parse::<Parameter>(), Ok(Parameter::Ln2));
        assert_eq!(" Room_Temp ".parse::<Parameter>(), Ok(Parameter::Room));
        assert!(matches!(
            "pressure".parse::<Parameter>(),
            Err(LabTrackError::UnknownParameter(_))
        ));
    }

    #[test]
    fn readings_treat_nan_as_absent() {
        let readings = Readings {
            refrigerator_temp: Some(f64::NAN),
            freezer_temp: Some(f64::INFINITY),
            ..Readings::default()
        };
        assert_eq!(readings.get(Parameter::Refrigerator), None);
        assert_eq!(readings.get(Parameter::Freezer), None);
        assert_eq!(readings.missing().count(), 5);
    }

    #[test]
    fn readings_complete_when_all_present() {
        let readings = Readings::new()
            .with(Parameter::Refrigerator, 4.0)
            .with(Parameter::Freezer, -20.0)
            .with(Parameter::Ln2, 80.0)
            .with(Parameter::Room, 22.0);
        assert!(!readings.is_complete());
        assert_eq!(readings.missing().collect::<Vec<_>>(), [Parameter::Humidity]);
        assert!(readings.with(Parameter::Humidity, 45.0).is_complete());
    }

    #[test]
    fn sample_json_shape() {
        let sample = MeasurementSample::new(
            day(5),
            Readings::new()
                .with(Parameter::Refrigerator, 5.0)
                .with(Parameter::Ln2, 50.0),
            "Topped up dewar",
        );
        let value = serde_json::to_value(&sample).expect("serialize");
        assert_eq!(value["date"], "2024-03-05");
        assert_eq!(value["refrigerator_temp"], 5.0);
        assert!(value["freezer_temp"].is_null());
        assert_eq!(value["is_compliant"], false);
        assert_eq!(value["compliance"]["ln2"], false);
        assert_eq!(value["compliance"]["freezer"], true);
    }

    #[test]
    fn sample_deserializes_missing_fields_as_absent() {
        let json = r#"{"date":"2024-03-07","refrigerator_temp":3.5}"#;
        let mut sample: MeasurementSample = serde_json::from_str(json).expect("parse");
        assert_eq!(sample.readings.get(Parameter::Refrigerator), Some(3.5));
        assert_eq!(sample.readings.get(Parameter::Humidity), None);
        assert!(sample.corrective_action.is_empty());

        sample.refresh();
        assert!(sample.is_compliant);
    }

    #[test]
    fn sample_reads_null_corrective_action_as_empty() {
        let json = r#"{"date":"2024-03-08","room_temp":21.0,"corrective_action":null}"#;
        let sample: MeasurementSample = serde_json::from_str(json).expect("parse");
        assert_eq!(sample.corrective_action, "");
        assert_eq!(sample.readings.get(Parameter::Room), Some(21.0));
    }

    #[test]
    fn compliance_map_default_is_compliant() {
        let map = ComplianceMap::default();
        assert!(map.all());
        let failing = ComplianceMap::from_fn(|p| p != Parameter::Room);
        assert!(!failing.all());
        assert!(!failing.get(Parameter::Room));
    }
}
