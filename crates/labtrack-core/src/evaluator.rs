//! # Sample Evaluator
//!
//! Evaluates a day's readings against all five reference ranges, and gates
//! submissions on completeness and corrective action.

use crate::classifier::classify;
use crate::primitives::MAX_CORRECTIVE_ACTION_LENGTH;
use crate::{ComplianceMap, LabTrackError, Parameter, Readings};
use serde::{Deserialize, Serialize};

/// Result of evaluating one day's readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// AND over all per-parameter flags.
    pub is_compliant: bool,
    /// Per-parameter flags.
    pub compliance: ComplianceMap,
}

impl Evaluation {
    /// Non-compliant parameters in display order.
    ///
    /// These are the inputs an entry form highlights.
    pub fn failing(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.compliance
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(p, _)| p)
    }
}

/// Evaluate readings. Pure; absent readings are compliant.
#[must_use]
pub fn evaluate(readings: &Readings) -> Evaluation {
    let compliance = ComplianceMap::from_fn(|p| classify(readings.get(p), p.range()));
    Evaluation {
        is_compliant: compliance.all(),
        compliance,
    }
}

/// How to treat readings that were left blank when a sample is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessPolicy {
    /// Every reading must be present.
    #[default]
    Strict,
    /// Blank readings are accepted and count as compliant.
    Lenient,
}

/// Validate a submission and return its evaluation.
///
/// Checks, in order:
/// 1. Under `Strict`, every reading is present (`MissingReading`)
/// 2. The corrective action fits `MAX_CORRECTIVE_ACTION_LENGTH`
/// 3. A non-compliant day carries a non-blank corrective action
pub fn validate_submission(
    readings: &Readings,
    corrective_action: &str,
    policy: CompletenessPolicy,
) -> Result<Evaluation, LabTrackError> {
    if policy == CompletenessPolicy::Strict {
        if let Some(missing) = readings.missing().next() {
            return Err(LabTrackError::MissingReading(missing));
        }
    }

    if corrective_action.chars().count() > MAX_CORRECTIVE_ACTION_LENGTH {
        return Err(LabTrackError::FieldTooLong {
            field: "corrective_action",
            max: MAX_CORRECTIVE_ACTION_LENGTH,
        });
    }

    let evaluation = evaluate(readings);
    if !evaluation.is_compliant && corrective_action.trim().is_empty() {
        return Err(LabTrackError::CorrectiveActionRequired);
    }

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_in_range() -> Readings {
        Readings::new()
            .with(Parameter::Refrigerator, 5.0)
            .with(Parameter::Freezer, -20.0)
            .with(Parameter::Ln2, 80.0)
            .with(Parameter::Room, 22.0)
            .with(Parameter::Humidity, 45.0)
    }

    #[test]
    fn ln2_low_fails_only_ln2() {
        let readings = Readings::new()
            .with(Parameter::Refrigerator, 5.0)
            .with(Parameter::Freezer, -20.0)
            .with(Parameter::Ln2, 50.0);
        let eval = evaluate(&readings);

        assert!(!eval.is_compliant);
        assert!(!eval.compliance.ln2);
        assert!(eval.compliance.refrigerator);
        assert!(eval.compliance.freezer);
        assert!(eval.compliance.room);
        assert!(eval.compliance.humidity);
        assert_eq!(eval.failing().collect::<Vec<_>>(), [Parameter::Ln2]);
    }

    #[test]
    fn empty_readings_are_compliant() {
        let eval = evaluate(&Readings::new());
        assert!(eval.is_compliant);
        assert_eq!(eval.failing().count(), 0);
    }

    #[test]
    fn strict_rejects_missing_reading() {
        let readings = Readings::new().with(Parameter::Refrigerator, 5.0);
        let result = validate_submission(&readings, "", CompletenessPolicy::Strict);
        assert_eq!(result, Err(LabTrackError::MissingReading(Parameter::Freezer)));
    }

    #[test]
    fn lenient_accepts_partial_reading() {
        let readings = Readings::new().with(Parameter::Refrigerator, 5.0);
        let eval = validate_submission(&readings, "", CompletenessPolicy::Lenient)
            .expect("partial day is fine under lenient policy");
        assert!(eval.is_compliant);
    }

    #[test]
    fn out_of_range_requires_corrective_action() {
        let readings = full_in_range().with(Parameter::Room, 27.0);
        assert_eq!(
            validate_submission(&readings, "   ", CompletenessPolicy::Strict),
            Err(LabTrackError::CorrectiveActionRequired)
        );
        let eval = validate_submission(&readings, "Adjusted HVAC", CompletenessPolicy::Strict)
            .expect("corrective action supplied");
        assert!(!eval.is_compliant);
    }

    #[test]
    fn compliant_day_needs_no_corrective_action() {
        let eval = validate_submission(&full_in_range(), "", CompletenessPolicy::Strict)
            .expect("compliant");
        assert!(eval.is_compliant);
    }

    #[test]
    fn corrective_action_length_is_bounded() {
        let long = "x".repeat(MAX_CORRECTIVE_ACTION_LENGTH + 1);
        assert!(matches!(
            validate_submission(&full_in_range(), &long, CompletenessPolicy::Strict),
            Err(LabTrackError::FieldTooLong { .. })
        ));
    }
}
