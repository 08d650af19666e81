//! # Range Classifier
//!
//! Classifies a single reading against its fixed reference range.
//!
//! - Bounds are inclusive on both ends
//! - An absent reading is compliant, so partially filled days are not flagged
//! - NaN and infinities are absent, never "out of range"

use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` interval of acceptable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

impl ReferenceRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True if `value` lies within the range.
    ///
    /// Comparisons against NaN are false, so callers wanting the
    /// absent-is-compliant rule must go through [`classify`].
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Refrigerator, °C.
pub const REFRIGERATOR_RANGE: ReferenceRange = ReferenceRange::new(2.0, 8.0);

/// Freezer, °C.
pub const FREEZER_RANGE: ReferenceRange = ReferenceRange::new(-30.0, -15.0);

/// Liquid nitrogen level, %.
pub const LN2_RANGE: ReferenceRange = ReferenceRange::new(60.0, 100.0);

/// Room temperature, °C.
pub const ROOM_RANGE: ReferenceRange = ReferenceRange::new(20.0, 25.0);

/// Relative humidity, %.
pub const HUMIDITY_RANGE: ReferenceRange = ReferenceRange::new(30.0, 60.0);

/// Classify a reading.
///
/// Total over its domain: absent and non-finite values are compliant,
/// everything else is compliant iff `range.min <= value <= range.max`.
#[must_use]
pub fn classify(value: Option<f64>, range: ReferenceRange) -> bool {
    match value {
        Some(v) if v.is_finite() => range.contains(v),
        _ => true,
    }
}

/// Parse a reading typed by a user.
///
/// Empty, non-numeric and non-finite input is absent.
#[must_use]
pub fn parse_reading(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
