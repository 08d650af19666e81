//! # Monthly / Yearly Aggregator
//!
//! Derives compliance statistics from stored samples. Summaries are never
//! stored; they are recomputed on demand for the requested range.
//!
//! ## Percentages
//!
//! Percentages are whole numbers rounded half-up and computed with integer
//! arithmetic only. A range with no samples has no percentage at all.

use crate::classifier::classify;
use crate::dates::DateRange;
use crate::primitives::{GOOD_THRESHOLD, WARNING_THRESHOLD};
use crate::{MeasurementSample, Parameter};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// PERCENTAGE & BUCKETS
// =============================================================================

/// Rounded percentage of `compliant` over `total`.
///
/// Returns `None` when `total == 0`; callers render "no data" instead.
#[must_use]
pub fn compliance_percent(compliant: u32, total: u32) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let compliant = u64::from(compliant.min(total));
    let total = u64::from(total);
    // round(c / t * 100) == floor((200c + t) / 2t)
    let percent = (200 * compliant + total) / (2 * total);
    Some(percent.min(100) as u8)
}

/// Display bucket for a compliance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceBucket {
    /// At or above `GOOD_THRESHOLD`.
    Good,
    /// At or above `WARNING_THRESHOLD`, below `GOOD_THRESHOLD`.
    Warning,
    /// Below `WARNING_THRESHOLD`.
    Bad,
}

impl ComplianceBucket {
    /// Bucket a percentage. Lower bounds are inclusive.
    #[must_use]
    pub fn from_percent(percent: u8) -> Self {
        if percent >= GOOD_THRESHOLD {
            Self::Good
        } else if percent >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Bad
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Bad => "bad",
        }
    }
}

// =============================================================================
// SUMMARY TYPES
// =============================================================================

/// Per-parameter counts within a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParameterTally {
    /// Samples where this parameter was present and in range.
    pub compliant: u32,
    /// Samples where this parameter was present.
    pub total: u32,
}

impl ParameterTally {
    #[must_use]
    pub fn percent(&self) -> Option<u8> {
        compliance_percent(self.compliant, self.total)
    }
}

/// Aggregate statistics over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_days: u32,
    pub compliant_days: u32,
    pub parameters: BTreeMap<Parameter, ParameterTally>,
}

impl Default for ComplianceSummary {
    fn default() -> Self {
        Self::empty()
    }
}

impl ComplianceSummary {
    /// A summary with zero counts for every parameter.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_days: 0,
            compliant_days: 0,
            parameters: Parameter::ALL
                .into_iter()
                .map(|p| (p, ParameterTally::default()))
                .collect(),
        }
    }

    /// Fold one sample into the counts.
    pub fn record(&mut self, sample: &MeasurementSample) {
        self.total_days = self.total_days.saturating_add(1);
        if sample.is_compliant {
            self.compliant_days = self.compliant_days.saturating_add(1);
        }
        for parameter in Parameter::ALL {
            let Some(value) = sample.readings.get(parameter) else {
                continue;
            };
            let tally = self.parameters.entry(parameter).or_default();
            tally.total = tally.total.saturating_add(1);
            if classify(Some(value), parameter.range()) {
                tally.compliant = tally.compliant.saturating_add(1);
            }
        }
    }

    /// True if no samples fell in the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_days == 0
    }

    /// Overall compliance percentage, if any days were recorded.
    #[must_use]
    pub fn percent(&self) -> Option<u8> {
        compliance_percent(self.compliant_days, self.total_days)
    }

    /// Tally for one parameter.
    #[must_use]
    pub fn tally(&self, parameter: Parameter) -> ParameterTally {
        self.parameters.get(&parameter).copied().unwrap_or_default()
    }
}

/// One month's slice of a multi-month summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub year: i32,
    pub month: u32,
    pub summary: ComplianceSummary,
}

/// Summary of a multi-month range with a per-month breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub overall: ComplianceSummary,
    /// One entry per month the range touches, chronological.
    pub months: Vec<MonthlyBreakdown>,
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Aggregate the samples falling within `range` (inclusive).
pub fn aggregate<'a, I>(samples: I, range: &DateRange) -> ComplianceSummary
where
    I: IntoIterator<Item = &'a MeasurementSample>,
{
    let mut summary = ComplianceSummary::empty();
    for sample in samples.into_iter().filter(|s| range.contains(s.date)) {
        summary.record(sample);
    }
    summary
}

/// Aggregate the samples within `range`, broken down by calendar month.
///
/// Every month the range touches gets an entry, including empty ones.
pub fn aggregate_by_month<'a, I>(samples: I, range: &DateRange) -> YearlySummary
where
    I: IntoIterator<Item = &'a MeasurementSample>,
{
    let mut overall = ComplianceSummary::empty();
    let mut months: BTreeMap<(i32, u32), ComplianceSummary> = range
        .months()
        .into_iter()
        .map(|key| (key, ComplianceSummary::empty()))
        .collect();

    for sample in samples.into_iter().filter(|s| range.contains(s.date)) {
        overall.record(sample);
        months
            .entry((sample.date.year(), sample.date.month()))
            .or_default()
            .record(sample);
    }

    YearlySummary {
        start_date: range.start(),
        end_date: range.end(),
        overall,
        months: months
            .into_iter()
            .map(|((year, month), summary)| MonthlyBreakdown {
                year,
                month,
                summary,
            })
            .collect(),
    }
}
