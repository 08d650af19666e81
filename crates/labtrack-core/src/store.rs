//! # Sample Store
//!
//! In-memory day-keyed store behind the reference server. One sample per
//! date; upserts overwrite and nothing is ever deleted. Compliance flags are
//! always re-derived on the way in, so client-supplied flags are ignored.

use crate::aggregate::{ComplianceSummary, YearlySummary, aggregate, aggregate_by_month};
use crate::dates::DateRange;
use crate::evaluator::CompletenessPolicy;
use crate::export::{ExportFile, samples_to_csv};
use crate::{LabTrackError, MeasurementSample};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Whether an upsert created or replaced a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: BTreeMap<NaiveDate, MeasurementSample>,
    policy: CompletenessPolicy,
}

impl SampleStore {
    #[must_use]
    pub fn new(policy: CompletenessPolicy) -> Self {
        Self {
            samples: BTreeMap::new(),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> CompletenessPolicy {
        self.policy
    }

    /// Validate and store a sample, replacing any sample for the same date.
    pub fn upsert(&mut self, sample: MeasurementSample) -> Result<UpsertOutcome, LabTrackError> {
        let sample = MeasurementSample::record(
            sample.date,
            sample.readings,
            &sample.corrective_action,
            self.policy,
        )?;
        Ok(match self.samples.insert(sample.date, sample) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Inserted,
        })
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&MeasurementSample> {
        self.samples.get(&date)
    }

    /// Samples within `range`, in date order.
    pub fn in_range(&self, range: &DateRange) -> impl Iterator<Item = &MeasurementSample> {
        self.samples
            .range(range.start()..=range.end())
            .map(|(_, sample)| sample)
    }

    #[must_use]
    pub fn summary(&self, range: &DateRange) -> ComplianceSummary {
        aggregate(self.in_range(range), range)
    }

    #[must_use]
    pub fn yearly(&self, range: &DateRange) -> YearlySummary {
        aggregate_by_month(self.in_range(range), range)
    }

    #[must_use]
    pub fn export_csv(&self, range: &DateRange) -> ExportFile {
        samples_to_csv(self.in_range(range), range)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
