//! # labtrack-core
//!
//! The Compliance Evaluator for LabTrack - THE LOGIC.
//!
//! This crate classifies daily laboratory environment readings against fixed
//! reference ranges, aggregates them into monthly and yearly compliance
//! statistics, and turns those statistics into display and export models.
//!
//! ## Pipeline
//!
//! ```text
//! Readings -> evaluate -> MeasurementSample -> SampleStore
//!                                   |
//!            aggregate / aggregate_by_month -> MonthlyReport / breakdown rows
//!                                   |
//!                     CalendarGrid, CSV export
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: NO async, NO network, NO logging
//! - Deterministic: ordered maps only, integer percentages
//! - Every failure is a recoverable [`LabTrackError`]

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod calendar;
pub mod chat;
pub mod classifier;
pub mod dates;
pub mod evaluator;
pub mod export;
pub mod i18n;
pub mod primitives;
pub mod report;
pub mod store;
pub mod types;
pub mod upload;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ComplianceMap, LabTrackError, MeasurementSample, Parameter, Readings};

// =============================================================================
// RE-EXPORTS: Evaluation
// =============================================================================

pub use aggregate::{
    ComplianceBucket, ComplianceSummary, MonthlyBreakdown, ParameterTally, YearlySummary,
    aggregate, aggregate_by_month, compliance_percent,
};
pub use classifier::{ReferenceRange, classify, parse_reading};
pub use dates::{DateRange, MonthCursor};
pub use evaluator::{CompletenessPolicy, Evaluation, evaluate, validate_submission};
pub use store::{SampleStore, UpsertOutcome};

// =============================================================================
// RE-EXPORTS: Presentation
// =============================================================================

pub use calendar::{CalendarGrid, CellKind, DayCell, DayStatus, UiContext, ViewMode};
pub use chat::{ChatMessage, Speaker, Transcript};
pub use export::{ExportFile, export_filename, samples_to_csv, transcript_to_text};
pub use i18n::{ElementId, Labels, Language};
pub use report::{BreakdownRow, CardSubject, MonthlyReport, StatCard, breakdown_rows};
pub use upload::UploadDocument;
