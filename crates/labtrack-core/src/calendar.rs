//! # Calendar Grid
//!
//! Lays a month out as a fixed 6x7 Sunday-first grid and attaches each
//! current-month day's compliance status. Also holds the view state the
//! tracking screen is rendered from.

use crate::dates::{DateRange, MonthCursor, first_day_of_month, last_day_of_month};
use crate::i18n::{Labels, Language};
use crate::primitives::{CALENDAR_CELLS, DAYS_PER_WEEK};
use crate::{LabTrackError, MeasurementSample, Parameter};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CELLS
// =============================================================================

/// Which month a grid cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Tail of the previous month.
    Leading,
    /// The month being shown.
    Current,
    /// Head of the next month.
    Trailing,
}

/// Compliance status of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayStatus {
    NoData,
    /// Dots for each compliant parameter.
    Compliant { dots: Vec<Parameter> },
    /// Dots for each failing parameter.
    NonCompliant { dots: Vec<Parameter> },
}

impl DayStatus {
    /// Status for a day, given its sample if one was recorded.
    #[must_use]
    pub fn from_sample(sample: Option<&MeasurementSample>) -> Self {
        let Some(sample) = sample else {
            return DayStatus::NoData;
        };
        let flags = sample.compliance.iter();
        if sample.is_compliant {
            DayStatus::Compliant {
                dots: flags.filter(|(_, ok)| *ok).map(|(p, _)| p).collect(),
            }
        } else {
            DayStatus::NonCompliant {
                dots: flags.filter(|(_, ok)| !ok).map(|(p, _)| p).collect(),
            }
        }
    }

    #[must_use]
    pub fn dots(&self) -> &[Parameter] {
        match self {
            DayStatus::NoData => &[],
            DayStatus::Compliant { dots } | DayStatus::NonCompliant { dots } => dots,
        }
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    pub kind: CellKind,
    pub date: NaiveDate,
    /// Only ever true for a `Current` cell.
    pub is_today: bool,
    /// Always `NoData` outside the current month.
    pub status: DayStatus,
}

// =============================================================================
// GRID
// =============================================================================

/// A month laid out as `CALENDAR_CELLS` cells, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub cursor_year: i32,
    pub cursor_month: u32,
    pub cells: Vec<DayCell>,
}

impl CalendarGrid {
    /// Build the grid for `cursor`, taking statuses from `samples`.
    pub fn build(
        cursor: MonthCursor,
        today: NaiveDate,
        samples: &BTreeMap<NaiveDate, MeasurementSample>,
    ) -> Result<Self, LabTrackError> {
        let first = first_day_of_month(cursor.year(), cursor.month())?;
        let last = last_day_of_month(cursor.year(), cursor.month())?;
        let leading = first.weekday().num_days_from_sunday() as u64;

        let grid_start = first
            .checked_sub_days(Days::new(leading))
            .ok_or_else(|| LabTrackError::InvalidDate(cursor.to_string()))?;

        let cells = grid_start
            .iter_days()
            .take(CALENDAR_CELLS)
            .map(|date| {
                let kind = if date < first {
                    CellKind::Leading
                } else if date > last {
                    CellKind::Trailing
                } else {
                    CellKind::Current
                };
                let current = kind == CellKind::Current;
                DayCell {
                    day: date.day(),
                    kind,
                    date,
                    is_today: current && date == today,
                    status: if current {
                        DayStatus::from_sample(samples.get(&date))
                    } else {
                        DayStatus::NoData
                    },
                }
            })
            .collect();

        Ok(Self {
            cursor_year: cursor.year(),
            cursor_month: cursor.month(),
            cells,
        })
    }

    /// Rows of `DAYS_PER_WEEK` cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Cells belonging to the shown month.
    pub fn current_days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|c| c.kind == CellKind::Current)
    }
}

// =============================================================================
// VIEW STATE
// =============================================================================

/// Monthly calendar or yearly summary. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Monthly,
    Yearly,
}

/// Per-invocation UI state, owned by the caller and passed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub language: Language,
    pub cursor: MonthCursor,
    pub view: ViewMode,
}

impl UiContext {
    #[must_use]
    pub fn new(language: Language, cursor: MonthCursor, view: ViewMode) -> Self {
        Self {
            language,
            cursor,
            view,
        }
    }

    /// Labels in the context's language.
    #[must_use]
    pub fn labels(&self) -> Labels {
        Labels::resolve(self.language)
    }

    /// Range covered by the active view: the cursor's month or its whole year.
    pub fn view_range(&self) -> Result<DateRange, LabTrackError> {
        match self.view {
            ViewMode::Monthly => self.cursor.range(),
            ViewMode::Yearly => DateRange::year(self.cursor.year()),
        }
    }
}
