//! # Report Cards
//!
//! Turns summaries into the display model behind the monthly stat cards and
//! the yearly breakdown table. No formatting happens here; the app decides
//! how a card is drawn.

use crate::aggregate::{ComplianceBucket, ComplianceSummary, YearlySummary};
use crate::Parameter;
use serde::{Deserialize, Serialize};

/// What a stat card describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parameter", rename_all = "snake_case")]
pub enum CardSubject {
    Overall,
    Parameter(Parameter),
}

impl CardSubject {
    /// Translation key of the card title.
    #[must_use]
    pub fn label_key(&self) -> &'static str {
        match self {
            CardSubject::Overall => "overall_compliance",
            CardSubject::Parameter(p) => p.label_key(),
        }
    }
}

/// One stat card: a percentage with its bucket and the counts behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub subject: CardSubject,
    pub percent: u8,
    pub bucket: ComplianceBucket,
    pub compliant: u32,
    pub total: u32,
}

impl StatCard {
    fn new(subject: CardSubject, compliant: u32, total: u32) -> Option<Self> {
        let percent = crate::aggregate::compliance_percent(compliant, total)?;
        Some(Self {
            subject,
            percent,
            bucket: ComplianceBucket::from_percent(percent),
            compliant,
            total,
        })
    }
}

/// Cards for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub overall: StatCard,
    /// Parameters with at least one reading, in display order.
    pub parameters: Vec<StatCard>,
}

impl MonthlyReport {
    /// Build the cards, or `None` if the month has no data.
    #[must_use]
    pub fn from_summary(summary: &ComplianceSummary) -> Option<Self> {
        let overall = StatCard::new(
            CardSubject::Overall,
            summary.compliant_days,
            summary.total_days,
        )?;
        let parameters = Parameter::ALL
            .into_iter()
            .filter_map(|p| {
                let tally = summary.tally(p);
                StatCard::new(CardSubject::Parameter(p), tally.compliant, tally.total)
            })
            .collect();
        Some(Self {
            overall,
            parameters,
        })
    }
}

/// A row of the yearly breakdown table. `None` cells have no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub year: i32,
    pub month: u32,
    pub overall: Option<u8>,
    /// Per-parameter percentages in `Parameter::ALL` order.
    pub parameters: Vec<Option<u8>>,
}

/// Build the breakdown table rows of a yearly summary.
#[must_use]
pub fn breakdown_rows(yearly: &YearlySummary) -> Vec<BreakdownRow> {
    yearly
        .months
        .iter()
        .map(|m| BreakdownRow {
            year: m.year,
            month: m.month,
            overall: m.summary.percent(),
            parameters: Parameter::ALL
                .into_iter()
                .map(|p| m.summary.tally(p).percent())
                .collect(),
        })
        .collect()
}
