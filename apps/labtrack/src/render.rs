//! # Text Rendering
//!
//! Turns core display models into terminal text. Every function takes the
//! resolved [`Labels`] so nothing here looks up translations on its own.

use crate::client::ClientError;
use labtrack_core::i18n::{month_name, weekday_headers};
use labtrack_core::{
    BreakdownRow, CalendarGrid, CardSubject, CellKind, ComplianceBucket, DayStatus, ElementId,
    LabTrackError, Labels, MeasurementSample, MonthlyReport, Parameter, StatCard, YearlySummary,
    breakdown_rows,
};
use std::fmt::Write;

const CELL_WIDTH: usize = 5;

/// Short bucket marker shown next to percentages.
#[must_use]
pub fn bucket_marker(bucket: ComplianceBucket) -> &'static str {
    match bucket {
        ComplianceBucket::Good => "[good]",
        ComplianceBucket::Warning => "[warn]",
        ComplianceBucket::Bad => "[bad]",
    }
}

fn parameter_label(labels: &Labels, parameter: Parameter) -> &'static str {
    labels.text(parameter.label_key())
}

// =============================================================================
// CALENDAR
// =============================================================================

/// Render the month grid followed by a list of non-compliant days.
///
/// Cell markers: `+` compliant, `!` non-compliant, `*` today. Days outside
/// the month are shown as `.`.
#[must_use]
pub fn render_calendar(grid: &CalendarGrid, labels: &Labels) -> String {
    let language = labels.language();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        month_name(language, grid.cursor_month),
        grid.cursor_year
    );
    for header in weekday_headers(language) {
        let _ = write!(out, "{:>width$}", header, width = CELL_WIDTH);
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            let cell_text = match cell.kind {
                CellKind::Leading | CellKind::Trailing => ".".to_string(),
                CellKind::Current => {
                    let marker = match cell.status {
                        DayStatus::NoData => ' ',
                        DayStatus::Compliant { .. } => '+',
                        DayStatus::NonCompliant { .. } => '!',
                    };
                    let today = if cell.is_today { "*" } else { "" };
                    format!("{}{}{}", today, cell.day, marker)
                }
            };
            let _ = write!(out, "{:>width$}", cell_text, width = CELL_WIDTH);
        }
        out.push('\n');
    }

    let failing: Vec<_> = grid
        .current_days()
        .filter_map(|cell| match &cell.status {
            DayStatus::NonCompliant { dots } => Some((cell.day, dots)),
            _ => None,
        })
        .collect();
    if !failing.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}:", labels.text("non_compliant"));
        for (day, dots) in failing {
            let names: Vec<_> = dots.iter().map(|p| parameter_label(labels, *p)).collect();
            let _ = writeln!(out, "  {:>2}  {}", day, names.join(", "));
        }
    }

    out
}

// =============================================================================
// REFERENCE RANGES
// =============================================================================

#[must_use]
pub fn render_reference_ranges(labels: &Labels) -> String {
    let mut out = format!("{}\n", labels.get(ElementId::ReferenceRangesTitle));
    for p in Parameter::ALL {
        let range = p.range();
        let _ = writeln!(
            out,
            "  {:<28} {} to {} {}",
            parameter_label(labels, p),
            range.min,
            range.max,
            p.unit()
        );
    }
    out
}

// =============================================================================
// REPORT CARDS
// =============================================================================

fn card_line(card: &StatCard, labels: &Labels) -> String {
    let title = match card.subject {
        CardSubject::Overall => labels.get(ElementId::OverallComplianceTitle),
        CardSubject::Parameter(p) => parameter_label(labels, p),
    };
    format!(
        "{:<28} {:>3}% {:<6} ({} {} {} {})",
        title,
        card.percent,
        bucket_marker(card.bucket),
        card.compliant,
        labels.text("of"),
        card.total,
        labels.text("days"),
    )
}

/// Render the monthly stat cards, or the no-data message.
#[must_use]
pub fn render_monthly_report(report: Option<&MonthlyReport>, labels: &Labels) -> String {
    let mut out = format!("{}\n", labels.get(ElementId::MonthlyComplianceTitle));
    match report {
        None => {
            let _ = writeln!(out, "  {}", labels.text("no_data_available"));
        }
        Some(report) => {
            let _ = writeln!(out, "  {}", card_line(&report.overall, labels));
            for card in &report.parameters {
                let _ = writeln!(out, "  {}", card_line(card, labels));
            }
        }
    }
    out
}

// =============================================================================
// YEARLY SUMMARY
// =============================================================================

fn percent_cell(value: Option<u8>) -> String {
    value.map(|p| format!("{}%", p)).unwrap_or_else(|| "-".to_string())
}

fn breakdown_line(row: &BreakdownRow, labels: &Labels) -> String {
    let mut line = format!(
        "{:<12}{:>9}",
        month_name(labels.language(), row.month),
        percent_cell(row.overall)
    );
    for cell in &row.parameters {
        let _ = write!(line, "{:>9}", percent_cell(*cell));
    }
    line
}

/// Render the yearly overview and the per-month breakdown table.
#[must_use]
pub fn render_yearly(yearly: &YearlySummary, labels: &Labels) -> String {
    let mut out = format!(
        "{} ({} - {})\n",
        labels.get(ElementId::YearlyComplianceTitle),
        yearly.start_date,
        yearly.end_date
    );

    match MonthlyReport::from_summary(&yearly.overall) {
        None => {
            let _ = writeln!(out, "  {}", labels.text("no_data"));
        }
        Some(report) => {
            let _ = writeln!(out, "  {}", card_line(&report.overall, labels));
            for card in &report.parameters {
                let _ = writeln!(out, "  {}", card_line(card, labels));
            }
        }
    }

    out.push('\n');
    let _ = writeln!(out, "{}", labels.get(ElementId::MonthlyBreakdownTitle));
    let mut header = format!(
        "{:<12}{:>9}",
        labels.get(ElementId::MonthColumn),
        labels.get(ElementId::ComplianceColumn)
    );
    for p in Parameter::ALL {
        let _ = write!(header, "{:>9}", labels.text(p.key()));
    }
    let _ = writeln!(out, "{}", header);
    for row in breakdown_rows(yearly) {
        let _ = writeln!(out, "{}", breakdown_line(&row, labels));
    }
    out
}

// =============================================================================
// SINGLE DAY
// =============================================================================

/// Render one day's record, flagging failing readings.
#[must_use]
pub fn render_sample(sample: &MeasurementSample, labels: &Labels) -> String {
    let mut out = format!(
        "{} - {}\n",
        labels.get(ElementId::EntryFormTitle),
        sample.date
    );
    for p in Parameter::ALL {
        let value = sample
            .readings
            .get(p)
            .map(|v| format!("{} {}", v, p.unit()))
            .unwrap_or_else(|| "-".to_string());
        let flag = if sample.compliance.get(p) { "" } else { "  !" };
        let _ = writeln!(out, "  {:<28} {}{}", parameter_label(labels, p), value, flag);
    }
    let status = if sample.is_compliant {
        "compliant"
    } else {
        "non_compliant"
    };
    let _ = writeln!(out, "  => {}", labels.text(status));
    if !sample.corrective_action.is_empty() {
        let _ = writeln!(
            out,
            "  {}: {}",
            labels.get(ElementId::CorrectiveActionLabel),
            sample.corrective_action
        );
    }
    out
}

// =============================================================================
// ERRORS
// =============================================================================

/// User-facing message for an error, localized where a translation exists.
#[must_use]
pub fn localized_error(error: &ClientError, labels: &Labels) -> String {
    let key = match error {
        ClientError::Validation(LabTrackError::CorrectiveActionRequired) => {
            Some("corrective_action_required")
        }
        ClientError::Validation(LabTrackError::MissingReading(p)) => {
            return format!(
                "{}: {}",
                labels.text("missing_reading"),
                parameter_label(labels, *p)
            );
        }
        ClientError::Validation(LabTrackError::ContentTooShort { .. }) => {
            Some("content_too_short")
        }
        ClientError::Validation(LabTrackError::NoMessages) => Some("no_messages_to_export"),
        _ => None,
    };
    match key {
        Some(key) => labels.text(key).to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use labtrack_core::{DateRange, Language, MonthCursor, Readings, aggregate_by_month};
    use std::collections::BTreeMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
    }

    #[test]
    fn calendar_marks_days() {
        let bad = MeasurementSample::new(
            date(5),
            Readings::new().with(Parameter::Ln2, 40.0),
            "Refilled",
        );
        let good = MeasurementSample::new(
            date(6),
            Readings::new().with(Parameter::Ln2, 80.0),
            "",
        );
        let samples = BTreeMap::from([(bad.date, bad), (good.date, good)]);
        let grid = CalendarGrid::build(
            MonthCursor::new(2024, 3).expect("cursor"),
            date(6),
            &samples,
        )
        .expect("grid");

        let text = render_calendar(&grid, &Labels::resolve(Language::En));
        assert!(text.starts_with("March 2024\n"));
        assert!(text.contains("5!"));
        assert!(text.contains("*6+"));
        assert!(text.contains("Liquid Nitrogen Level"));
    }

    #[test]
    fn calendar_is_localized() {
        let grid = CalendarGrid::build(
            MonthCursor::new(2024, 3).expect("cursor"),
            date(1),
            &BTreeMap::new(),
        )
        .expect("grid");
        let text = render_calendar(&grid, &Labels::resolve(Language::Es));
        assert!(text.starts_with("Marzo 2024\n"));
        assert!(text.contains("Dom"));
    }

    #[test]
    fn empty_report_says_no_data() {
        let text = render_monthly_report(None, &Labels::resolve(Language::Es));
        assert!(text.contains("No hay datos disponibles para este mes"));
    }

    #[test]
    fn yearly_table_has_every_month() {
        let none: Vec<MeasurementSample> = Vec::new();
        let yearly = aggregate_by_month(&none, &DateRange::year(2024).expect("range"));
        let text = render_yearly(&yearly, &Labels::resolve(Language::En));
        for month in ["January", "June", "December"] {
            assert!(text.contains(month), "{}", month);
        }
        assert!(text.contains("No data"));
    }

    #[test]
    fn validation_errors_are_localized() {
        let labels = Labels::resolve(Language::Es);
        let err = ClientError::Validation(LabTrackError::CorrectiveActionRequired);
        assert_eq!(
            localized_error(&err, &labels),
            "Se requiere acción correctiva para valores fuera de rango"
        );
        let err = ClientError::Rejected("Disk full".to_string());
        assert_eq!(localized_error(&err, &labels), "Disk full");
    }
}
