//! # Export Formatters
//!
//! Produces downloadable files: temperature samples as CSV and the chat
//! transcript as plain text.
//!
//! ## CSV Layout
//!
//! ```text
//! Date,Refrigerator (°C),Freezer (°C),LN2 Level (%),Room Temp (°C),Humidity (%),Compliant,Corrective Action
//! 2024-03-01,4.5,-20,80,22,45,Yes,
//! ```
//!
//! Fields are quoted per RFC 4180 and records end in CRLF. Absent readings
//! are empty fields.

use crate::chat::Transcript;
use crate::dates::DateRange;
use crate::i18n::{Language, month_name};
use crate::{LabTrackError, MeasurementSample, Parameter};
use chrono::{Datelike, NaiveDateTime};

/// MIME type of CSV exports.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// MIME type of transcript exports.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

const CSV_HEADER: [&str; 8] = [
    "Date",
    "Refrigerator (°C)",
    "Freezer (°C)",
    "LN2 Level (%)",
    "Room Temp (°C)",
    "Humidity (%)",
    "Compliant",
    "Corrective Action",
];

/// A file ready to be written to disk or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Value for a `Content-Disposition` header.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

// =============================================================================
// CSV
// =============================================================================

/// Suggested filename for exporting `range`.
#[must_use]
pub fn export_filename(range: &DateRange) -> String {
    let start = range.start();
    if range.is_single_month() {
        format!(
            "Temperature_Data_{}_{}.csv",
            month_name(Language::En, start.month()),
            start.year()
        )
    } else if range.is_full_year() {
        format!("Temperature_Data_{}.csv", start.year())
    } else {
        format!("Temperature_Data_{}_to_{}.csv", start, range.end())
    }
}

/// Export the samples within `range` as CSV, sorted by date.
///
/// A range with no samples still yields the header followed by a single
/// empty-state line.
pub fn samples_to_csv<'a, I>(samples: I, range: &DateRange) -> ExportFile
where
    I: IntoIterator<Item = &'a MeasurementSample>,
{
    let mut rows: Vec<&MeasurementSample> = samples
        .into_iter()
        .filter(|s| range.contains(s.date))
        .collect();
    rows.sort_by_key(|s| s.date);

    let mut out = String::new();
    push_record(&mut out, CSV_HEADER.iter().map(|h| (*h).to_string()));

    if rows.is_empty() {
        push_record(
            &mut out,
            std::iter::once(format!(
                "No temperature data recorded between {} and {}",
                range.start(),
                range.end()
            )),
        );
    }

    for sample in rows {
        let readings = Parameter::ALL
            .into_iter()
            .map(|p| sample.readings.get(p).map(|v| v.to_string()).unwrap_or_default());
        let fields = std::iter::once(sample.date.to_string())
            .chain(readings)
            .chain([
                if sample.is_compliant { "Yes" } else { "No" }.to_string(),
                sample.corrective_action.clone(),
            ]);
        push_record(&mut out, fields);
    }

    ExportFile {
        filename: export_filename(range),
        content_type: CSV_CONTENT_TYPE,
        bytes: out.into_bytes(),
    }
}

fn push_record(out: &mut String, fields: impl Iterator<Item = String>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_escape(&field));
    }
    out.push_str("\r\n");
}

/// Quote a field if it contains a comma, quote, or line break.
#[must_use]
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// =============================================================================
// TRANSCRIPT
// =============================================================================

/// Export a chat transcript as plain text.
pub fn transcript_to_text(
    transcript: &Transcript,
    generated_at: NaiveDateTime,
) -> Result<ExportFile, LabTrackError> {
    if transcript.is_empty() {
        return Err(LabTrackError::NoMessages);
    }

    let mut out = String::from("LabTrack Chat Export\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    for message in transcript.messages() {
        out.push_str(&format!("{}: {}\n\n", message.speaker.label(), message.text));
    }

    Ok(ExportFile {
        filename: format!("chat-export-{}.txt", generated_at.format("%Y-%m-%d")),
        content_type: TEXT_CONTENT_TYPE,
        bytes: out.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Readings;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn text(file: &ExportFile) -> &str {
        std::str::from_utf8(&file.bytes).expect("utf-8")
    }

    #[test]
    fn filenames_by_range_shape() {
        let march = DateRange::month(2024, 3).expect("range");
        assert_eq!(export_filename(&march), "Temperature_Data_March_2024.csv");

        let year = DateRange::year(2023).expect("range");
        assert_eq!(export_filename(&year), "Temperature_Data_2023.csv");

        let custom = DateRange::new(date(2024, 3, 1), date(2024, 3, 10)).expect("range");
        assert_eq!(
            export_filename(&custom),
            "Temperature_Data_2024-03-01_to_2024-03-10.csv"
        );
    }

    #[test]
    fn empty_export_has_empty_state_line() {
        let none: Vec<MeasurementSample> = Vec::new();
        let file = samples_to_csv(&none, &DateRange::month(2024, 3).expect("range"));
        let body = text(&file);
        let lines: Vec<_> = body.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Date,Refrigerator (°C)"));
        assert_eq!(
            lines[1],
            "No temperature data recorded between 2024-03-01 and 2024-03-31"
        );
        assert_eq!(file.content_type, CSV_CONTENT_TYPE);
    }

    #[test]
    fn rows_sorted_and_quoted() {
        let samples = vec![
            MeasurementSample::new(
                date(2024, 3, 9),
                Readings::new().with(Parameter::Freezer, -10.0),
                "Moved stock, called \"facilities\"",
            ),
            MeasurementSample::new(
                date(2024, 3, 2),
                Readings::new().with(Parameter::Refrigerator, 4.5),
                "",
            ),
        ];
        let file = samples_to_csv(&samples, &DateRange::month(2024, 3).expect("range"));
        let lines: Vec<_> = text(&file).split("\r\n").collect();

        assert_eq!(lines[1], "2024-03-02,4.5,,,,,Yes,");
        assert_eq!(
            lines[2],
            "2024-03-09,,-10,,,,No,\"Moved stock, called \"\"facilities\"\"\""
        );
    }

    #[test]
    fn escape_rules() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn empty_transcript_cannot_export() {
        let at = date(2024, 3, 5).and_hms_opt(9, 30, 0).expect("time");
        assert_eq!(
            transcript_to_text(&Transcript::new(), at),
            Err(LabTrackError::NoMessages)
        );
    }

    #[test]
    fn transcript_layout() {
        let at = date(2024, 3, 5).and_hms_opt(9, 30, 0).expect("time");
        let mut transcript = Transcript::new();
        transcript.push_user("Hi");
        transcript.push_assistant("<p>Hello</p>");

        let file = transcript_to_text(&transcript, at).expect("export");
        assert_eq!(file.filename, "chat-export-2024-03-05.txt");
        assert_eq!(
            text(&file),
            "LabTrack Chat Export\nGenerated: 2024-03-05 09:30:00\n\nUser: Hi\n\nAssistant: Hello\n\n"
        );
    }
}
