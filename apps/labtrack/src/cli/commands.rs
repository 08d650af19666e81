//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::client::{ClientError, LabTrackClient};
use crate::config::ClientConfig;
use crate::render::{
    localized_error, render_calendar, render_monthly_report, render_reference_ranges,
    render_sample, render_yearly,
};
use crate::session::ChatSession;
use chrono::NaiveDate;
use labtrack_core::chat::WELCOME_MESSAGE;
use labtrack_core::dates::parse_date;
use labtrack_core::{
    CalendarGrid, CompletenessPolicy, ElementId, ExportFile, Labels, Language, MeasurementSample,
    MonthlyReport, Parameter, Readings, UiContext, UploadDocument, evaluate, parse_reading,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// How command results are printed.
pub struct Output<'a> {
    pub labels: &'a Labels,
    pub json_mode: bool,
    pub verbose: bool,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Where to write an export: a directory gets the suggested filename.
fn resolve_output(output: Option<&Path>, filename: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(filename),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(filename),
    }
}

fn write_export(file: &ExportFile, output: Option<&Path>) -> Result<PathBuf, ClientError> {
    let path = resolve_output(output, &file.filename);
    std::fs::write(&path, &file.bytes)?;
    tracing::info!(path = %path.display(), bytes = file.bytes.len(), "Export written");
    Ok(path)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the reference HTTP server.
pub async fn cmd_serve(host: &str, port: u16) -> Result<(), ClientError> {
    println!("LabTrack reference server starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Storage:  in-memory");
    println!();
    println!("Endpoints:");
    println!("  GET  /temperature-data               - One day's sample");
    println!("  POST /temperature-data               - Save a day's sample");
    println!("  GET  /temperature-compliance         - Compliance summary");
    println!("  GET  /temperature-compliance-yearly  - Yearly summary");
    println!("  GET  /export-temperature-data        - CSV export");
    println!("  GET  /health                         - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, AppState::default()).await
}

// =============================================================================
// CALENDAR / SUMMARY COMMANDS
// =============================================================================

/// Show the calendar grid and monthly cards.
pub async fn cmd_calendar(
    client: &LabTrackClient,
    ui: UiContext,
    today: NaiveDate,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let samples = client.fetch_month(ui.cursor).await?;
    let grid = CalendarGrid::build(ui.cursor, today, &samples)?;
    let summary = client.fetch_compliance(&ui.view_range()?).await?;

    if out.json_mode {
        print_json(&serde_json::json!({
            "language": ui.language,
            "grid": grid,
            "summary": summary,
        }));
        return Ok(());
    }

    let labels = ui.labels();
    println!("{}", labels.get(ElementId::PageTitle));
    println!();
    println!("{}", render_calendar(&grid, &labels));
    println!(
        "{}",
        render_monthly_report(MonthlyReport::from_summary(&summary).as_ref(), &labels)
    );
    if out.verbose {
        println!("{}", render_reference_ranges(&labels));
    }
    Ok(())
}

/// Show the monthly compliance cards.
pub async fn cmd_summary(
    client: &LabTrackClient,
    ui: UiContext,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let summary = client.fetch_compliance(&ui.view_range()?).await?;
    let report = MonthlyReport::from_summary(&summary);

    if out.json_mode {
        print_json(&serde_json::json!({
            "month": ui.cursor.to_string(),
            "summary": summary,
            "report": report,
        }));
        return Ok(());
    }

    let labels = ui.labels();
    println!("{}", ui.cursor);
    println!("{}", render_monthly_report(report.as_ref(), &labels));
    if out.verbose {
        println!("{}", render_reference_ranges(&labels));
    }
    Ok(())
}

/// Show the yearly summary and breakdown table.
pub async fn cmd_yearly(
    client: &LabTrackClient,
    ui: UiContext,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let yearly = client.fetch_yearly(&ui.view_range()?).await?;

    if out.json_mode {
        print_json(&yearly);
        return Ok(());
    }

    println!("{}", render_yearly(&yearly, &ui.labels()));
    Ok(())
}

// =============================================================================
// SINGLE DAY COMMANDS
// =============================================================================

/// Show one day's record.
pub async fn cmd_show(
    client: &LabTrackClient,
    date: &str,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let date = parse_date(date)?;
    let sample = client.fetch_sample(date).await?;

    if out.json_mode {
        print_json(&serde_json::json!({ "data": sample }));
        return Ok(());
    }

    match sample {
        Some(sample) => println!("{}", render_sample(&sample, out.labels)),
        None => println!("{}: {}", date, out.labels.text("no_data")),
    }
    Ok(())
}

/// Raw `record` arguments.
#[derive(Debug, Clone, Default)]
pub struct RecordEntry {
    pub date: String,
    pub refrigerator: Option<String>,
    pub freezer: Option<String>,
    pub ln2: Option<String>,
    pub room: Option<String>,
    pub humidity: Option<String>,
    pub corrective_action: String,
    pub lenient: bool,
}

impl RecordEntry {
    /// Parse the typed readings; unparsable input counts as absent.
    pub fn readings(&self) -> Readings {
        let mut readings = Readings::new();
        for (parameter, raw) in [
            (Parameter::Refrigerator, &self.refrigerator),
            (Parameter::Freezer, &self.freezer),
            (Parameter::Ln2, &self.ln2),
            (Parameter::Room, &self.room),
            (Parameter::Humidity, &self.humidity),
        ] {
            readings.set(parameter, raw.as_deref().and_then(parse_reading));
        }
        readings
    }

    pub fn policy(&self) -> CompletenessPolicy {
        if self.lenient {
            CompletenessPolicy::Lenient
        } else {
            CompletenessPolicy::Strict
        }
    }
}

/// Validate and save a day's readings.
pub async fn cmd_record(
    client: &LabTrackClient,
    entry: &RecordEntry,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let date = parse_date(&entry.date)?;
    let readings = entry.readings();

    // Flag out-of-range inputs before the submission gate runs.
    if !out.json_mode {
        for parameter in evaluate(&readings).failing() {
            let range = parameter.range();
            eprintln!(
                "  ! {}: {} ({} {} - {} {})",
                out.labels.text(parameter.label_key()),
                readings.get(parameter).map(|v| v.to_string()).unwrap_or_default(),
                out.labels.text("range"),
                range.min,
                range.max,
                parameter.unit()
            );
        }
    }

    let sample =
        MeasurementSample::record(date, readings, &entry.corrective_action, entry.policy())?;
    let message = client.save_sample(&sample).await?;
    tracing::info!(%date, is_compliant = sample.is_compliant, "Sample saved");

    if out.json_mode {
        print_json(&serde_json::json!({
            "success": true,
            "message": message,
            "data": sample,
        }));
        return Ok(());
    }

    println!("{}", out.labels.text("success_saving"));
    println!("{}", render_sample(&sample, out.labels));
    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Download the active view's range as CSV.
pub async fn cmd_export(
    client: &LabTrackClient,
    ui: UiContext,
    output: Option<&Path>,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let range = ui.view_range()?;
    let labels = ui.labels();
    if !out.json_mode {
        println!("{}", labels.text("exporting_data"));
    }

    let file = client.export_csv(&range).await?;
    let path = write_export(&file, output)?;

    if out.json_mode {
        print_json(&serde_json::json!({
            "filename": file.filename,
            "path": path.display().to_string(),
            "bytes": file.bytes.len(),
        }));
    } else {
        println!("{} {}", labels.text("export_saved"), path.display());
    }
    Ok(())
}

// =============================================================================
// CHAT COMMAND
// =============================================================================

fn export_transcript(
    session: &ChatSession,
    output: Option<&Path>,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let file = session.export(chrono::Local::now().naive_local())?;
    let path = write_export(&file, output)?;
    if !out.json_mode {
        println!("{} {}", out.labels.text("export_saved"), path.display());
    }
    Ok(())
}

/// One-shot or interactive chat.
///
/// Interactive commands: `/new`, `/clear`, `/export [path]`, `/quit`.
pub async fn cmd_chat(
    client: LabTrackClient,
    message: Option<&str>,
    export: Option<&Path>,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let mut session = ChatSession::new(client);

    if let Some(message) = message {
        if let Some(reply) = session.send(message).await? {
            if out.json_mode {
                print_json(reply);
            } else {
                println!("{}", reply.text);
            }
        }
    } else {
        println!("{}", WELCOME_MESSAGE);
        println!("(/new, /clear, /export [path], /quit)");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "/quit" | "/exit" => break,
                "/new" => {
                    session.new_chat();
                    println!("{}", out.labels.get(ElementId::MenuNewChat));
                    println!("{}", WELCOME_MESSAGE);
                }
                "/clear" => {
                    session.clear();
                    println!("{}", out.labels.get(ElementId::MenuClearChat));
                }
                command if command.starts_with("/export") => {
                    let arg = command.trim_start_matches("/export").trim();
                    let path = (!arg.is_empty()).then_some(Path::new(arg));
                    if let Err(e) = export_transcript(&session, path, out) {
                        eprintln!("{}", localized_error(&e, out.labels));
                    }
                }
                text => match session.send(text).await {
                    Ok(Some(reply)) => println!("{}\n", reply.text),
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", localized_error(&ClientError::from(e), out.labels)),
                },
            }
        }
    }

    if let Some(path) = export {
        export_transcript(&session, Some(path), out)?;
    }
    Ok(())
}

// =============================================================================
// UPLOAD COMMAND
// =============================================================================

/// Validate and upload a document.
pub async fn cmd_upload(
    client: &LabTrackClient,
    title: &str,
    category: &str,
    file: &Path,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    let content = std::fs::read_to_string(file)?;
    let document = UploadDocument::new(title, content, category);
    let message = client.upload(&document).await?;

    if out.json_mode {
        print_json(&serde_json::json!({ "success": true, "message": message }));
    } else {
        println!("{}", out.labels.text("upload_success"));
    }
    Ok(())
}

// =============================================================================
// LANGUAGE COMMAND
// =============================================================================

/// Show, set or toggle the persisted UI language.
pub fn cmd_language(
    config: &mut ClientConfig,
    config_path: &Path,
    code: Option<&str>,
    show: bool,
    out: &Output<'_>,
) -> Result<(), ClientError> {
    if !show {
        let language = match code {
            Some(code) => code.parse::<Language>()?,
            None => config.language.toggled(),
        };
        config.persist_language(config_path, language)?;
    }

    if out.json_mode {
        print_json(&serde_json::json!({ "language": config.language }));
    } else if show {
        println!("{}", config.language);
    } else {
        println!(
            "{}",
            Labels::resolve(config.language).text("language_changed")
        );
    }
    Ok(())
}
