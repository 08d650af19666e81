//! # LabTrack CLI Module
//!
//! This module implements the CLI interface for LabTrack.
//!
//! ## Available Commands
//!
//! - `serve` - Start the reference HTTP server
//! - `calendar` - Show a month's calendar with compliance markers
//! - `show` - Show one day's record
//! - `record` - Record a day's readings
//! - `summary` - Show the monthly compliance cards
//! - `yearly` - Show the yearly summary and monthly breakdown
//! - `export` - Download a month or year as CSV
//! - `chat` - Talk to the lab assistant
//! - `upload` - Upload a document
//! - `language` - Show, set or toggle the UI language

mod commands;

use crate::client::{ClientError, LabTrackClient};
use crate::config::{ClientConfig, DEFAULT_CONFIG_FILE};
use crate::render::localized_error;
use clap::{Parser, Subcommand};
use labtrack_core::{Labels, MonthCursor, UiContext, ViewMode};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// LabTrack - Laboratory Temperature Tracking
///
/// Records daily refrigerator, freezer, LN2, room and humidity readings and
/// reports compliance against fixed reference ranges.
#[derive(Parser, Debug)]
#[command(name = "labtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Also print the reference ranges
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the client config file
    #[arg(short = 'c', long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Server URL (overrides the config file)
    #[arg(short = 'S', long, global = true)]
    pub server: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Only the long-running server prints a banner.
    #[must_use]
    pub fn shows_banner(&self) -> bool {
        !self.json_mode && matches!(self.command, Some(Commands::Serve { .. }))
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the reference HTTP server (in-memory store)
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show a month's calendar with compliance markers
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the record for one day
    Show {
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: String,
    },

    /// Record a day's readings
    Record {
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: String,

        /// Refrigerator temperature, °C
        #[arg(long, allow_hyphen_values = true)]
        refrigerator: Option<String>,

        /// Freezer temperature, °C
        #[arg(long, allow_hyphen_values = true)]
        freezer: Option<String>,

        /// Liquid nitrogen level, %
        #[arg(long, allow_hyphen_values = true)]
        ln2: Option<String>,

        /// Room temperature, °C
        #[arg(long, allow_hyphen_values = true)]
        room: Option<String>,

        /// Relative humidity, %
        #[arg(long, allow_hyphen_values = true)]
        humidity: Option<String>,

        /// Corrective action (required when a reading is out of range)
        #[arg(short = 'a', long)]
        corrective_action: Option<String>,

        /// Accept blank readings
        #[arg(long)]
        lenient: bool,
    },

    /// Show the monthly compliance cards
    Summary {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the yearly summary and monthly breakdown
    Yearly {
        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Download temperature data as CSV
    Export {
        /// Export one month (YYYY-MM)
        #[arg(short, long, conflicts_with = "year")]
        month: Option<String>,

        /// Export a whole year
        #[arg(short, long)]
        year: Option<i32>,

        /// Output file or directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Chat with the lab assistant (interactive without --message)
    Chat {
        /// Send a single message and exit
        #[arg(short, long)]
        message: Option<String>,

        /// Write the transcript to this file or directory on exit
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Upload a document
    Upload {
        /// Document title
        #[arg(short, long)]
        title: String,

        /// Document category
        #[arg(long)]
        category: String,

        /// File holding the document content
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show, set (en|es) or toggle the UI language
    Language {
        /// Language code; omit to toggle
        code: Option<String>,

        /// Only print the current language
        #[arg(long, conflicts_with = "code")]
        show: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Today's date on the local clock.
fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Month argument, or the current month.
fn cursor_from(month: Option<&str>) -> Result<MonthCursor, ClientError> {
    match month {
        Some(m) => Ok(m.parse::<MonthCursor>()?),
        None => Ok(MonthCursor::from_date(today())),
    }
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ClientError> {
    let mut config = ClientConfig::load(&cli.config)?;
    // `--server` applies to this run only and never reaches the config file.
    let server_url = cli.server.as_deref().unwrap_or(&config.server_url);

    let labels = Labels::resolve(config.language);
    let client = LabTrackClient::new(server_url);
    let out = Output {
        labels: &labels,
        json_mode: cli.json_mode,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(&host, port).await,
        Some(Commands::Calendar { month }) => {
            let ui = UiContext::new(
                config.language,
                cursor_from(month.as_deref())?,
                ViewMode::Monthly,
            );
            cmd_calendar(&client, ui, today(), &out).await
        }
        Some(Commands::Show { date }) => cmd_show(&client, &date, &out).await,
        Some(Commands::Record {
            date,
            refrigerator,
            freezer,
            ln2,
            room,
            humidity,
            corrective_action,
            lenient,
        }) => {
            let entry = RecordEntry {
                date,
                refrigerator,
                freezer,
                ln2,
                room,
                humidity,
                corrective_action: corrective_action.unwrap_or_default(),
                lenient,
            };
            cmd_record(&client, &entry, &out).await
        }
        Some(Commands::Summary { month }) => {
            let ui = UiContext::new(
                config.language,
                cursor_from(month.as_deref())?,
                ViewMode::Monthly,
            );
            cmd_summary(&client, ui, &out).await
        }
        Some(Commands::Yearly { year }) => {
            let cursor = match year {
                Some(y) => MonthCursor::new(y, 1)?,
                None => MonthCursor::from_date(today()),
            };
            let ui = UiContext::new(config.language, cursor, ViewMode::Yearly);
            cmd_yearly(&client, ui, &out).await
        }
        Some(Commands::Export {
            month,
            year,
            output,
        }) => {
            let ui = match year {
                Some(y) => UiContext::new(config.language, MonthCursor::new(y, 1)?, ViewMode::Yearly),
                None => UiContext::new(
                    config.language,
                    cursor_from(month.as_deref())?,
                    ViewMode::Monthly,
                ),
            };
            cmd_export(&client, ui, output.as_deref(), &out).await
        }
        Some(Commands::Chat { message, export }) => {
            cmd_chat(client, message.as_deref(), export.as_deref(), &out).await
        }
        Some(Commands::Upload {
            title,
            category,
            file,
        }) => cmd_upload(&client, &title, &category, &file, &out).await,
        Some(Commands::Language { code, show }) => {
            cmd_language(&mut config, &cli.config, code.as_deref(), show, &out)
        }
        None => {
            // No subcommand - show this month's calendar
            let ui = UiContext::new(
                config.language,
                MonthCursor::from_date(today()),
                ViewMode::Monthly,
            );
            cmd_calendar(&client, ui, today(), &out).await
        }
    };

    if let Err(e) = &result {
        if !cli.json_mode {
            eprintln!("{}", localized_error(e, &labels));
        }
    }
    result
}
