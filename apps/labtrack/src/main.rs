//! # LabTrack
//!
//! The main binary for laboratory temperature tracking.
//!
//! This application provides:
//! - A terminal client for the calendar, compliance reports, CSV export,
//!   chat and document upload
//! - A reference HTTP server for the temperature endpoints
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  apps/labtrack (THE BINARY)                 │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌────────────────┐  │
//! │  │   CLI       │───▶│ HTTP client │    │   HTTP API     │  │
//! │  │  (clap)     │    │  (reqwest)  │    │    (axum)      │  │
//! │  └──────┬──────┘    └─────────────┘    └───────┬────────┘  │
//! │         │                                      │           │
//! │         └──────────────────┬───────────────────┘           │
//! │                            ▼                               │
//! │                   ┌────────────────┐                       │
//! │                   │ labtrack-core  │                       │
//! │                   │  (THE LOGIC)   │                       │
//! │                   └────────────────┘                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the reference server
//! labtrack serve --host 127.0.0.1 --port 8080
//!
//! # Client operations
//! labtrack calendar --month 2024-03
//! labtrack record --date 2024-03-05 --refrigerator 4.5 --freezer -20 \
//!     --ln2 80 --room 22 --humidity 45
//! labtrack yearly --year 2024
//! labtrack export --year 2024
//! ```

use clap::Parser;
use labtrack::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // LABTRACK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("LABTRACK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "labtrack=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && cli.shows_banner() {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the LabTrack startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗      █████╗ ██████╗ ████████╗██████╗  █████╗  ██████╗██╗  ██╗
  ██║     ██╔══██╗██╔══██╗╚══██╔══╝██╔══██╗██╔══██╗██╔════╝██║ ██╔╝
  ██║     ███████║██████╔╝   ██║   ██████╔╝███████║██║     █████╔╝
  ██║     ██╔══██║██╔══██╗   ██║   ██╔══██╗██╔══██║██║     ██╔═██╗
  ███████╗██║  ██║██████╔╝   ██║   ██║  ██║██║  ██║╚██████╗██║  ██╗
  ╚══════╝╚═╝  ╚═╝╚═════╝    ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝

  Laboratory Temperature Tracking v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
