//! # API Request/Response Types
//!
//! JSON structures shared by the reference server and the HTTP client.

use labtrack_core::{DateRange, LabTrackError, dates::parse_date};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// DATA ENVELOPE
// =============================================================================

/// `{ "data": ... }` envelope used by every read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// =============================================================================
// ACKNOWLEDGEMENT
// =============================================================================

/// `{ success, message? }` reply to writes, uploads and rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AckResponse {
    /// Create a success response.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// `?date=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleQuery {
    #[serde(default)]
    pub date: Option<String>,
}

impl SampleQuery {
    pub fn parse(&self) -> Result<chrono::NaiveDate, LabTrackError> {
        let date = self
            .date
            .as_deref()
            .ok_or(LabTrackError::EmptyField("date"))?;
        parse_date(date)
    }
}

/// `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl RangeQuery {
    /// Build the query string for a range.
    pub fn from_range(range: &DateRange) -> Self {
        Self {
            start_date: Some(range.start().to_string()),
            end_date: Some(range.end().to_string()),
        }
    }

    /// Validate both dates and their order.
    pub fn to_range(&self) -> Result<DateRange, LabTrackError> {
        let start = self
            .start_date
            .as_deref()
            .ok_or(LabTrackError::EmptyField("start_date"))?;
        let end = self
            .end_date
            .as_deref()
            .ok_or(LabTrackError::EmptyField("end_date"))?;
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    /// Render as a URL query string.
    pub fn to_query_string(&self) -> String {
        format!(
            "start_date={}&end_date={}",
            self.start_date.as_deref().unwrap_or_default(),
            self.end_date.as_deref().unwrap_or_default()
        )
    }
}

// =============================================================================
// CHAT
// =============================================================================

/// Chat request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat reply body. The reply may contain HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
