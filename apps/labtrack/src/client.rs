//! # LabTrack HTTP Client
//!
//! Wrapper around the temperature, chat and upload endpoints.

use crate::api::{AckResponse, ChatRequest, ChatResponse, DataResponse, HealthResponse, RangeQuery};
use chrono::NaiveDate;
use labtrack_core::export::{CSV_CONTENT_TYPE, ExportFile, export_filename};
use labtrack_core::{
    ComplianceSummary, DateRange, LabTrackError, MeasurementSample, MonthCursor, UploadDocument,
    YearlySummary,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::task::JoinSet;

/// Errors from the client layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Cannot reach the server.
    #[error("Cannot connect to LabTrack at {0}")]
    ConnectionFailed(String),

    /// 429 Too Many Requests.
    #[error("Rate limited: too many requests")]
    RateLimited,

    /// Any other non-2xx response.
    #[error("Server error ({0}): {1}")]
    Status(u16, String),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The server answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Input failed local validation.
    #[error(transparent)]
    Validation(#[from] LabTrackError),

    /// Config file could not be parsed or written.
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP client for a LabTrack server.
#[derive(Clone)]
pub struct LabTrackClient {
    http: reqwest::Client,
    base_url: String,
}

impl LabTrackClient {
    /// Create a client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request and map connection errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        req.send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))
    }

    /// Turn non-2xx responses into errors.
    ///
    /// A `{ success: false, message }` body becomes `Rejected`.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<AckResponse>(&body) {
            Ok(AckResponse {
                success: false,
                message: Some(message),
            }) => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::Status(status.as_u16(), body)),
        }
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        Self::check_status(resp)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Read an acknowledgement, surfacing `success: false` as `Rejected`.
    async fn read_ack(resp: reqwest::Response) -> Result<String, ClientError> {
        let ack: AckResponse = Self::read_json(resp).await?;
        let message = ack.message.unwrap_or_default();
        if ack.success {
            Ok(message)
        } else {
            Err(ClientError::Rejected(message))
        }
    }

    // =========================================================================
    // ENDPOINTS
    // =========================================================================

    /// GET /health
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.send(self.request(reqwest::Method::GET, "/health")).await?;
        Self::read_json(resp).await
    }

    /// GET /temperature-data → the day's sample, if any.
    pub async fn fetch_sample(
        &self,
        date: NaiveDate,
    ) -> Result<Option<MeasurementSample>, ClientError> {
        let path = format!("/temperature-data?date={}", date);
        let resp = self.send(self.request(reqwest::Method::GET, &path)).await?;
        let body: DataResponse<Option<MeasurementSample>> = Self::read_json(resp).await?;
        Ok(body.data)
    }

    /// POST /temperature-data → server message on success.
    pub async fn save_sample(&self, sample: &MeasurementSample) -> Result<String, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/temperature-data")
            .json(sample);
        let resp = self.send(req).await?;
        Self::read_ack(resp).await
    }

    /// GET /temperature-compliance
    pub async fn fetch_compliance(
        &self,
        range: &DateRange,
    ) -> Result<ComplianceSummary, ClientError> {
        let path = format!(
            "/temperature-compliance?{}",
            RangeQuery::from_range(range).to_query_string()
        );
        let resp = self.send(self.request(reqwest::Method::GET, &path)).await?;
        let body: DataResponse<ComplianceSummary> = Self::read_json(resp).await?;
        Ok(body.data)
    }

    /// GET /temperature-compliance-yearly
    pub async fn fetch_yearly(&self, range: &DateRange) -> Result<YearlySummary, ClientError> {
        let path = format!(
            "/temperature-compliance-yearly?{}",
            RangeQuery::from_range(range).to_query_string()
        );
        let resp = self.send(self.request(reqwest::Method::GET, &path)).await?;
        let body: DataResponse<YearlySummary> = Self::read_json(resp).await?;
        Ok(body.data)
    }

    /// GET /export-temperature-data → CSV named after the range.
    pub async fn export_csv(&self, range: &DateRange) -> Result<ExportFile, ClientError> {
        let path = format!(
            "/export-temperature-data?{}",
            RangeQuery::from_range(range).to_query_string()
        );
        let resp = self.send(self.request(reqwest::Method::GET, &path)).await?;
        let bytes = Self::check_status(resp)
            .await?
            .bytes()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(ExportFile {
            filename: export_filename(range),
            content_type: CSV_CONTENT_TYPE,
            bytes: bytes.to_vec(),
        })
    }

    /// Fetch every day of a month concurrently.
    ///
    /// Days that fail are logged and left out, so they render as no data.
    pub async fn fetch_month(
        &self,
        cursor: MonthCursor,
    ) -> Result<BTreeMap<NaiveDate, MeasurementSample>, ClientError> {
        let range = cursor.range()?;
        let mut tasks = JoinSet::new();
        for date in range.start().iter_days().take_while(|d| *d <= range.end()) {
            let client = self.clone();
            tasks.spawn(async move { (date, client.fetch_sample(date).await) });
        }

        let mut samples = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(Some(sample)))) => {
                    samples.insert(sample.date, sample);
                }
                Ok((_, Ok(None))) => {}
                Ok((date, Err(e))) => tracing::warn!(%date, "Failed to fetch day: {}", e),
                Err(e) => tracing::warn!("Day fetch task failed: {}", e),
            }
        }
        Ok(samples)
    }

    /// POST /chat → raw reply (may contain HTML).
    pub async fn chat(&self, message: &str) -> Result<String, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/chat")
            .json(&ChatRequest {
                message: message.to_string(),
            });
        let resp = self.send(req).await?;
        let body: ChatResponse = Self::read_json(resp).await?;
        Ok(body.response)
    }

    /// POST /upload after local validation.
    pub async fn upload(&self, document: &UploadDocument) -> Result<String, ClientError> {
        document.validate()?;
        let req = self
            .request(reqwest::Method::POST, "/upload")
            .json(document);
        let resp = self.send(req).await?;
        Self::read_ack(resp).await
    }
}
