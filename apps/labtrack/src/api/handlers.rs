//! # API Endpoint Handlers
//!
//! Temperature endpoints of the reference server.

use super::{
    AppState,
    types::{AckResponse, DataResponse, HealthResponse, RangeQuery, SampleQuery},
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use labtrack_core::{LabTrackError, MeasurementSample, UpsertOutcome};

/// 400 with `{ success: false, message }`.
fn bad_request(error: &LabTrackError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(AckResponse::error(error.to_string())),
    )
        .into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SAMPLE HANDLERS
// =============================================================================

/// `GET /temperature-data?date=` → the day's sample or `null`.
pub async fn get_sample_handler(
    State(state): State<AppState>,
    Query(query): Query<SampleQuery>,
) -> Response {
    let date = match query.parse() {
        Ok(date) => date,
        Err(e) => return bad_request(&e),
    };

    let store = state.store.read().await;
    let sample = store.get(date).cloned();
    (StatusCode::OK, Json(DataResponse::new(sample))).into_response()
}

/// `POST /temperature-data` → validate, re-derive flags and upsert.
pub async fn save_sample_handler(
    State(state): State<AppState>,
    payload: Result<Json<MeasurementSample>, JsonRejection>,
) -> Response {
    let sample = match payload {
        Ok(Json(sample)) => sample,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AckResponse::error(format!(
                    "Invalid sample: {}",
                    rejection.body_text()
                ))),
            )
                .into_response();
        }
    };

    let date = sample.date;
    let mut store = state.store.write().await;
    match store.upsert(sample) {
        Ok(outcome) => {
            tracing::info!(%date, ?outcome, "Sample stored");
            let message = match outcome {
                UpsertOutcome::Inserted => "Data saved successfully",
                UpsertOutcome::Updated => "Data updated successfully",
            };
            (StatusCode::OK, Json(AckResponse::ok(message))).into_response()
        }
        Err(e) => {
            tracing::debug!(%date, error = %e, "Sample rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(AckResponse::error(e.to_string())),
            )
                .into_response()
        }
    }
}

// =============================================================================
// COMPLIANCE HANDLERS
// =============================================================================

/// `GET /temperature-compliance` → summary over the range.
pub async fn compliance_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let range = match query.to_range() {
        Ok(range) => range,
        Err(e) => return bad_request(&e),
    };

    let store = state.store.read().await;
    (StatusCode::OK, Json(DataResponse::new(store.summary(&range)))).into_response()
}

/// `GET /temperature-compliance-yearly` → summary with monthly breakdown.
pub async fn yearly_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let range = match query.to_range() {
        Ok(range) => range,
        Err(e) => return bad_request(&e),
    };

    let store = state.store.read().await;
    (StatusCode::OK, Json(DataResponse::new(store.yearly(&range)))).into_response()
}

// =============================================================================
// EXPORT HANDLER
// =============================================================================

/// `GET /export-temperature-data` → CSV attachment.
pub async fn export_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let range = match query.to_range() {
        Ok(range) => range,
        Err(e) => return bad_request(&e),
    };

    let file = state.store.read().await.export_csv(&range);
    tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "CSV export");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, file.content_disposition()),
        ],
        file.bytes,
    )
        .into_response()
}
