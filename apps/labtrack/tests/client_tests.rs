//! Integration tests for the HTTP client and chat session.
//!
//! Each test binds the reference server (or a small stub) on an ephemeral
//! localhost port and talks to it over real HTTP.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::{Json, Router, routing::post};
use chrono::NaiveDate;
use labtrack::api::{AckResponse, AppState, ChatRequest, ChatResponse, create_router};
use labtrack::client::{ClientError, LabTrackClient};
use labtrack::session::ChatSession;
use labtrack_core::chat::FALLBACK_REPLY;
use labtrack_core::{
    CompletenessPolicy, DateRange, LabTrackError, MeasurementSample, MonthCursor, Parameter,
    Readings, Speaker, UploadDocument,
};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Serve `router` on 127.0.0.1 and return a client pointed at it.
async fn spawn(router: Router) -> LabTrackClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    LabTrackClient::new(&format!("http://{}/", addr))
}

async fn spawn_reference_server() -> LabTrackClient {
    spawn(create_router(AppState::default())).await
}

async fn chat_stub(Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    Json(ChatResponse {
        response: format!("<p>You asked: {}</p>", req.message),
    })
}

async fn upload_stub(Json(doc): Json<UploadDocument>) -> Json<AckResponse> {
    if doc.category == "archive" {
        Json(AckResponse::error("Category is closed"))
    } else {
        Json(AckResponse::ok(format!("Stored {}", doc.title)))
    }
}

async fn spawn_assistant_stub() -> LabTrackClient {
    let router = Router::new()
        .route("/chat", post(chat_stub))
        .route("/upload", post(upload_stub));
    spawn(router).await
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn full_day(d: u32, fridge: f64, action: &str) -> MeasurementSample {
    let readings = Readings::new()
        .with(Parameter::Refrigerator, fridge)
        .with(Parameter::Freezer, -20.0)
        .with(Parameter::Ln2, 75.0)
        .with(Parameter::Room, 21.0)
        .with(Parameter::Humidity, 40.0);
    MeasurementSample::record(date(d), readings, action, CompletenessPolicy::Strict).unwrap()
}

// =============================================================================
// TEMPERATURE ENDPOINTS
// =============================================================================

#[tokio::test]
async fn test_health() {
    let client = spawn_reference_server().await;
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_base_url_trims_trailing_slash() {
    let client = LabTrackClient::new("http://127.0.0.1:8080///");
    assert_eq!(client.base_url(), "http://127.0.0.1:8080");
}

#[tokio::test]
async fn test_save_and_fetch_sample() {
    let client = spawn_reference_server().await;

    let message = client.save_sample(&full_day(4, 5.0, "")).await.unwrap();
    assert_eq!(message, "Data saved successfully");

    let fetched = client.fetch_sample(date(4)).await.unwrap().unwrap();
    assert!(fetched.is_compliant);
    assert_eq!(fetched.readings.get(Parameter::Refrigerator), Some(5.0));

    assert!(client.fetch_sample(date(5)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_rejection_maps_to_rejected() {
    let client = spawn_reference_server().await;

    let sample = MeasurementSample::new(
        date(6),
        Readings::new().with(Parameter::Humidity, 85.0),
        "",
    );
    let err = client.save_sample(&sample).await.unwrap_err();
    match err {
        ClientError::Rejected(message) => {
            assert_eq!(message, "Corrective action is required for out-of-range values");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_month_collects_recorded_days() {
    let client = spawn_reference_server().await;
    client.save_sample(&full_day(1, 5.0, "")).await.unwrap();
    client
        .save_sample(&full_day(15, 11.0, "Door left open, closed"))
        .await
        .unwrap();
    client.save_sample(&full_day(31, 5.0, "")).await.unwrap();

    let samples = client
        .fetch_month(MonthCursor::new(2024, 3).unwrap())
        .await
        .unwrap();
    let days: Vec<_> = samples.keys().copied().collect();
    assert_eq!(days, vec![date(1), date(15), date(31)]);
    assert!(!samples[&date(15)].is_compliant);
}

#[tokio::test]
async fn test_compliance_and_yearly() {
    let client = spawn_reference_server().await;
    client.save_sample(&full_day(1, 5.0, "")).await.unwrap();
    client
        .save_sample(&full_day(2, 1.0, "Thermostat adjusted"))
        .await
        .unwrap();

    let summary = client
        .fetch_compliance(&DateRange::month(2024, 3).unwrap())
        .await
        .unwrap();
    assert_eq!((summary.compliant_days, summary.total_days), (1, 2));

    let yearly = client
        .fetch_yearly(&DateRange::year(2024).unwrap())
        .await
        .unwrap();
    assert_eq!(yearly.months.len(), 12);
    assert_eq!(yearly.months[2].summary.total_days, 2);
}

#[tokio::test]
async fn test_export_csv_uses_range_filename() {
    let client = spawn_reference_server().await;
    client.save_sample(&full_day(9, 5.0, "")).await.unwrap();

    let file = client
        .export_csv(&DateRange::month(2024, 3).unwrap())
        .await
        .unwrap();
    assert_eq!(file.filename, "Temperature_Data_March_2024.csv");
    let text = String::from_utf8(file.bytes).unwrap();
    assert!(text.contains("2024-03-09,"));
}

#[tokio::test]
async fn test_unreachable_server() {
    let client = LabTrackClient::new("http://127.0.0.1:1");
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::ConnectionFailed(_)));
}

#[tokio::test]
async fn test_unknown_route_is_status_error() {
    let client = spawn_reference_server().await;
    let err = client.chat("hello").await.unwrap_err();
    assert!(matches!(err, ClientError::Status(404, _)));
}

// =============================================================================
// UPLOAD
// =============================================================================

#[tokio::test]
async fn test_upload_validates_before_sending() {
    // Nothing listens here; validation must fail first.
    let client = LabTrackClient::new("http://127.0.0.1:1");
    let doc = UploadDocument::new("SOP", "too short", "procedures");

    let err = client.upload(&doc).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(LabTrackError::ContentTooShort { min: 50, .. })
    ));
}

#[tokio::test]
async fn test_upload_success_and_rejection() {
    let client = spawn_assistant_stub().await;
    let content = "Check the LN2 dewar level every morning before 9am. ".repeat(2);

    let doc = UploadDocument::new("Dewar SOP", content.clone(), "procedures");
    assert_eq!(client.upload(&doc).await.unwrap(), "Stored Dewar SOP");

    let doc = UploadDocument::new("Old SOP", content, "archive");
    let err = client.upload(&doc).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(m) if m == "Category is closed"));
}

// =============================================================================
// CHAT SESSION
// =============================================================================

#[tokio::test]
async fn test_chat_strips_markup() {
    let client = spawn_assistant_stub().await;
    let mut session = ChatSession::new(client);

    let reply = session.send("  freezer range?  ").await.unwrap().unwrap();
    assert_eq!(reply.speaker, Speaker::Assistant);
    assert_eq!(reply.text.trim(), "You asked: freezer range?");
    assert_eq!(session.transcript().len(), 2);
}

#[tokio::test]
async fn test_chat_blank_input_is_ignored() {
    let client = spawn_assistant_stub().await;
    let mut session = ChatSession::new(client);

    assert!(session.send("   ").await.unwrap().is_none());
    assert!(session.transcript().is_empty());
}

#[tokio::test]
async fn test_chat_failure_records_fallback() {
    let client = LabTrackClient::new("http://127.0.0.1:1");
    let mut session = ChatSession::new(client);

    let reply = session.send("hello").await.unwrap().unwrap();
    assert_eq!(reply.text, FALLBACK_REPLY);
    assert_eq!(session.transcript().len(), 2);
}

#[tokio::test]
async fn test_chat_export_and_clear() {
    let client = spawn_assistant_stub().await;
    let mut session = ChatSession::new(client);
    let at = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    assert_eq!(session.export(at).unwrap_err(), LabTrackError::NoMessages);

    session.send("room temp?").await.unwrap();
    let file = session.export(at).unwrap();
    assert_eq!(file.filename, "chat-export-2024-03-15.txt");
    let text = String::from_utf8(file.bytes).unwrap();
    assert!(text.starts_with("LabTrack Chat Export\nGenerated: 2024-03-15 09:30:00\n\n"));
    assert!(text.contains("User: room temp?\n\n"));

    session.clear();
    assert!(session.transcript().is_empty());
}
