//! # LabTrack HTTP API Module
//!
//! Reference server for the temperature endpoints, built on axum.
//!
//! ## Endpoints
//!
//! - `GET /temperature-data?date=` - One day's sample (or `null`)
//! - `POST /temperature-data` - Upsert a day's sample
//! - `GET /temperature-compliance?start_date=&end_date=` - Compliance summary
//! - `GET /temperature-compliance-yearly?start_date=&end_date=` - Summary with monthly breakdown
//! - `GET /export-temperature-data?start_date=&end_date=` - CSV download
//! - `GET /health` - Health check
//!
//! Samples live in memory only. `/chat` and `/upload` are served elsewhere.
//!
//! ## Configuration (Environment Variables)
//!
//! - `LABTRACK_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `LABTRACK_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    compliance_handler, export_handler, get_sample_handler, health_handler, save_sample_handler,
    yearly_handler,
};
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    AckResponse, ChatRequest, ChatResponse, DataResponse, HealthResponse, RangeQuery, SampleQuery,
};

use crate::client::ClientError;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use labtrack_core::{CompletenessPolicy, SampleStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the sample store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<SampleStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: SampleStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

impl Default for AppState {
    /// Empty store accepting partial days.
    fn default() -> Self {
        Self::new(SampleStore::new(CompletenessPolicy::Lenient))
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Origins served when `LABTRACK_CORS_ORIGINS` is unset or unusable.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Which origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CorsOrigins {
    Any,
    Listed(Vec<HeaderValue>),
}

impl CorsOrigins {
    /// Interpret a `LABTRACK_CORS_ORIGINS` value.
    ///
    /// `*` allows everything. A comma-separated list keeps its parsable
    /// entries. Unset, or a list with no valid entry, means localhost.
    fn from_setting(setting: Option<&str>) -> Self {
        if setting.map(str::trim) == Some("*") {
            return Self::Any;
        }
        let listed: Vec<HeaderValue> = setting
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("CORS: skipping origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        if listed.is_empty() {
            Self::Listed(LOCAL_ORIGINS.into_iter().map(HeaderValue::from_static).collect())
        } else {
            Self::Listed(listed)
        }
    }

    fn into_layer(self) -> CorsLayer {
        match self {
            Self::Any => {
                tracing::warn!("CORS: any origin may call the API");
                CorsLayer::permissive()
            }
            Self::Listed(origins) => {
                tracing::debug!(count = origins.len(), "CORS: origin allow-list");
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
                    .expose_headers([header::CONTENT_DISPOSITION])
            }
        }
    }
}

fn build_cors_layer() -> CorsLayer {
    let setting = std::env::var("LABTRACK_CORS_ORIGINS").ok();
    CorsOrigins::from_setting(setting.as_deref()).into_layer()
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - if enabled
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/temperature-data",
            get(handlers::get_sample_handler).post(handlers::save_sample_handler),
        )
        .route(
            "/temperature-compliance",
            get(handlers::compliance_handler),
        )
        .route(
            "/temperature-compliance-yearly",
            get(handlers::yearly_handler),
        )
        .route(
            "/export-temperature-data",
            get(handlers::export_handler),
        );

    if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(256 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer()),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Serve until Ctrl+C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), ClientError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("LabTrack reference server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutting down"),
                Err(e) => {
                    tracing::warn!("Cannot listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;
    Ok(())
}
