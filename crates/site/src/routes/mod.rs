//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page (records a page view)
//! GET  /go/{group}/{index}     - Record a button click, 303 to its destination
//! POST /api/events             - Client-reported analytics event (rate limited)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Database readiness check
//! ```

pub mod api;
pub mod go;
pub mod landing;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tracing::warn;

use linkbio_core::EventType;

use crate::db::AnalyticsRepository;
use crate::middleware::api_rate_limiter;
use crate::state::AppState;

/// Largest accepted analytics event body.
const MAX_EVENT_BODY_BYTES: usize = 16 * 1024;

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(api::events::create))
        .layer(DefaultBodyLimit::max(MAX_EVENT_BODY_BYTES))
        .layer(api_rate_limiter())
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing::landing))
        .route("/go/{group}/{index}", get(go::follow))
        .nest("/api", api_routes())
}

/// Record an analytics event without holding up the response.
///
/// Failures are logged and otherwise ignored.
pub(crate) fn record_event(
    state: &AppState,
    event_type: EventType,
    event_data: serde_json::Value,
    user_agent: Option<String>,
) {
    let pool = state.pool().clone();
    tokio::spawn(async move {
        if let Err(e) = AnalyticsRepository::new(&pool)
            .record(event_type, &event_data, user_agent.as_deref())
            .await
        {
            warn!(error = %e, event_type = %event_type, "Failed to record analytics event");
        }
    });
}
