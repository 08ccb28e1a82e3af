//! Analytics API handler.

use axum::{Json, Router, extract::State, routing::get};

use linkbio_core::AnalyticsSummary;

use crate::{
    db::AnalyticsQueries, error::Result, middleware::RequireAdminAuth, state::AppState,
};

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/analytics", get(summary))
}

/// View and click totals, per-button counts and recent activity.
///
/// # Errors
///
/// Returns an error if the analytics queries fail.
pub async fn summary(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSummary>> {
    let summary = AnalyticsQueries::new(state.pool()).summary().await?;
    Ok(Json(summary))
}
