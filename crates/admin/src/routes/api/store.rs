//! Page content API handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use linkbio_core::{StoreData, StorePatch};

use crate::{middleware::RequireAdminAuth, services::SyncStatus, state::AppState};

/// Build the store router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/store", get(show).patch(update))
        .route("/api/store/reset", post(reset))
}

/// Content after a write, with whether it reached the database.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub data: StoreData,
    pub sync: SyncStatus,
}

/// Current page content.
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Json<StoreData> {
    Json(state.store().current().await)
}

/// Merge a partial change into the page content.
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(patch): Json<StorePatch>,
) -> Json<StoreResponse> {
    let (data, sync) = state.store().update(patch).await;
    Json(StoreResponse { data, sync })
}

/// Restore default page content.
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn reset(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Json<StoreResponse> {
    let (data, sync) = state.store().reset().await;
    Json(StoreResponse { data, sync })
}
