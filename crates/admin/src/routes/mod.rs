//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Database readiness check
//!
//! # Auth (username and password)
//! GET  /auth/login                 - Login page
//! POST /auth/login                 - Check credentials (rate limited)
//! POST /auth/logout                - Logout
//!
//! # Panel
//! GET  /                           - Editor, uploads and analytics
//! POST /settings                   - Save editor form
//! POST /reset                      - Restore default content
//! POST /uploads/{field}            - Upload a file (multipart field `file`)
//! POST /uploads/{field}/remove     - Clear a media field
//! GET  /preview                    - Landing page preview
//!
//! # API
//! GET   /api/store                 - Page content
//! PATCH /api/store                 - Merge a partial change
//! POST  /api/store/reset           - Restore default content
//! GET   /api/analytics             - Analytics summary
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod editor;
pub mod flash;
pub mod preview;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use linkbio_core::media::MAX_VIDEO_BYTES;

use crate::state::AppState;

/// Room for multipart framing around the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_VIDEO_BYTES + 1024 * 1024;

/// Build the upload router with its larger body limit.
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads/{field}", post(uploads::upload))
        .route("/uploads/{field}/remove", post(uploads::remove))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/settings", post(editor::save))
        .route("/reset", post(editor::reset))
        .route("/preview", get(preview::preview))
        .merge(upload_routes())
        .merge(auth::router())
        .merge(api::router())
}
