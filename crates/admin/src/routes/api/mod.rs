//! API route handlers for admin.
//!
//! JSON endpoints over the same content and analytics the panel shows.
//! Unauthenticated requests get `401` instead of a login redirect.

pub mod analytics;
pub mod store;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(store::router())
        .merge(analytics::router())
}
