//! Landing page preview for the panel.

use axum::extract::State;

use linkbio_site::routes::landing::{LandingTemplate, RenderMode};

use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Render the landing page from the admin's in-memory content.
///
/// Links point straight at their destinations and nothing is recorded.
///
/// GET /preview
pub async fn preview(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> LandingTemplate {
    let data = state.store().current().await;
    LandingTemplate::new(
        &data,
        &state.config().video,
        &RenderMode::Preview {
            back_url: "/".to_owned(),
        },
    )
}
