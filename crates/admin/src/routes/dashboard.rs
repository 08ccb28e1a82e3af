//! Panel route handler: content editor, media uploads and analytics.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tracing::{instrument, warn};

use linkbio_core::store::BUILTIN_VIDEO_SENTINEL;
use linkbio_core::{AnalyticsSummary, MediaField, StoreData};

use crate::db::AnalyticsQueries;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::routes::flash::FlashParams;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Upload slot for one media field.
#[derive(Debug, Clone)]
pub struct MediaFieldView {
    /// Path segment used by the upload and remove forms.
    pub name: &'static str,
    pub label: &'static str,
    /// URL of the uploaded file, if one is set.
    pub current_url: Option<String>,
    pub is_video: bool,
    pub accept: String,
    pub max_mb: usize,
}

impl MediaFieldView {
    fn new(field: MediaField, data: &StoreData) -> Self {
        let (label, value) = match field {
            MediaField::LogoImage => ("Logo", &data.logo_image),
            MediaField::BackgroundImage => ("Imagem de Fundo", &data.background_image),
            MediaField::BackgroundVideo => ("Vídeo de Fundo", &data.background_video),
        };
        let current_url = (!value.is_empty() && value != BUILTIN_VIDEO_SENTINEL)
            .then(|| value.clone());
        let kind = field.kind();

        Self {
            name: field.as_str(),
            label,
            current_url,
            is_video: field == MediaField::BackgroundVideo,
            accept: kind.accept_attribute(),
            max_mb: kind.max_bytes() / (1024 * 1024),
        }
    }

    /// All upload slots in panel order.
    #[must_use]
    pub fn all(data: &StoreData) -> Vec<Self> {
        [
            MediaField::BackgroundVideo,
            MediaField::BackgroundImage,
            MediaField::LogoImage,
        ]
        .into_iter()
        .map(|field| Self::new(field, data))
        .collect()
    }
}

// =============================================================================
// Template
// =============================================================================

/// Panel template.
#[derive(Template)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub admin_username: String,
    pub site_url: String,
    pub data: StoreData,
    pub media_fields: Vec<MediaFieldView>,
    /// `None` when analytics could not be loaded.
    pub analytics: Option<AnalyticsSummary>,
    pub success_message: Option<&'static str>,
    pub error_message: Option<&'static str>,
}

// =============================================================================
// Handler
// =============================================================================

/// Display the panel.
///
/// GET /
#[instrument(skip(state, admin, flash))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(flash): Query<FlashParams>,
) -> Html<String> {
    let data = state.store().current().await;

    let analytics = match AnalyticsQueries::new(state.pool()).summary().await {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!(error = %e, "Failed to load analytics");
            None
        }
    };

    let (success_message, error_message) = flash.messages();

    let template = DashboardTemplate {
        admin_username: admin.username.to_string(),
        site_url: state.config().site_url.clone(),
        media_fields: MediaFieldView::all(&data),
        data,
        analytics,
        success_message,
        error_message,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
}
