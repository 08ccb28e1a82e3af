//! Landing page route handler.
//!
//! The same template renders the public page and the admin preview. In
//! preview mode buttons link straight to their destinations and nothing is
//! recorded.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderMap, header::USER_AGENT},
    response::IntoResponse,
};
use tracing::instrument;

use linkbio_core::{
    ActionGroup, BackgroundMedia, EventType, StoreData, analytics::PageView, resolve_action_href,
};

use crate::config::VideoConfig;
use crate::filters;
use crate::routes::record_event;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// A call-to-action button as rendered.
#[derive(Debug, Clone)]
pub struct ActionView {
    pub title: String,
    pub subtitle: String,
    pub href: String,
    pub icon: &'static str,
    /// Opens in a new tab.
    pub external: bool,
}

/// One of the round social buttons.
#[derive(Debug, Clone)]
pub struct SocialView {
    pub label: &'static str,
    pub icon: &'static str,
    pub href: String,
}

/// How the page is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Public page: buttons go through `/go/...` so clicks are recorded.
    Live,
    /// Admin preview: direct links and a way back to the panel.
    Preview { back_url: String },
}

// =============================================================================
// Template
// =============================================================================

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub logo_image: Option<String>,
    pub social_links: Vec<SocialView>,
    pub main_actions: Vec<ActionView>,
    pub secondary_actions: Vec<ActionView>,
    pub background: BackgroundMedia,
    /// JSON read by `video-background.js`.
    pub playback_policy: String,
    pub back_url: Option<String>,
}

impl LandingTemplate {
    /// Build the template for `data`.
    #[must_use]
    pub fn new(data: &StoreData, video: &VideoConfig, mode: &RenderMode) -> Self {
        let actions = |group| action_views(data, group, mode);
        let back_url = match mode {
            RenderMode::Live => None,
            RenderMode::Preview { back_url } => Some(back_url.clone()),
        };

        Self {
            name: data.name.clone(),
            description: data.description.clone(),
            logo: data.logo.clone(),
            logo_image: (!data.logo_image.is_empty()).then(|| data.logo_image.clone()),
            social_links: social_views(data),
            main_actions: actions(ActionGroup::Main),
            secondary_actions: actions(ActionGroup::Secondary),
            background: BackgroundMedia::resolve(data, &video.builtin_url),
            playback_policy: video.policy.to_data_attribute(),
            back_url,
        }
    }
}

fn action_views(data: &StoreData, group: ActionGroup, mode: &RenderMode) -> Vec<ActionView> {
    data.actions(group)
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let resolved = resolve_action_href(action, &data.whatsapp_message);
            let external = !resolved.starts_with('#');
            let href = match mode {
                RenderMode::Live => format!("/go/{group}/{index}"),
                RenderMode::Preview { .. } => resolved,
            };
            ActionView {
                title: action.title.clone(),
                subtitle: action.subtitle.clone(),
                href,
                icon: action.icon_kind().css_class(),
                external,
            }
        })
        .collect()
}

fn social_views(data: &StoreData) -> Vec<SocialView> {
    let links = &data.social_links;
    vec![
        SocialView {
            label: "Instagram",
            icon: "instagram",
            href: links.instagram.clone(),
        },
        SocialView {
            label: "TikTok",
            icon: "message",
            href: links.tiktok.clone(),
        },
        SocialView {
            label: "Telefone",
            icon: "phone",
            href: links.phone.clone(),
        },
        SocialView {
            label: "Localização",
            icon: "map-pin",
            href: links.location.clone(),
        },
    ]
}

// =============================================================================
// Handler
// =============================================================================

/// Display the landing page and record a page view.
#[instrument(skip(state, headers))]
pub async fn landing(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let data = state.content().get().await;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let payload = serde_json::to_value(PageView::default()).unwrap_or_default();
    record_event(&state, EventType::PageView, payload, user_agent);

    LandingTemplate::new(&data, &state.config().video, &RenderMode::Live)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_live_mode_routes_through_go() {
        let template =
            LandingTemplate::new(&StoreData::default(), &VideoConfig::default(), &RenderMode::Live);

        assert_eq!(template.main_actions[0].href, "/go/main/0");
        assert_eq!(template.secondary_actions[2].href, "/go/secondary/2");
        assert!(template.back_url.is_none());
        assert_eq!(template.social_links.len(), 4);
    }

    #[test]
    fn test_preview_mode_links_directly() {
        let data = StoreData::default();
        let template = LandingTemplate::new(
            &data,
            &VideoConfig::default(),
            &RenderMode::Preview {
                back_url: "/".to_string(),
            },
        );

        assert_eq!(template.main_actions[0].href, "https://catalogo.com");
        assert!(template.main_actions[2].href.starts_with("https://wa.me/5511999999999?text="));
        assert_eq!(template.secondary_actions[0].href, "#delivery");
        assert!(!template.secondary_actions[0].external);
        assert_eq!(template.back_url.as_deref(), Some("/"));
    }

    #[test]
    fn test_renders_content() {
        let data = StoreData {
            name: "Loja <Teste>".to_string(),
            ..StoreData::default()
        };
        let html = LandingTemplate::new(&data, &VideoConfig::default(), &RenderMode::Live)
            .render()
            .unwrap();

        assert!(html.contains("Loja &#60;Teste&#62;") || html.contains("Loja &lt;Teste&gt;"));
        assert!(html.contains("Link na Bio Premium"));
        assert!(html.contains("/static/video/background.mp4"));
        assert!(html.contains("data-policy="));
        assert!(!html.contains("Voltar ao Painel"));
    }

    #[test]
    fn test_text_logo_when_no_image() {
        let data = StoreData {
            logo_image: String::new(),
            ..StoreData::default()
        };
        let html = LandingTemplate::new(&data, &VideoConfig::default(), &RenderMode::Live)
            .render()
            .unwrap();
        assert!(html.contains("STYLE"));
    }
}
