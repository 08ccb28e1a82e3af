//! Tracked button redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header::USER_AGENT},
    response::Redirect,
};
use tracing::instrument;

use linkbio_core::{ActionGroup, ButtonClick, EventType, resolve_action_href};

use crate::error::{AppError, Result};
use crate::routes::record_event;
use crate::state::AppState;

/// Record a click on `group`/`index` and send the visitor on (303).
///
/// The index is looked up in cached content first; if the page was rendered
/// from newer content than the cache holds, a fresh load is tried once.
#[instrument(skip(state, headers))]
pub async fn follow(
    State(state): State<AppState>,
    Path((group, index)): Path<(String, usize)>,
    headers: HeaderMap,
) -> Result<Redirect> {
    let group: ActionGroup = group
        .parse()
        .map_err(|_| AppError::NotFound(format!("button group {group}")))?;

    let mut data = state.content().get().await;
    if data.action(group, index).is_none() {
        data = state.content().get_fresh().await;
    }
    let action = data
        .action(group, index)
        .ok_or_else(|| AppError::NotFound(format!("button {group}/{index}")))?;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let payload = serde_json::to_value(ButtonClick::new(&action.title, &action.href))
        .unwrap_or_default();
    record_event(&state, EventType::ButtonClick, payload, user_agent);

    let target = redirect_target(&resolve_action_href(action, &data.whatsapp_message));
    Ok(Redirect::to(&target))
}

/// In-page anchors and empty links point back at the landing page.
fn redirect_target(href: &str) -> String {
    if href.is_empty() {
        "/".to_string()
    } else if href.starts_with('#') {
        format!("/{href}")
    } else {
        href.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target("https://catalogo.com"), "https://catalogo.com");
        assert_eq!(redirect_target("#frete"), "/#frete");
        assert_eq!(redirect_target(""), "/");
        assert_eq!(redirect_target("tel:+5511"), "tel:+5511");
    }
}
