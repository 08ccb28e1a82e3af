//! Content editor form handlers.
//!
//! The panel posts every editable field as a flat form. Action fields use
//! `<group>.<index>.<field>` names (`main.0.title`, `secondary.1.href`) and
//! social links use `social.<network>`.

use std::collections::HashMap;

use axum::{Form, extract::State, response::Redirect};
use thiserror::Error;
use tracing::{info, instrument, warn};

use linkbio_core::store::ActionField;
use linkbio_core::{ActionGroup, StoreData, StorePatch};

use crate::middleware::RequireAdminAuth;
use crate::routes::flash::Flash;
use crate::state::AppState;

/// A form key that does not name an editable field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid form field: {0}")]
pub struct InvalidField(pub String);

/// Turn the posted editor form into a patch against `base`.
///
/// # Errors
///
/// Returns [`InvalidField`] for unknown keys or action indexes past the end
/// of the list.
pub fn patch_from_form(
    base: &StoreData,
    form: HashMap<String, String>,
) -> Result<StorePatch, InvalidField> {
    let mut patch = StorePatch::default();
    let mut social = base.social_links.clone();
    let mut social_touched = false;

    for (key, value) in form {
        match key.as_str() {
            "name" => patch.name = Some(value),
            "description" => patch.description = Some(value),
            "logo" => patch.logo = Some(value),
            "whatsapp_message" => patch.whatsapp_message = Some(value),
            "social.instagram" => social.instagram = value,
            "social.tiktok" => social.tiktok = value,
            "social.phone" => social.phone = value,
            "social.location" => social.location = value,
            _ => {
                set_action(&mut patch, base, &key, value)?;
                continue;
            }
        }
        social_touched |= key.starts_with("social.");
    }

    if social_touched {
        patch.social_links = Some(social);
    }
    Ok(patch)
}

fn set_action(
    patch: &mut StorePatch,
    base: &StoreData,
    key: &str,
    value: String,
) -> Result<(), InvalidField> {
    let invalid = || InvalidField(key.to_owned());

    let mut parts = key.splitn(3, '.');
    let (Some(group), Some(index), Some(field)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let group: ActionGroup = group.parse().map_err(|_| invalid())?;
    let index: usize = index.parse().map_err(|_| invalid())?;
    let field: ActionField = field.parse().map_err(|_| invalid())?;

    if patch.set_action(base, group, index, field, value) {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Save the editor form.
///
/// POST /settings
#[instrument(skip(state, admin, form), fields(admin = %admin.username))]
pub async fn save(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Form(form): Form<HashMap<String, String>>,
) -> Redirect {
    let base = state.store().current().await;

    let patch = match patch_from_form(&base, form) {
        Ok(patch) => patch,
        Err(e) => {
            warn!(error = %e, "Rejected editor form");
            return Flash::InvalidForm.redirect();
        }
    };

    if patch.is_empty() {
        return Flash::Saved.redirect();
    }

    let (_, status) = state.store().update(patch).await;
    info!(sync = ?status, "Saved page content");
    Flash::after_sync(status, Flash::Saved).redirect()
}

/// Restore default content.
///
/// POST /reset
#[instrument(skip(state, admin), fields(admin = %admin.username))]
pub async fn reset(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Redirect {
    let (_, status) = state.store().reset().await;
    info!(sync = ?status, "Reset page content to defaults");
    Flash::after_sync(status, Flash::Reset).redirect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_text_fields() {
        let base = StoreData::default();
        let patch = patch_from_form(
            &base,
            form(&[("name", "Loja Nova"), ("whatsapp_message", "Oi!")]),
        )
        .unwrap();

        assert_eq!(patch.name.as_deref(), Some("Loja Nova"));
        assert_eq!(patch.whatsapp_message.as_deref(), Some("Oi!"));
        assert!(patch.description.is_none());
        assert!(patch.social_links.is_none());
        assert!(patch.main_actions.is_none());
    }

    #[test]
    fn test_social_links_keep_untouched_networks() {
        let base = StoreData::default();
        let patch =
            patch_from_form(&base, form(&[("social.instagram", "https://instagram.com/loja")]))
                .unwrap();

        let social = patch.social_links.unwrap();
        assert_eq!(social.instagram, "https://instagram.com/loja");
        assert_eq!(social.tiktok, base.social_links.tiktok);
    }

    #[test]
    fn test_action_fields_carry_full_list() {
        let base = StoreData::default();
        let patch = patch_from_form(
            &base,
            form(&[("main.1.title", "ENDEREÇO"), ("main.1.href", "https://maps.app")]),
        )
        .unwrap();

        let main = patch.main_actions.unwrap();
        assert_eq!(main.len(), base.main_actions.len());
        assert_eq!(main[1].title, "ENDEREÇO");
        assert_eq!(main[1].href, "https://maps.app");
        assert_eq!(main[1].icon, base.main_actions[1].icon);
        assert_eq!(main[0], base.main_actions[0]);
        assert!(patch.secondary_actions.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_and_unknown_keys() {
        let base = StoreData::default();

        assert_eq!(
            patch_from_form(&base, form(&[("main.9.title", "X")])),
            Err(InvalidField("main.9.title".to_string()))
        );
        assert!(patch_from_form(&base, form(&[("main.0.icon", "Star")])).is_err());
        assert!(patch_from_form(&base, form(&[("tertiary.0.title", "X")])).is_err());
        assert!(patch_from_form(&base, form(&[("password", "x")])).is_err());
    }

    #[test]
    fn test_empty_form_is_empty_patch() {
        let patch = patch_from_form(&StoreData::default(), HashMap::new()).unwrap();
        assert!(patch.is_empty());
    }
}
