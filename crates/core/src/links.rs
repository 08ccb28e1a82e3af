//! Action destination resolution.
//!
//! WhatsApp buttons carry only the phone number in their stored `href`; the
//! message template is attached when the page is rendered.

pub use crate::store::ActionGroup;
use crate::store::{Action, ActionIcon};

const WHATSAPP_HOST: &str = "wa.me";

/// Resolve the URL a button should open.
///
/// A `MessageCircle` action whose `href` points at `wa.me` becomes
/// `https://wa.me/<phone>?text=<encoded message>`. Any query string already
/// present on the stored link is dropped. All other actions use `href` as is.
///
/// ```
/// use linkbio_core::{resolve_action_href, StoreData};
///
/// let data = StoreData::default();
/// let whatsapp = &data.main_actions[2];
/// let url = resolve_action_href(whatsapp, "Oi!");
/// assert_eq!(url, "https://wa.me/5511999999999?text=Oi%21");
/// ```
#[must_use]
pub fn resolve_action_href(action: &Action, whatsapp_message: &str) -> String {
    if action.icon != ActionIcon::MessageCircle.as_str() {
        return action.href.clone();
    }

    match whatsapp_phone(&action.href) {
        Some(phone) => format!(
            "https://{WHATSAPP_HOST}/{phone}?text={}",
            urlencoding::encode(whatsapp_message)
        ),
        None => action.href.clone(),
    }
}

/// Extract the phone number from a `wa.me` link.
fn whatsapp_phone(href: &str) -> Option<&str> {
    if !href.contains(WHATSAPP_HOST) {
        return None;
    }

    let marker = format!("{WHATSAPP_HOST}/");
    let rest = href
        .find(&marker)
        .and_then(|pos| href.get(pos + marker.len()..))
        .unwrap_or("");

    Some(rest.split(['?', '#']).next().unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(icon: &str, href: &str) -> Action {
        Action {
            title: "ATENDIMENTO".to_owned(),
            subtitle: String::new(),
            href: href.to_owned(),
            icon: icon.to_owned(),
        }
    }

    #[test]
    fn test_whatsapp_link_gets_message() {
        let url = resolve_action_href(
            &action("MessageCircle", "https://wa.me/5511999999999"),
            "Olá! Pode me ajudar?",
        );
        assert_eq!(
            url,
            "https://wa.me/5511999999999?text=Ol%C3%A1%21%20Pode%20me%20ajudar%3F"
        );
    }

    #[test]
    fn test_existing_query_is_replaced() {
        let url = resolve_action_href(
            &action("MessageCircle", "https://wa.me/5511888888888?text=old"),
            "novo",
        );
        assert_eq!(url, "https://wa.me/5511888888888?text=novo");
    }

    #[test]
    fn test_other_icons_unchanged() {
        let href = "https://wa.me/5511999999999";
        assert_eq!(resolve_action_href(&action("MapPin", href), "x"), href);
        assert_eq!(resolve_action_href(&action("Rocket", href), "x"), href);
    }

    #[test]
    fn test_non_whatsapp_message_action_unchanged() {
        let href = "https://t.me/loja";
        assert_eq!(resolve_action_href(&action("MessageCircle", href), "x"), href);
    }

    #[test]
    fn test_empty_message() {
        let url = resolve_action_href(&action("MessageCircle", "wa.me/123"), "");
        assert_eq!(url, "https://wa.me/123?text=");
    }
}
