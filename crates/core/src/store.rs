//! Page content model.
//!
//! [`StoreData`] is the single document both binaries work on. The site
//! renders it, the admin edits it through [`StorePatch`] merges, and the
//! database stores it as one `store_settings` row.
//!
//! JSON keys are camelCase (`logoImage`, `mainActions`, ...) and every field
//! falls back to its default when missing, so snapshots written by an older
//! or newer build still load.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel value selecting the built-in background video.
pub const BUILTIN_VIDEO_SENTINEL: &str = "src/assets/background-video.mp4";

/// Reads `null` as the type's default. Missing keys are covered by
/// `#[serde(default)]`; this covers keys that are present but null.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A labeled call-to-action button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub href: String,
    /// Icon name. Unknown names render as [`ActionIcon::Grid3X3`].
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

impl Action {
    fn new(title: &str, subtitle: &str, href: &str, icon: ActionIcon) -> Self {
        Self {
            title: title.to_owned(),
            subtitle: subtitle.to_owned(),
            href: href.to_owned(),
            icon: icon.as_str().to_owned(),
        }
    }

    /// The icon to render for this action.
    #[must_use]
    pub fn icon_kind(&self) -> ActionIcon {
        ActionIcon::from_name(&self.icon)
    }
}

/// Icons the landing page knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionIcon {
    Grid3X3,
    MapPin,
    MessageCircle,
    Package,
    Truck,
    Star,
}

impl ActionIcon {
    /// Every known icon, in the order the editor lists them.
    pub const ALL: [Self; 6] = [
        Self::Grid3X3,
        Self::MapPin,
        Self::MessageCircle,
        Self::Package,
        Self::Truck,
        Self::Star,
    ];

    /// Resolve an icon by name, falling back to `Grid3X3`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == name)
            .unwrap_or(Self::Grid3X3)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid3X3 => "Grid3X3",
            Self::MapPin => "MapPin",
            Self::MessageCircle => "MessageCircle",
            Self::Package => "Package",
            Self::Truck => "Truck",
            Self::Star => "Star",
        }
    }

    /// CSS class suffix used by the stylesheet's icon sprites.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Grid3X3 => "grid",
            Self::MapPin => "map-pin",
            Self::MessageCircle => "message",
            Self::Package => "package",
            Self::Truck => "truck",
            Self::Star => "star",
        }
    }
}

impl fmt::Display for ActionIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which button list an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionGroup {
    Main,
    Secondary,
}

impl ActionGroup {
    /// Path segment used in `/go/{group}/{index}` and form field names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ActionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ActionGroup`] or [`ActionField`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

impl FromStr for ActionGroup {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Self::Main),
            "secondary" => Ok(Self::Secondary),
            other => Err(ParseNameError {
                kind: "action group",
                value: other.to_owned(),
            }),
        }
    }
}

/// Editable field of a single [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionField {
    Title,
    Subtitle,
    Href,
}

impl FromStr for ActionField {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "subtitle" => Ok(Self::Subtitle),
            "href" => Ok(Self::Href),
            other => Err(ParseNameError {
                kind: "action field",
                value: other.to_owned(),
            }),
        }
    }
}

/// The four outbound social links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "null_as_default")]
    pub instagram: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tiktok: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            instagram: "https://instagram.com".to_owned(),
            tiktok: "https://tiktok.com".to_owned(),
            phone: "tel:+5511999999999".to_owned(),
            location: "https://maps.google.com".to_owned(),
        }
    }
}

/// Everything the landing page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreData {
    pub name: String,
    pub description: String,
    /// Text or emoji shown when there is no logo image.
    pub logo: String,
    /// Logo image URL. Empty means none.
    pub logo_image: String,
    /// Video URL. Empty or [`BUILTIN_VIDEO_SENTINEL`] selects the built-in video.
    pub background_video: String,
    /// Image URL. Poster when a video plays, background otherwise.
    pub background_image: String,
    /// Message appended to WhatsApp deep-links.
    pub whatsapp_message: String,
    pub social_links: SocialLinks,
    pub main_actions: Vec<Action>,
    pub secondary_actions: Vec<Action>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            name: "GRIFFES MIL GRAU".to_owned(),
            description: "AUMENTE SUA AUTOESTIMA MONTANDO UM KIT NOVO".to_owned(),
            logo: "👔".to_owned(),
            logo_image: "/lovable-uploads/cf93430e-b1b6-417e-ad5d-9896eff54b2f.png".to_owned(),
            background_video: BUILTIN_VIDEO_SENTINEL.to_owned(),
            background_image: String::new(),
            whatsapp_message:
                "Olá! Vi seu perfil e tenho interesse nos produtos da GRIFFES MIL GRAU. Pode me ajudar?"
                    .to_owned(),
            social_links: SocialLinks::default(),
            main_actions: vec![
                Action::new(
                    "CATÁLOGO",
                    "Veja nossa coleção completa",
                    "https://catalogo.com",
                    ActionIcon::Grid3X3,
                ),
                Action::new(
                    "LOCALIZAÇÃO",
                    "Encontre nossa loja",
                    "https://maps.google.com",
                    ActionIcon::MapPin,
                ),
                Action::new(
                    "ATENDIMENTO WHATSAPP",
                    "Fale conosco agora",
                    "https://wa.me/5511999999999",
                    ActionIcon::MessageCircle,
                ),
            ],
            secondary_actions: vec![
                Action::new("DELIVERY", "Entrega rápida", "#delivery", ActionIcon::Package),
                Action::new("FRETE", "Consulte valores", "#frete", ActionIcon::Truck),
                Action::new("AVALIAÇÕES", "Veja opiniões", "#avaliacoes", ActionIcon::Star),
            ],
        }
    }
}

impl StoreData {
    /// Merge a partial change. Present fields replace, absent fields keep.
    /// Action lists are replaced wholesale.
    pub fn apply(&mut self, patch: StorePatch) {
        let StorePatch {
            name,
            description,
            logo,
            logo_image,
            background_video,
            background_image,
            whatsapp_message,
            social_links,
            main_actions,
            secondary_actions,
        } = patch;

        replace(&mut self.name, name);
        replace(&mut self.description, description);
        replace(&mut self.logo, logo);
        replace(&mut self.logo_image, logo_image);
        replace(&mut self.background_video, background_video);
        replace(&mut self.background_image, background_image);
        replace(&mut self.whatsapp_message, whatsapp_message);
        replace(&mut self.social_links, social_links);
        replace(&mut self.main_actions, main_actions);
        replace(&mut self.secondary_actions, secondary_actions);
    }

    /// Returns a copy with `patch` applied.
    #[must_use]
    pub fn merged(&self, patch: StorePatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }

    /// The actions of one group, in display order.
    #[must_use]
    pub fn actions(&self, group: ActionGroup) -> &[Action] {
        match group {
            ActionGroup::Main => &self.main_actions,
            ActionGroup::Secondary => &self.secondary_actions,
        }
    }

    /// Look up a single action by group and position.
    #[must_use]
    pub fn action(&self, group: ActionGroup, index: usize) -> Option<&Action> {
        self.actions(group).get(index)
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// A partial [`StoreData`] update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_actions: Option<Vec<Action>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_actions: Option<Vec<Action>>,
}

impl StorePatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set one field of one action.
    ///
    /// The list is copied from `base` the first time the group is touched,
    /// so the patch always carries a complete replacement list. Returns
    /// `false` when `index` is out of range.
    pub fn set_action(
        &mut self,
        base: &StoreData,
        group: ActionGroup,
        index: usize,
        field: ActionField,
        value: String,
    ) -> bool {
        let list = match group {
            ActionGroup::Main => &mut self.main_actions,
            ActionGroup::Secondary => &mut self.secondary_actions,
        };
        let list = list.get_or_insert_with(|| base.actions(group).to_vec());

        let Some(action) = list.get_mut(index) else {
            return false;
        };

        match field {
            ActionField::Title => action.title = value,
            ActionField::Subtitle => action.subtitle = value,
            ActionField::Href => action.href = value,
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let data = StoreData::default();
        assert_eq!(data.name, "GRIFFES MIL GRAU");
        assert_eq!(data.background_video, BUILTIN_VIDEO_SENTINEL);
        assert!(data.background_image.is_empty());
        assert_eq!(data.main_actions.len(), 3);
        assert_eq!(data.secondary_actions.len(), 3);
        assert_eq!(data.main_actions[2].icon, "MessageCircle");
        assert_eq!(data.secondary_actions[1].href, "#frete");
    }

    #[test]
    fn test_apply_replaces_present_fields_only() {
        let mut data = StoreData::default();
        data.apply(StorePatch {
            name: Some("X".to_owned()),
            ..StorePatch::default()
        });

        assert_eq!(data.name, "X");
        assert_eq!(
            data.description,
            "AUMENTE SUA AUTOESTIMA MONTANDO UM KIT NOVO"
        );
        assert_eq!(data.main_actions, StoreData::default().main_actions);
    }

    #[test]
    fn test_apply_replaces_lists_wholesale() {
        let mut data = StoreData::default();
        data.apply(StorePatch {
            secondary_actions: Some(vec![]),
            ..StorePatch::default()
        });
        assert!(data.secondary_actions.is_empty());
        assert_eq!(data.main_actions.len(), 3);
    }

    #[test]
    fn test_camel_case_json() {
        let json = serde_json::to_value(StoreData::default()).unwrap();
        assert!(json.get("logoImage").is_some());
        assert!(json.get("whatsappMessage").is_some());
        assert!(json.get("mainActions").is_some());
        assert!(json.get("socialLinks").unwrap().get("instagram").is_some());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let data: StoreData =
            serde_json::from_str(r#"{"name":"Loja","unknownField":1}"#).unwrap();
        assert_eq!(data.name, "Loja");
        assert_eq!(data.social_links, SocialLinks::default());
        assert_eq!(data.main_actions.len(), 3);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let action: Action =
            serde_json::from_str(r#"{"title":"X","subtitle":null,"href":"https://x"}"#).unwrap();
        assert_eq!(action.title, "X");
        assert!(action.subtitle.is_empty());
        assert!(action.icon.is_empty());
        assert_eq!(action.icon_kind(), ActionIcon::Grid3X3);

        let social: SocialLinks = serde_json::from_str(r#"{"tiktok":null}"#).unwrap();
        assert!(social.tiktok.is_empty());
        assert_eq!(social.instagram, "https://instagram.com");
    }

    #[test]
    fn test_patch_json_is_partial() {
        let patch: StorePatch = serde_json::from_str(r#"{"backgroundImage":""}"#).unwrap();
        assert_eq!(patch.background_image.as_deref(), Some(""));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());
        assert!(StorePatch::default().is_empty());
    }

    #[test]
    fn test_set_action_copies_base_list() {
        let base = StoreData::default();
        let mut patch = StorePatch::default();

        assert!(patch.set_action(
            &base,
            ActionGroup::Main,
            1,
            ActionField::Href,
            "https://maps.example.com".to_owned(),
        ));

        let merged = base.merged(patch);
        assert_eq!(merged.main_actions[1].href, "https://maps.example.com");
        assert_eq!(merged.main_actions[0], base.main_actions[0]);
        assert_eq!(merged.secondary_actions, base.secondary_actions);
    }

    #[test]
    fn test_set_action_out_of_range() {
        let base = StoreData::default();
        let mut patch = StorePatch::default();
        assert!(!patch.set_action(
            &base,
            ActionGroup::Secondary,
            9,
            ActionField::Title,
            "nope".to_owned(),
        ));
    }

    #[test]
    fn test_unknown_icon_falls_back() {
        assert_eq!(ActionIcon::from_name("Rocket"), ActionIcon::Grid3X3);
        assert_eq!(ActionIcon::from_name("Truck"), ActionIcon::Truck);
    }

    #[test]
    fn test_group_parse() {
        assert_eq!("main".parse::<ActionGroup>().unwrap(), ActionGroup::Main);
        assert!("tertiary".parse::<ActionGroup>().is_err());
        assert_eq!(ActionGroup::Secondary.to_string(), "secondary");
    }
}
