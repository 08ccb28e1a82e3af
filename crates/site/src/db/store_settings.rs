//! Read access to the `store_settings` row.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::warn;

use linkbio_core::{StoreData, StoreSettingsId};

use super::RepositoryError;

/// Column list shared by every `store_settings` query.
pub const STORE_SETTINGS_COLUMNS: &str = "id, version, name, description, logo, logo_image, \
     background_video, background_image, whatsapp_message, social_links, main_actions, \
     secondary_actions, updated_at";

/// Raw `store_settings` row.
///
/// JSONB columns are read as untyped values and decoded column by column in
/// [`Self::into_parts`]. A column that does not decode falls back to its
/// default, so one bad document never hides the rest of the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreSettingsRow {
    pub id: StoreSettingsId,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub logo_image: String,
    pub background_video: String,
    pub background_image: String,
    pub whatsapp_message: String,
    pub social_links: Json<serde_json::Value>,
    pub main_actions: Json<serde_json::Value>,
    pub secondary_actions: Json<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl StoreSettingsRow {
    /// Split into the row's identity, its version and the decoded content.
    #[must_use]
    pub fn into_parts(self) -> (StoreSettingsId, i32, StoreData) {
        let defaults = StoreData::default();
        let data = StoreData {
            name: self.name,
            description: self.description,
            logo: self.logo,
            logo_image: self.logo_image,
            background_video: self.background_video,
            background_image: self.background_image,
            whatsapp_message: self.whatsapp_message,
            social_links: decode_column("social_links", self.social_links.0, defaults.social_links),
            main_actions: decode_column("main_actions", self.main_actions.0, defaults.main_actions),
            secondary_actions: decode_column(
                "secondary_actions",
                self.secondary_actions.0,
                defaults.secondary_actions,
            ),
        };
        (self.id, self.version, data)
    }
}

fn decode_column<T: DeserializeOwned>(column: &str, value: serde_json::Value, default: T) -> T {
    if value.is_null() {
        return default;
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(column, error = %e, "Invalid JSON in store_settings, using default");
        default
    })
}

/// Repository for reading page content.
pub struct StoreSettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreSettingsRepository<'a> {
    /// Create a new store settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row, if one exists.
    ///
    /// When several rows exist the oldest one wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch_row(&self) -> Result<Option<StoreSettingsRow>, RepositoryError> {
        let sql = format!("SELECT {STORE_SETTINGS_COLUMNS} FROM store_settings ORDER BY id LIMIT 1");
        let row = sqlx::query_as::<_, StoreSettingsRow>(&sql)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch the page content, if a settings row exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch(&self) -> Result<Option<StoreData>, RepositoryError> {
        let row = self.fetch_row().await?;
        Ok(row.map(|row| row.into_parts().2))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(main_actions: serde_json::Value) -> StoreSettingsRow {
        StoreSettingsRow {
            id: StoreSettingsId::new(1),
            version: 3,
            name: "Loja".to_string(),
            description: "desc".to_string(),
            logo: "L".to_string(),
            logo_image: String::new(),
            background_video: String::new(),
            background_image: String::new(),
            whatsapp_message: "oi".to_string(),
            social_links: Json(json!({"instagram": "https://instagram.com/loja"})),
            main_actions: Json(main_actions),
            secondary_actions: Json(json!([])),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_into_parts_decodes_json_columns() {
        let (id, version, data) = row(json!([
            {"title": "A", "subtitle": "a", "href": "https://a", "icon": "Star"}
        ]))
        .into_parts();

        assert_eq!(id.get(), 1);
        assert_eq!(version, 3);
        assert_eq!(data.name, "Loja");
        assert_eq!(data.main_actions[0].icon, "Star");
        assert_eq!(data.social_links.instagram, "https://instagram.com/loja");
        // Missing keys fall back to defaults.
        assert_eq!(data.social_links.phone, "tel:+5511999999999");
        assert!(data.secondary_actions.is_empty());
    }

    #[test]
    fn test_into_parts_reads_null_action_field_as_empty() {
        let (_, _, data) = row(json!([
            {"title": "X", "subtitle": null, "href": "https://x", "icon": "Star"}
        ]))
        .into_parts();

        assert_eq!(data.name, "Loja");
        assert_eq!(data.main_actions.len(), 1);
        assert_eq!(data.main_actions[0].title, "X");
        assert!(data.main_actions[0].subtitle.is_empty());
    }

    #[test]
    fn test_into_parts_defaults_only_the_bad_column() {
        let (_, _, data) = row(json!({"not": "a list"})).into_parts();

        assert_eq!(data.name, "Loja");
        assert_eq!(data.whatsapp_message, "oi");
        assert_eq!(data.main_actions, StoreData::default().main_actions);
        assert_eq!(data.social_links.instagram, "https://instagram.com/loja");
    }

    #[test]
    fn test_into_parts_null_column_uses_default() {
        let (_, _, data) = row(serde_json::Value::Null).into_parts();
        assert_eq!(data.main_actions, StoreData::default().main_actions);
    }
}
