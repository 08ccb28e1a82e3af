//! Read and write access to the `store_settings` row.
//!
//! Writes are compare-and-swap on `(id, version)`: every successful update
//! bumps `version`, and an update against a stale version matches no row.

use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use linkbio_core::{StoreData, StoreSettingsId};
use linkbio_site::db::StoreSettingsRow;

use super::RepositoryError;

/// Identity and version of the remote row as last seen by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteVersion {
    pub id: StoreSettingsId,
    pub version: i32,
}

/// Repository for page content.
pub struct StoreSettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreSettingsRepository<'a> {
    /// Create a new store settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the current row with its version.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch(&self) -> Result<Option<(RemoteVersion, StoreData)>, RepositoryError> {
        let row: Option<StoreSettingsRow> =
            linkbio_site::db::StoreSettingsRepository::new(self.pool)
                .fetch_row()
                .await?;

        Ok(row.map(|row| {
            let (id, version, data) = row.into_parts();
            (RemoteVersion { id, version }, data)
        }))
    }

    /// Fetch only the identity and version of the current row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch_version(&self) -> Result<Option<RemoteVersion>, RepositoryError> {
        let row: Option<(StoreSettingsId, i32)> =
            sqlx::query_as("SELECT id, version FROM store_settings ORDER BY id LIMIT 1")
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(|(id, version)| RemoteVersion { id, version }))
    }

    /// Insert a new row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, data: &StoreData) -> Result<RemoteVersion, RepositoryError> {
        insert_row(self.pool, data).await
    }

    /// Overwrite the row if it is still at `expected.version`.
    ///
    /// Returns the new version, or `None` when another writer got there
    /// first (or the row is gone).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        expected: RemoteVersion,
        data: &StoreData,
    ) -> Result<Option<RemoteVersion>, RepositoryError> {
        let version: Option<i32> = sqlx::query_scalar(
            r"
            UPDATE store_settings
            SET name = $3,
                description = $4,
                logo = $5,
                logo_image = $6,
                background_video = $7,
                background_image = $8,
                whatsapp_message = $9,
                social_links = $10,
                main_actions = $11,
                secondary_actions = $12,
                version = version + 1,
                updated_at = now()
            WHERE id = $1 AND version = $2
            RETURNING version
            ",
        )
        .bind(expected.id)
        .bind(expected.version)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.logo)
        .bind(&data.logo_image)
        .bind(&data.background_video)
        .bind(&data.background_image)
        .bind(&data.whatsapp_message)
        .bind(Json(&data.social_links))
        .bind(Json(&data.main_actions))
        .bind(Json(&data.secondary_actions))
        .fetch_optional(self.pool)
        .await?;

        Ok(version.map(|version| RemoteVersion {
            id: expected.id,
            version,
        }))
    }

    /// Replace every row with a single row holding `data`, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails; nothing
    /// is changed in that case.
    pub async fn reset(&self, data: &StoreData) -> Result<RemoteVersion, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM store_settings")
            .execute(&mut *tx)
            .await?;
        let remote = insert_row(&mut *tx, data).await?;

        tx.commit().await?;
        Ok(remote)
    }
}

async fn insert_row<'e, E>(executor: E, data: &StoreData) -> Result<RemoteVersion, RepositoryError>
where
    E: PgExecutor<'e>,
{
    let (id, version): (StoreSettingsId, i32) = sqlx::query_as(
        r"
        INSERT INTO store_settings
            (name, description, logo, logo_image, background_video, background_image,
             whatsapp_message, social_links, main_actions, secondary_actions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, version
        ",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.logo)
    .bind(&data.logo_image)
    .bind(&data.background_video)
    .bind(&data.background_image)
    .bind(&data.whatsapp_message)
    .bind(Json(&data.social_links))
    .bind(Json(&data.main_actions))
    .bind(Json(&data.secondary_actions))
    .fetch_one(executor)
    .await?;

    Ok(RemoteVersion { id, version })
}
