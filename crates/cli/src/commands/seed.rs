//! Seed the database with default page content.

use linkbio_admin::db::StoreSettingsRepository;
use linkbio_core::StoreData;

use super::{CommandError, connect};

/// Insert the default content when no row exists.
///
/// With `force`, existing content is replaced by the defaults.
///
/// # Errors
///
/// Returns an error if the database fails.
pub async fn run(force: bool) -> Result<(), CommandError> {
    let pool = connect().await?;
    let repo = StoreSettingsRepository::new(&pool);
    let defaults = StoreData::default();

    if force {
        let remote = repo.reset(&defaults).await?;
        tracing::info!(id = %remote.id, "Replaced page content with defaults");
        return Ok(());
    }

    if let Some(remote) = repo.fetch_version().await? {
        tracing::info!(
            id = %remote.id,
            "Page content already exists, leaving it untouched (use --force to replace)"
        );
        return Ok(());
    }

    let remote = repo.insert(&defaults).await?;
    tracing::info!(id = %remote.id, "Inserted default page content");
    Ok(())
}
