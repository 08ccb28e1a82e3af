//! Content sync, reset and login against a real `PostgreSQL`.
//!
//! Every test returns early when `TEST_DATABASE_URL` is unset.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use linkbio_admin::db::StoreSettingsRepository;
use linkbio_admin::services::{AuthError, AuthService, StoreService, SyncStatus};
use linkbio_core::{StoreData, StorePatch};
use linkbio_integration_tests::{TestDatabase, scratch_dir};

fn snapshot_path() -> std::path::PathBuf {
    scratch_dir("linkbio-db-store").join("store-data.json")
}

fn name(value: &str) -> StorePatch {
    StorePatch {
        name: Some(value.to_string()),
        ..StorePatch::default()
    }
}

fn description(value: &str) -> StorePatch {
    StorePatch {
        description: Some(value.to_string()),
        ..StorePatch::default()
    }
}

async fn site_content(db: &TestDatabase) -> StoreData {
    linkbio_site::db::StoreSettingsRepository::new(&db.pool)
        .fetch()
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_first_update_inserts_then_updates_by_id() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let store = StoreService::load(db.pool.clone(), snapshot_path()).await;
    assert_eq!(db.store_rows().await, 0);

    let (_, status) = store.update(name("Primeira")).await;
    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(db.store_rows().await, 1);

    let (_, status) = store.update(description("Segunda")).await;
    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(db.store_rows().await, 1);

    let (remote, data) = StoreSettingsRepository::new(&db.pool)
        .fetch()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(remote.version, 2);
    assert_eq!(data.name, "Primeira");
    assert_eq!(data.description, "Segunda");

    db.cleanup().await;
}

#[tokio::test]
async fn test_update_after_other_writer_merges_both_edits() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    StoreSettingsRepository::new(&db.pool)
        .insert(&StoreData::default())
        .await
        .unwrap();

    let a = StoreService::load(db.pool.clone(), snapshot_path()).await;
    let b = StoreService::load(db.pool.clone(), snapshot_path()).await;

    let (_, status) = b.update(name("B")).await;
    assert_eq!(status, SyncStatus::Synced);

    let (data, status) = a.update(description("A")).await;
    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(data.name, "B");
    assert_eq!(data.description, "A");

    let remote = site_content(&db).await;
    assert_eq!(remote.name, "B");
    assert_eq!(remote.description, "A");
    assert_eq!(db.store_rows().await, 1);

    db.cleanup().await;
}

#[tokio::test]
async fn test_writer_that_never_saw_the_row_keeps_other_edits() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let a = StoreService::load(db.pool.clone(), snapshot_path()).await;
    let b = StoreService::load(db.pool.clone(), snapshot_path()).await;

    // Both start without a row; B creates it.
    b.update(name("B")).await;
    let (data, status) = a.update(description("A")).await;

    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(data.name, "B");
    assert_eq!(site_content(&db).await.name, "B");
    assert_eq!(db.store_rows().await, 1);

    db.cleanup().await;
}

#[tokio::test]
async fn test_repeated_conflict_is_reported_and_kept_locally() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    StoreSettingsRepository::new(&db.pool)
        .insert(&StoreData::default())
        .await
        .unwrap();
    let store = StoreService::load(db.pool.clone(), snapshot_path()).await;

    // Every update now matches no row, as if another writer always won.
    sqlx::raw_sql(
        r"
        CREATE FUNCTION skip_store_update() RETURNS trigger AS $$
        BEGIN
            RETURN NULL;
        END
        $$ LANGUAGE plpgsql;

        CREATE TRIGGER skip_store_update BEFORE UPDATE ON store_settings
            FOR EACH ROW EXECUTE FUNCTION skip_store_update();
        ",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let (data, status) = store.update(name("Local")).await;

    assert_eq!(status, SyncStatus::Conflict);
    assert_eq!(data.name, "Local");
    assert_eq!(store.current().await.name, "Local");
    assert_eq!(site_content(&db).await.name, StoreData::default().name);

    db.cleanup().await;
}

#[tokio::test]
async fn test_reset_leaves_one_row_that_later_updates_reuse() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let repo = StoreSettingsRepository::new(&db.pool);
    repo.insert(&StoreData::default()).await.unwrap();
    repo.insert(&StoreData::default()).await.unwrap();
    let store = StoreService::load(db.pool.clone(), snapshot_path()).await;
    store.update(name("Antes")).await;

    let (data, status) = store.reset().await;
    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(data, StoreData::default());
    assert_eq!(db.store_rows().await, 1);

    let (_, status) = store.update(name("Depois")).await;
    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(db.store_rows().await, 1);
    assert_eq!(site_content(&db).await.name, "Depois");

    db.cleanup().await;
}

#[tokio::test]
async fn test_null_action_field_does_not_hide_the_row() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    sqlx::query(
        r#"
        INSERT INTO store_settings (name, main_actions)
        VALUES ('Loja Real', '[{"title":"X","subtitle":null,"href":"https://x","icon":"Star"}]')
        "#,
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let remote = site_content(&db).await;
    assert_eq!(remote.name, "Loja Real");
    assert_eq!(remote.main_actions[0].title, "X");

    let store = StoreService::load(db.pool.clone(), snapshot_path()).await;
    assert_eq!(store.current().await.name, "Loja Real");

    let (_, status) = store.update(description("Nova")).await;
    assert_eq!(status, SyncStatus::Synced);

    let remote = site_content(&db).await;
    assert_eq!(remote.name, "Loja Real");
    assert_eq!(remote.description, "Nova");

    db.cleanup().await;
}

#[tokio::test]
async fn test_login_checks_the_admin_table() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let auth = AuthService::new(&db.pool);
    auth.create_admin("maria", "senha-segura").await.unwrap();

    assert!(matches!(
        auth.login("joana", "senha-segura").await,
        Err(AuthError::UserNotFound)
    ));
    assert!(matches!(
        auth.login("maria", "senha-errada").await,
        Err(AuthError::InvalidPassword)
    ));

    let user = auth.login("maria", "senha-segura").await.unwrap();
    assert_eq!(user.username.as_str(), "maria");

    db.cleanup().await;
}
