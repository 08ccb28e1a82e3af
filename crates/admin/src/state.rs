//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::{MediaStore, StoreService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    store: StoreService,
    media: MediaStore,
}

impl AppState {
    /// Create a new application state, loading page content.
    pub async fn new(config: AdminConfig, pool: PgPool) -> Self {
        let store = StoreService::load(pool.clone(), config.content_cache_path.clone()).await;
        let media = MediaStore::new(config.media.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                store,
                media,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the page content service.
    #[must_use]
    pub fn store(&self) -> &StoreService {
        &self.inner.store
    }

    /// Get the uploaded media store.
    #[must_use]
    pub fn media(&self) -> &MediaStore {
        &self.inner.media
    }
}
