//! Uploaded media storage.
//!
//! Files go to `<MEDIA_DIR>/<bucket>/<key>` and are served by both binaries
//! under `MEDIA_BASE_URL`. Existing objects are never overwritten.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use linkbio_core::media::object_key;
use linkbio_core::{MediaField, MediaKind, MediaRuleError};

use crate::config::MediaConfig;

/// Errors from storing an upload.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The file breaks the field's type or size rules.
    #[error(transparent)]
    Rejected(#[from] MediaRuleError),

    /// An object with this key already exists.
    #[error("object already exists: {0}")]
    AlreadyExists(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Key within the bucket, `<folder>/<millis>_<suffix>.<ext>`.
    pub key: String,
    /// Public URL to save in page content.
    pub url: String,
}

/// Bucketed media directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    config: MediaConfig,
}

impl MediaStore {
    #[must_use]
    pub const fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// Validate and store an upload for `field`.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Rejected` if the file fails validation,
    /// `MediaError::AlreadyExists` on a key collision, and `MediaError::Io`
    /// if writing fails.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn store(
        &self,
        field: MediaField,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredMedia, MediaError> {
        field.validate(content_type, bytes.len())?;

        let kind = field.kind();
        let key = object_key(kind, file_name, Utc::now());
        let path = self.config.dir.join(kind.bucket()).join(&key);

        write_new(&path, bytes).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                MediaError::AlreadyExists(key.clone())
            } else {
                MediaError::Io(e)
            }
        })?;

        info!(bucket = kind.bucket(), key = %key, "Stored upload");

        Ok(StoredMedia {
            url: self.public_url(kind, &key),
            key,
        })
    }

    /// Public URL of an object.
    #[must_use]
    pub fn public_url(&self, kind: MediaKind, key: &str) -> String {
        format!("{}/{}/{key}", self.config.base_url, kind.bucket())
    }
}

async fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;
    drop(file);

    discard_on_error(path, written).await
}

/// Remove a partially written object so its key can be written again.
async fn discard_on_error(path: &Path, written: std::io::Result<()>) -> std::io::Result<()> {
    if written.is_ok() {
        return written;
    }
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(error = %e, path = %path.display(), "Failed to remove partial upload");
    }
    written
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch_store() -> (MediaStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("linkbio-media-{}", uuid::Uuid::new_v4()));
        let store = MediaStore::new(MediaConfig {
            dir: dir.clone(),
            base_url: "/media".to_string(),
        });
        (store, dir)
    }

    #[tokio::test]
    async fn test_store_image() {
        let (store, dir) = scratch_store();

        let stored = store
            .store(MediaField::LogoImage, "Logo.PNG", "image/png", b"\x89PNG")
            .await
            .unwrap();

        assert!(stored.key.starts_with("uploads/"));
        assert!(stored.key.ends_with(".png"));
        assert_eq!(stored.url, format!("/media/profiles/{}", stored.key));

        let written = tokio::fs::read(dir.join("profiles").join(&stored.key)).await.unwrap();
        assert_eq!(written, b"\x89PNG");
    }

    #[tokio::test]
    async fn test_store_video_goes_to_videos_bucket() {
        let (store, _dir) = scratch_store();

        let stored = store
            .store(MediaField::BackgroundVideo, "loop.webm", "video/webm", b"webm")
            .await
            .unwrap();

        assert!(stored.key.starts_with("backgrounds/"));
        assert!(stored.url.starts_with("/media/videos/backgrounds/"));
    }

    #[tokio::test]
    async fn test_rejects_wrong_type() {
        let (store, _dir) = scratch_store();

        let result = store
            .store(MediaField::BackgroundVideo, "clip.png", "image/png", b"png")
            .await;

        assert!(matches!(
            result,
            Err(MediaError::Rejected(MediaRuleError::UnsupportedType(_)))
        ));
    }

    #[tokio::test]
    async fn test_never_overwrites() {
        let (_store, dir) = scratch_store();
        let path = dir.join("profiles/uploads/fixed.png");

        write_new(&path, b"first").await.unwrap();
        let err = write_new(&path, b"second").await.unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_key_free() {
        let (_store, dir) = scratch_store();
        let path = dir.join("profiles/uploads/partial.png");
        write_new(&path, b"par").await.unwrap();

        let failed = Err(std::io::Error::other("disk full"));
        let err = discard_on_error(&path, failed).await.unwrap_err();

        assert_eq!(err.to_string(), "disk full");
        assert!(!tokio::fs::try_exists(&path).await.unwrap());
        write_new(&path, b"complete").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"complete");
    }

    #[tokio::test]
    async fn test_successful_write_is_kept() {
        let (_store, dir) = scratch_store();
        let path = dir.join("profiles/uploads/kept.png");
        write_new(&path, b"ok").await.unwrap();

        discard_on_error(&path, Ok(())).await.unwrap();
        assert!(tokio::fs::try_exists(&path).await.unwrap());
    }
}
