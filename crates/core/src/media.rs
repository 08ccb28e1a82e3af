//! Upload rules for page media.
//!
//! Which bucket a file goes to, which content types and sizes are accepted,
//! and how object keys are named. Storage itself lives in the admin crate.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::store::StorePatch;

/// Maximum image upload size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum video upload size (50 MiB).
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];
const VIDEO_TYPES: &[&str] = &["video/mp4", "video/webm"];

/// Broad media category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Storage bucket for this kind.
    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Image => "profiles",
            Self::Video => "videos",
        }
    }

    /// Folder inside the bucket.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Image => "uploads",
            Self::Video => "backgrounds",
        }
    }

    #[must_use]
    pub const fn max_bytes(self) -> usize {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
        }
    }

    #[must_use]
    pub const fn accepted_types(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_TYPES,
            Self::Video => VIDEO_TYPES,
        }
    }

    /// Value for an `<input type="file" accept=...>` attribute.
    #[must_use]
    pub fn accept_attribute(self) -> String {
        self.accepted_types().join(",")
    }

    const fn default_extension(self) -> &'static str {
        match self {
            Self::Image => "png",
            Self::Video => "mp4",
        }
    }
}

/// A page field that holds an uploaded file's URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaField {
    LogoImage,
    BackgroundImage,
    BackgroundVideo,
}

impl MediaField {
    pub const ALL: [Self; 3] = [Self::LogoImage, Self::BackgroundImage, Self::BackgroundVideo];

    /// Path segment in `/uploads/{field}`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogoImage => "logo-image",
            Self::BackgroundImage => "background-image",
            Self::BackgroundVideo => "background-video",
        }
    }

    #[must_use]
    pub const fn kind(self) -> MediaKind {
        match self {
            Self::LogoImage | Self::BackgroundImage => MediaKind::Image,
            Self::BackgroundVideo => MediaKind::Video,
        }
    }

    /// Check a file's declared content type and size against this field.
    ///
    /// # Errors
    ///
    /// Returns [`MediaRuleError`] when the file is empty, too large, or of an
    /// unaccepted type.
    pub fn validate(self, content_type: &str, size: usize) -> Result<(), MediaRuleError> {
        let kind = self.kind();

        if size == 0 {
            return Err(MediaRuleError::Empty);
        }

        if size > kind.max_bytes() {
            return Err(MediaRuleError::TooLarge {
                size,
                max: kind.max_bytes(),
            });
        }

        let content_type = content_type.to_ascii_lowercase();
        if !kind.accepted_types().contains(&content_type.as_str()) {
            return Err(MediaRuleError::UnsupportedType(content_type));
        }

        Ok(())
    }

    /// A patch that points this field at `url`. An empty URL removes the file.
    #[must_use]
    pub fn patch(self, url: String) -> StorePatch {
        let mut patch = StorePatch::default();
        match self {
            Self::LogoImage => patch.logo_image = Some(url),
            Self::BackgroundImage => patch.background_image = Some(url),
            Self::BackgroundVideo => patch.background_video = Some(url),
        }
        patch
    }
}

impl fmt::Display for MediaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`MediaField`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media field: {0}")]
pub struct UnknownMediaField(pub String);

impl FromStr for MediaField {
    type Err = UnknownMediaField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownMediaField(s.to_owned()))
    }
}

/// Why an upload was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaRuleError {
    #[error("file is empty")]
    Empty,
    #[error("file is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),
}

/// Build an object key `<folder>/<unix millis>_<base36 suffix>.<ext>`.
///
/// The extension comes from the file name, lower-cased. Names without a
/// usable extension get the kind's default (`png` or `mp4`).
#[must_use]
pub fn object_key(kind: MediaKind, file_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}/{}_{}.{}",
        kind.folder(),
        now.timestamp_millis(),
        random_suffix(),
        extension(kind, file_name)
    )
}

fn extension(kind: MediaKind, file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| kind.default_extension().to_owned())
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..11)
        .map(|_| {
            let i = rng.random_range(0..ALPHABET.len());
            ALPHABET.get(i).copied().map_or('0', char::from)
        })
        .collect()
}
