//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL for the site (default: `http://localhost:3000`)
//! - `SITE_CONTENT_TTL_SECS` - How long page content is cached (default: 30)
//! - `MEDIA_DIR` - Directory holding uploaded media buckets (default: `data/media`)
//! - `MEDIA_BASE_URL` - Public prefix for uploaded media (default: `/media`)
//! - `VIDEO_START_WITH_AUDIO` - Try to start the background video unmuted
//! - `VIDEO_AUDIO_TOGGLE` - Let visitors toggle the video's audio
//! - `VIDEO_RESIST_PAUSE` - Restart the video whenever it pauses
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use linkbio_core::PlaybackPolicy;
use secrecy::SecretString;
use thiserror::Error;

/// URL of the video shipped with the site, used when no custom video is set.
pub const BUILTIN_VIDEO_URL: &str = "/static/video/background.mp4";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// How long rendered content stays cached
    pub content_ttl: Duration,
    /// Uploaded media location
    pub media: MediaConfig,
    /// Background video playback options
    pub video: VideoConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Where uploaded media lives on disk and how it is addressed publicly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    pub dir: PathBuf,
    pub base_url: String,
}

impl MediaConfig {
    /// Load `MEDIA_DIR` and `MEDIA_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            dir: PathBuf::from(get_env_or_default("MEDIA_DIR", "data/media")),
            base_url: get_env_or_default("MEDIA_BASE_URL", "/media")
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/media"),
            base_url: "/media".to_string(),
        }
    }
}

/// Background video options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoConfig {
    /// URL of the built-in video
    pub builtin_url: String,
    pub policy: PlaybackPolicy,
}

impl VideoConfig {
    /// Load the `VIDEO_*` flags.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a flag is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            builtin_url: BUILTIN_VIDEO_URL.to_string(),
            policy: PlaybackPolicy {
                start_with_audio: get_bool_env("VIDEO_START_WITH_AUDIO")?,
                allow_audio_toggle: get_bool_env("VIDEO_AUDIO_TOGGLE")?,
                resist_pause: get_bool_env("VIDEO_RESIST_PAUSE")?,
            },
        })
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            builtin_url: BUILTIN_VIDEO_URL.to_string(),
            policy: PlaybackPolicy::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SITE_DATABASE_URL")?;
        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("SITE_BASE_URL", "http://localhost:3000");
        let content_ttl = get_env_or_default("SITE_CONTENT_TTL_SECS", "30")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SITE_CONTENT_TTL_SECS".to_string(), e.to_string())
            })?;

        let media = MediaConfig::from_env();
        let video = VideoConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            content_ttl,
            media,
            video,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a boolean flag. Unset means `false`.
fn get_bool_env(key: &str) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(false), |value| parse_bool(key, &value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
