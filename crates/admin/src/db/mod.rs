//! Database operations for the admin panel.
//!
//! ## Tables
//!
//! - `store_settings` - Page content (read and write)
//! - `admin_users` - Panel logins
//! - `analytics` - Read for the dashboard summary
//! - `tower_sessions.session` - Session storage, owned by `tower-sessions`
//!
//! # Migrations
//!
//! Migrations live in the workspace `migrations/` directory and run via:
//! ```bash
//! cargo run -p linkbio-cli -- migrate
//! ```

pub mod admin_users;
pub mod analytics;
pub mod store_settings;

pub use admin_users::AdminUserRepository;
pub use analytics::AnalyticsQueries;
pub use linkbio_site::db::{RepositoryError, create_pool};
pub use store_settings::{RemoteVersion, StoreSettingsRepository};
