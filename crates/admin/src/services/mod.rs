//! Business logic services for admin.

pub mod auth;
pub mod media;
pub mod store;

pub use auth::{AuthError, AuthService};
pub use media::{MediaError, MediaStore, StoredMedia};
pub use store::{StoreService, StoreSyncError, SyncStatus};
