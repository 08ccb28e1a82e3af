//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username is malformed.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] linkbio_core::UsernameError),

    /// Unknown username.
    #[error("admin user not found")]
    UserNotFound,

    /// Wrong password for an existing user.
    #[error("invalid password")]
    InvalidPassword,

    /// Admin user already exists.
    #[error("admin user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
