//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! echo 'a-long-password' | linkbio-cli admin create -u maria
//! echo 'another-password' | linkbio-cli admin set-password -u maria
//! linkbio-cli admin list
//! ```
//!
//! Passwords are read from stdin so they stay out of shell history and
//! process listings. They must be at least 8 characters.

use linkbio_admin::services::AuthService;

use super::{CommandError, connect, read_password};

/// Create a new admin user.
///
/// # Errors
///
/// Returns an error if the username is malformed or taken, the password is
/// too short, or the database fails.
pub async fn create_user(username: &str) -> Result<(), CommandError> {
    let password = read_password().await?;
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .create_admin(username, &password)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(())
}

/// Replace an admin's password.
///
/// # Errors
///
/// Returns an error if no admin has this username, the password is too
/// short, or the database fails.
pub async fn set_password(username: &str) -> Result<(), CommandError> {
    let password = read_password().await?;
    let pool = connect().await?;

    AuthService::new(&pool)
        .set_password(username, &password)
        .await?;

    tracing::info!("Password updated for {}", username);
    Ok(())
}

/// Log every admin user.
///
/// # Errors
///
/// Returns an error if the database fails.
pub async fn list_users() -> Result<(), CommandError> {
    let pool = connect().await?;
    let users = AuthService::new(&pool).list_admins().await?;

    if users.is_empty() {
        tracing::info!("No admin users. Create one with `linkbio-cli admin create`.");
    }
    for user in users {
        tracing::info!(
            "{:>4}  {:<24} created {}",
            user.id.get(),
            user.username,
            user.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
