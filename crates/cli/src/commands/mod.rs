//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use linkbio_admin::db::RepositoryError;
use linkbio_admin::services::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Nothing was read from stdin.
    #[error("Expected a password on stdin")]
    MissingPassword,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect using `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(linkbio_admin::db::create_pool(&database_url).await?)
}

/// Read a password from the first line of stdin.
///
/// Surrounding whitespace is trimmed, as the login form does.
pub(crate) async fn read_password() -> Result<String, CommandError> {
    tracing::info!("Reading password from stdin");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    let password = line.trim();
    if password.is_empty() {
        return Err(CommandError::MissingPassword);
    }
    Ok(password.to_owned())
}
