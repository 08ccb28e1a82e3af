//! Media upload and removal handlers.

use axum::{
    extract::{Multipart, Path, State, multipart::MultipartError},
    response::Redirect,
};
use tracing::{info, instrument, warn};

use linkbio_core::MediaField;

use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::routes::flash::Flash;
use crate::services::MediaError;
use crate::state::AppState;

/// Multipart form field holding the file.
const FILE_FIELD: &str = "file";

/// A file read from the upload form.
struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

fn parse_field(field: &str) -> Result<MediaField, AppError> {
    field
        .parse()
        .map_err(|_| AppError::NotFound(format!("media field {field}")))
}

async fn read_file(multipart: &mut Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?.to_vec();

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

/// Store an uploaded file and point the field at it.
///
/// POST /uploads/{field}
#[instrument(skip(state, admin, multipart), fields(admin = %admin.username))]
pub async fn upload(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(field): Path<String>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let field = parse_field(&field)?;

    let file = match read_file(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Ok(Flash::InvalidFile.redirect()),
        Err(e) => {
            warn!(error = %e, "Failed to read upload");
            return Ok(Flash::UploadFailed.redirect());
        }
    };

    let stored = match state
        .media()
        .store(field, &file.file_name, &file.content_type, &file.bytes)
        .await
    {
        Ok(stored) => stored,
        Err(MediaError::Rejected(e)) => {
            info!(error = %e, "Upload rejected");
            return Ok(Flash::InvalidFile.redirect());
        }
        Err(e) => {
            warn!(error = %e, "Failed to store upload");
            return Ok(Flash::UploadFailed.redirect());
        }
    };

    let (_, status) = state.store().update(field.patch(stored.url)).await;
    Ok(Flash::after_sync(status, Flash::Uploaded).redirect())
}

/// Clear a media field. The stored file is left in place.
///
/// POST /uploads/{field}/remove
#[instrument(skip(state, admin), fields(admin = %admin.username))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(field): Path<String>,
) -> Result<Redirect, AppError> {
    let field = parse_field(&field)?;

    let (_, status) = state.store().update(field.patch(String::new())).await;
    info!(field = %field, "Removed media");
    Ok(Flash::after_sync(status, Flash::Removed).redirect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert!(matches!(parse_field("logo-image"), Ok(MediaField::LogoImage)));
        assert!(matches!(
            parse_field("background-video"),
            Ok(MediaField::BackgroundVideo)
        ));
        assert!(matches!(parse_field("avatar"), Err(AppError::NotFound(_))));
    }
}
