//! One-shot status messages carried in the redirect query string.
//!
//! Form handlers redirect back to the panel with `?success=<code>` or
//! `?error=<code>`; the panel maps the code to a message.

use axum::response::Redirect;
use serde::Deserialize;

use crate::services::SyncStatus;

/// Flash query parameters on the panel.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Known flash messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Welcome,
    Saved,
    SavedLocally,
    Reset,
    Uploaded,
    Removed,
    UploadFailed,
    InvalidFile,
    InvalidForm,
}

impl Flash {
    const ALL: [Self; 9] = [
        Self::Welcome,
        Self::Saved,
        Self::SavedLocally,
        Self::Reset,
        Self::Uploaded,
        Self::Removed,
        Self::UploadFailed,
        Self::InvalidFile,
        Self::InvalidForm,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Saved => "saved",
            Self::SavedLocally => "saved_locally",
            Self::Reset => "reset",
            Self::Uploaded => "uploaded",
            Self::Removed => "removed",
            Self::UploadFailed => "upload_failed",
            Self::InvalidFile => "invalid_file",
            Self::InvalidForm => "invalid_form",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::SavedLocally | Self::UploadFailed | Self::InvalidFile | Self::InvalidForm
        )
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Welcome => "Login realizado com sucesso! Bem-vindo ao painel administrativo",
            Self::Saved => "Configurações salvas.",
            Self::SavedLocally => {
                "Salvo localmente, mas não foi possível sincronizar com o banco de dados."
            }
            Self::Reset => "Dados restaurados para o padrão.",
            Self::Uploaded => "Upload concluído. Arquivo enviado com qualidade máxima.",
            Self::Removed => "Arquivo removido.",
            Self::UploadFailed => "Falha no upload. Tente novamente com outro arquivo.",
            Self::InvalidFile => "Arquivo não aceito. Verifique o tipo e o tamanho.",
            Self::InvalidForm => "Não foi possível ler o formulário.",
        }
    }

    /// `ok` when the database write landed, otherwise the local-only warning.
    #[must_use]
    pub const fn after_sync(status: SyncStatus, ok: Self) -> Self {
        if status.is_synced() { ok } else { Self::SavedLocally }
    }

    /// Redirect to the panel showing this message.
    #[must_use]
    pub fn redirect(self) -> Redirect {
        let key = if self.is_error() { "error" } else { "success" };
        Redirect::to(&format!("/?{key}={}", self.code()))
    }

    fn from_code(code: &str, error: bool) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flash| flash.code() == code && flash.is_error() == error)
    }
}

impl FlashParams {
    /// Success and error messages to show, unknown codes dropped.
    #[must_use]
    pub fn messages(&self) -> (Option<&'static str>, Option<&'static str>) {
        let lookup = |code: &Option<String>, error| {
            code.as_deref()
                .and_then(|code| Flash::from_code(code, error))
                .map(Flash::message)
        };
        (lookup(&self.success, false), lookup(&self.error, true))
    }
}
