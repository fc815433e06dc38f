use thiserror::Error;

use crate::renderer::RenderMode;

/// Failure raised by a permission collaborator. Never treated as a denial.
#[derive(Debug, Error)]
#[error("permission check failed: {0}")]
pub struct PermissionError(pub String);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing required render option `{0}`")]
    MissingOption(&'static str),

    #[error("invalid render option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("database row has no `uid` field")]
    MissingRecordUid,

    #[error("no renderer registered for render mode {0:?}")]
    UnsupportedRenderMode(RenderMode),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error("invalid form document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
