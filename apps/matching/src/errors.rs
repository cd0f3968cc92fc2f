use thiserror::Error;

/// Error type shared by the parser, the recalculator and the store adapters.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Raised while decoding an uploaded resume. The parser turns it into the
    /// fallback resume, so callers of `parse_resume` never see it.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors raised by a storage collaborator.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, AppError::StoreFailure(_) | AppError::Database(_))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Internal(anyhow::anyhow!("invalid skill pattern: {err}"))
    }
}
