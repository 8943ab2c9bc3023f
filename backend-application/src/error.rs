use backend_domain::{CodecError, StoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    MalformedCode(#[from] CodecError),
    #[error("check-in target not found")]
    CheckinTargetNotFound,
    #[error("check-in already finalized")]
    AlreadyFinalized,
    #[error("upstream failure: {0}")]
    Upstream(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AppError::Conflict(message),
            StoreError::NotFound(message) => AppError::NotFound(message),
            StoreError::Backend(err) => AppError::Internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_category() {
        assert!(matches!(
            AppError::from(StoreError::Conflict("event".to_string())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::NotFound("event".to_string())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Backend(anyhow::anyhow!("disk"))),
            AppError::Internal(_)
        ));
    }
}
