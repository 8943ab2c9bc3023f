// Domain error types

use thiserror::Error;

/// Rejected input. Raised before any write happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity not found or scan code expired")]
    NotFound,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed identity response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("reference code is not valid base64 text")]
    InvalidEncoding,
    #[error("reference code has no '.' separator")]
    MissingSeparator,
    #[error("invalid timestamp in reference code: {0}")]
    InvalidTimestamp(String),
    #[error("invalid record id in reference code: {0}")]
    InvalidRecordId(String),
}
