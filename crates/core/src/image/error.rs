use thiserror::Error;

/// Errors reported by an [`ObjectStore`](super::ObjectStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("object already exists: {key}")]
    AlreadyExists { key: String },

    #[error("object store error: {0}")]
    Provider(String),
}

/// Errors raised while building an object key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageKeyError {
    #[error("file name cannot be empty")]
    EmptyFileName,

    #[error("file name cannot contain '/': {0}")]
    InvalidFileName(String),
}
