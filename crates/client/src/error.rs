//! Client error types.

use rentdesk_core::auth::IdentityError;
use rentdesk_core::image::ObjectStoreError;
use rentdesk_core::storage::RepositoryError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the remote backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No active session")]
    NoSession,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for IdentityError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NoSession => Self::NoSession,
            ClientError::ServerError { status: 401, .. } => Self::NoSession,
            other => Self::Provider(other.to_string()),
        }
    }
}

impl From<ClientError> for RepositoryError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { resource, id } => Self::NotFound {
                entity_type: resource,
                id,
            },
            ClientError::Request(err) if err.is_decode() => Self::Serialization(err.to_string()),
            ClientError::Request(err) => Self::ConnectionFailed(err.to_string()),
            ClientError::Json(err) => Self::Serialization(err.to_string()),
            ClientError::InvalidResponse(message) => Self::InvalidData(message),
            other => Self::QueryFailed(other.to_string()),
        }
    }
}

impl From<ClientError> for ObjectStoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { id, .. } => Self::NotFound { key: id },
            other => Self::Provider(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_resource_for_repositories() {
        let err: RepositoryError = ClientError::NotFound {
            resource: "Customer",
            id: "42".to_string(),
        }
        .into();

        assert_eq!(
            err,
            RepositoryError::NotFound {
                entity_type: "Customer",
                id: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_server_errors_are_failed_queries() {
        let err: RepositoryError = ClientError::ServerError {
            status: 400,
            message: "column customers.phonee does not exist".to_string(),
        }
        .into();

        assert!(matches!(err, RepositoryError::QueryFailed(m) if m.contains("phonee")));
    }

    #[test]
    fn test_unauthorized_means_no_session() {
        let err: IdentityError = ClientError::ServerError {
            status: 401,
            message: "JWT expired".to_string(),
        }
        .into();

        assert_eq!(err, IdentityError::NoSession);
    }

    #[test]
    fn test_not_found_object_keeps_key() {
        let err: ObjectStoreError = ClientError::NotFound {
            resource: "Object",
            id: "inventory/a/1_b.png".to_string(),
        }
        .into();

        assert_eq!(
            err,
            ObjectStoreError::NotFound {
                key: "inventory/a/1_b.png".to_string()
            }
        );
    }
}
