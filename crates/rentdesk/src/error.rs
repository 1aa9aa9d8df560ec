use thiserror::Error;
use uuid::Uuid;

use rentdesk_core::auth::{CredentialError, IdentityError};
use rentdesk_core::customer::CustomerError;
use rentdesk_core::image::{ImageKeyError, ObjectStoreError};
use rentdesk_core::storage::RepositoryError;

/// Result type shared by every service.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors surfaced by the auth, customer and image services.
///
/// Backend errors are folded into these kinds through the `From` impls below
/// so callers match on one enum regardless of which collaborator failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("no profile found for user {0}")]
    ProfileNotFound(Uuid),

    #[error("account is deactivated")]
    AccountDeactivated,

    #[error("not signed in")]
    NotAuthenticated,

    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl ServiceError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

impl From<IdentityError> for ServiceError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials(message) => Self::AuthFailed(message),
            IdentityError::NoSession => Self::NotAuthenticated,
            IdentityError::Provider(message) => Self::Backend(message),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            other => Self::Backend(other.to_string()),
        }
    }
}

impl From<ObjectStoreError> for ServiceError {
    fn from(err: ObjectStoreError) -> Self {
        match err {
            ObjectStoreError::NotFound { key } => Self::NotFound {
                entity_type: "Object",
                id: key,
            },
            other => Self::Backend(other.to_string()),
        }
    }
}

impl From<CredentialError> for ServiceError {
    fn from(err: CredentialError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<CustomerError> for ServiceError {
    fn from(err: CustomerError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<ImageKeyError> for ServiceError {
    fn from(err: ImageKeyError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_become_auth_failed() {
        let err: ServiceError =
            IdentityError::InvalidCredentials("Invalid login credentials".to_string()).into();
        assert_eq!(
            err,
            ServiceError::AuthFailed("Invalid login credentials".to_string())
        );
    }

    #[test]
    fn repository_not_found_keeps_entity_and_id() {
        let err: ServiceError = RepositoryError::NotFound {
            entity_type: "Customer",
            id: "42".to_string(),
        }
        .into();
        assert_eq!(err, ServiceError::not_found("Customer", 42));
    }

    #[test]
    fn other_repository_errors_are_backend_errors() {
        let err: ServiceError = RepositoryError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(
            err,
            ServiceError::Backend("Connection failed: refused".to_string())
        );
    }

    #[test]
    fn missing_object_is_not_found() {
        let err: ServiceError = ObjectStoreError::NotFound {
            key: "inventory/x/1_a.png".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity_type: "Object",
                ..
            }
        ));
    }

    #[test]
    fn validation_errors_are_invalid_input() {
        let err: ServiceError = CustomerError::NegativeAmount.into();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
