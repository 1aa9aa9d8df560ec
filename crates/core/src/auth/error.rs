use thiserror::Error;

/// Errors reported by an [`IdentityProvider`](super::IdentityProvider).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("no active session")]
    NoSession,

    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Input rejected before it reaches the identity provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
}
