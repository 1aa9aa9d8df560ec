use async_trait::async_trait;

use super::{AuthUser, IdentityError, Session};

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Abstraction over the backend's password-based identity service.
///
/// Implementations own the current session: signing in stores it, signing out
/// clears it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password and make the session current.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// Terminate the current session.
    async fn sign_out(&self) -> Result<()>;

    /// The current live session, if any.
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Send a password reset link to the given address.
    async fn reset_password_for_email(&self, email: &str, redirect_to: Option<&str>)
        -> Result<()>;

    /// Change the password of the signed-in user.
    async fn update_password(&self, new_password: &str) -> Result<AuthUser>;
}
