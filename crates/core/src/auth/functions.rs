use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{CredentialError, Outlet, OutletScope, Role, Session};

/// Minimum password length accepted by the identity provider.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Which outlets a role may operate from.
///
/// Admins and accountants see every active outlet, managers only the outlets
/// they are assigned to, everyone else none.
pub fn outlet_scope(role: Role) -> OutletScope {
    match role {
        Role::Admin | Role::Accountant => OutletScope::All,
        Role::Manager => OutletScope::Assigned,
        Role::Other => OutletScope::None,
    }
}

/// Keeps active outlets and orders them by name.
pub fn resolve_outlets(outlets: Vec<Outlet>) -> Vec<Outlet> {
    let mut active: Vec<Outlet> = outlets.into_iter().filter(|o| o.is_active).collect();
    active.sort_by(|a, b| a.name.cmp(&b.name));
    active
}

/// Pre-selects the outlet when exactly one resolved.
pub fn select_default_outlet(outlets: &[Outlet]) -> Option<Uuid> {
    match outlets {
        [only] => Some(only.id),
        _ => None,
    }
}

/// Check if a session has expired.
pub fn is_session_expired(session: &Session, now: DateTime<Utc>) -> bool {
    session.expires_at <= now
}

/// Rejects blank login input before it is sent anywhere.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), CredentialError> {
    if email.trim().is_empty() {
        return Err(CredentialError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(CredentialError::EmptyPassword);
    }
    Ok(())
}

/// Validates a replacement password against the provider's length rule.
pub fn validate_new_password(password: &str) -> Result<(), CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::EmptyPassword);
    }
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}
