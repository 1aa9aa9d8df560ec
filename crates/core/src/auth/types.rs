use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a user profile.
///
/// Roles outside the known set deserialize as [`Role::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Accountant,
    Manager,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Accountant => write!(f, "accountant"),
            Self::Manager => write!(f, "manager"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Which outlets a role is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletScope {
    /// Every active outlet.
    All,
    /// Only outlets reachable through the user's assignments.
    Assigned,
    /// No outlets at all.
    None,
}

/// Application profile row for an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub role: Role,
    pub is_active: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserProfile {
    /// Creates an active profile with the given role.
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role,
            is_active: true,
            email: None,
            full_name: None,
        }
    }

    /// Sets the display name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Marks the profile as deactivated.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A physical or organizational location users operate from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Outlet {
    /// Creates a new active outlet with a random ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
            code: None,
            address: None,
        }
    }

    /// Marks the outlet as inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Identity returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Live session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

/// Result of resolving who is signed in and where they may operate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub profile: UserProfile,
    pub outlets: Vec<Outlet>,
    /// Pre-selected outlet when exactly one outlet resolved.
    pub selected_outlet: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_deserializes_known_values() {
        let role: Role = serde_json::from_str("\"accountant\"").unwrap();
        assert_eq!(role, Role::Accountant);
    }

    #[test]
    fn role_deserializes_unknown_values_as_other() {
        let role: Role = serde_json::from_str("\"warehouse_staff\"").unwrap();
        assert_eq!(role, Role::Other);
    }

    #[test]
    fn profile_ignores_unknown_columns() {
        let json = r#"{
            "id": "6f1c2b9e-8d43-4d0a-9a55-1f4a2f1d2c3b",
            "role": "manager",
            "is_active": true,
            "phone": "+1 555 0100"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, Role::Manager);
        assert!(profile.email.is_none());
    }
}
