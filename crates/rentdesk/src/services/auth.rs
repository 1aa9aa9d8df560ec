use std::sync::Arc;

use rentdesk_core::auth::{
    outlet_scope, resolve_outlets, select_default_outlet, validate_credentials,
    validate_new_password, AuthContext, AuthUser, CredentialError, IdentityProvider, OutletScope,
    Session, UserProfile,
};
use rentdesk_core::storage::{OutletRepository, ProfileRepository};

use super::logged;
use crate::{Backend, Config, Result, ServiceError};

/// Login, session and password flows plus outlet resolution by role.
#[derive(Clone)]
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    outlets: Arc<dyn OutletRepository>,
    password_reset_redirect: Option<String>,
}

impl AuthService {
    pub fn new(backend: &Backend, config: &Config) -> Self {
        Self {
            identity: backend.identity.clone(),
            profiles: backend.profiles.clone(),
            outlets: backend.outlets.clone(),
            password_reset_redirect: config.password_reset_redirect.clone(),
        }
    }

    /// Signs in and resolves the user's profile and outlets.
    ///
    /// A deactivated profile is signed out again before
    /// [`ServiceError::AccountDeactivated`] is returned, so no live session
    /// survives the failed login.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthContext> {
        logged(validate_credentials(email, password), "validate credentials")?;

        let session = logged(
            self.identity.sign_in_with_password(email, password).await,
            "sign in",
        )?;
        let user_id = session.user.id;

        let profile = logged(self.profiles.get_profile(user_id).await, "fetch profile")?
            .ok_or(ServiceError::ProfileNotFound(user_id))
            .inspect_err(|_| tracing::error!(%user_id, "Signed in user has no profile"))?;

        if !profile.is_active {
            tracing::warn!(%user_id, "Deactivated account attempted to sign in");
            if let Err(err) = self.identity.sign_out().await {
                tracing::error!(error = %err, %user_id, "Failed to sign out deactivated account");
            }
            return Err(ServiceError::AccountDeactivated);
        }

        let context = self.resolve_context(profile).await?;
        tracing::info!(%user_id, outlets = context.outlets.len(), "User signed in");
        Ok(context)
    }

    /// Ends the current session.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        logged(self.identity.sign_out().await, "sign out")?;
        tracing::info!("User signed out");
        Ok(())
    }

    /// The live session, if any.
    pub async fn current_session(&self) -> Result<Option<Session>> {
        logged(self.identity.current_session().await, "fetch session")
    }

    /// Resolves the signed-in user's profile and outlets.
    ///
    /// Returns `None` rather than an error when nobody is signed in, the
    /// profile row is missing or the account is deactivated.
    #[tracing::instrument(skip(self))]
    pub async fn current_user_profile(&self) -> Result<Option<AuthContext>> {
        let Some(session) = self.current_session().await? else {
            return Ok(None);
        };
        let user_id = session.user.id;

        let Some(profile) = logged(self.profiles.get_profile(user_id).await, "fetch profile")?
        else {
            tracing::debug!(%user_id, "Session has no profile");
            return Ok(None);
        };

        if !profile.is_active {
            tracing::warn!(%user_id, "Session belongs to a deactivated account");
            return Ok(None);
        }

        self.resolve_context(profile).await.map(Some)
    }

    /// Asks the provider to email a password reset link.
    #[tracing::instrument(skip(self))]
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return logged(Err(CredentialError::EmptyEmail), "validate email");
        }

        logged(
            self.identity
                .reset_password_for_email(email, self.password_reset_redirect.as_deref())
                .await,
            "request password reset",
        )
    }

    /// Changes the signed-in user's password.
    #[tracing::instrument(skip(self, new_password))]
    pub async fn update_password(&self, new_password: &str) -> Result<AuthUser> {
        logged(validate_new_password(new_password), "validate password")?;

        let user = logged(
            self.identity.update_password(new_password).await,
            "update password",
        )?;
        tracing::info!(user_id = %user.id, "Password updated");
        Ok(user)
    }

    async fn resolve_context(&self, profile: UserProfile) -> Result<AuthContext> {
        let outlets = match outlet_scope(profile.role) {
            OutletScope::All => logged(
                self.outlets.list_active_outlets().await,
                "list active outlets",
            )?,
            OutletScope::Assigned => logged(
                self.outlets.list_assigned_outlets(profile.id).await,
                "list assigned outlets",
            )?,
            OutletScope::None => Vec::new(),
        };

        let outlets = resolve_outlets(outlets);
        let selected_outlet = select_default_outlet(&outlets);

        Ok(AuthContext {
            profile,
            outlets,
            selected_outlet,
        })
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("password_reset_redirect", &self.password_reset_redirect)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::storage::inmemory::InMemoryBackend;
    use rentdesk_core::auth::{Outlet, Role};

    const EMAIL: &str = "staff@example.com";
    const PASSWORD: &str = "s3cret!";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn service(memory: &InMemoryBackend) -> AuthService {
        service_with_config(memory, &Config::default())
    }

    fn service_with_config(memory: &InMemoryBackend, config: &Config) -> AuthService {
        let backend = Backend::from_shared(Arc::new(memory.clone()));
        AuthService::new(&backend, config)
    }

    async fn seed_user(memory: &InMemoryBackend, role: Role) -> AuthUser {
        let user = memory.register_user(EMAIL, PASSWORD).await;
        memory.insert_profile(UserProfile::new(user.id, role)).await;
        user
    }

    async fn seed_outlets(memory: &InMemoryBackend) -> Vec<Outlet> {
        let outlets = vec![
            Outlet::new("Westside"),
            Outlet::new("Airport"),
            Outlet::new("Harbor"),
            Outlet::new("Closed Depot").inactive(),
        ];
        for outlet in &outlets {
            memory.insert_outlet(outlet.clone()).await;
        }
        outlets
    }

    fn names(context: &AuthContext) -> Vec<&str> {
        context.outlets.iter().map(|o| o.name.as_str()).collect()
    }

    // ==================== Login Tests ====================

    #[tokio::test]
    async fn test_admin_and_accountant_see_all_active_outlets_by_name() {
        init_tracing();
        for role in [Role::Admin, Role::Accountant] {
            let memory = InMemoryBackend::new();
            seed_user(&memory, role).await;
            seed_outlets(&memory).await;
            let auth = service(&memory);

            let context = auth.login(EMAIL, PASSWORD).await.unwrap();

            assert_eq!(names(&context), vec!["Airport", "Harbor", "Westside"]);
            assert_eq!(context.selected_outlet, None);
            assert_eq!(context.profile.role, role);
        }
    }

    #[tokio::test]
    async fn test_manager_with_single_active_assignment_is_preselected() {
        let memory = InMemoryBackend::new();
        let user = seed_user(&memory, Role::Manager).await;
        let outlets = seed_outlets(&memory).await;
        memory.assign_outlet(user.id, outlets[2].id).await;
        memory.assign_outlet(user.id, outlets[3].id).await;
        let auth = service(&memory);

        let context = auth.login(EMAIL, PASSWORD).await.unwrap();

        assert_eq!(names(&context), vec!["Harbor"]);
        assert_eq!(context.selected_outlet, Some(outlets[2].id));
    }

    #[tokio::test]
    async fn test_manager_with_several_assignments_has_no_selection() {
        let memory = InMemoryBackend::new();
        let user = seed_user(&memory, Role::Manager).await;
        let outlets = seed_outlets(&memory).await;
        memory.assign_outlet(user.id, outlets[0].id).await;
        memory.assign_outlet(user.id, outlets[1].id).await;
        let auth = service(&memory);

        let context = auth.login(EMAIL, PASSWORD).await.unwrap();

        assert_eq!(names(&context), vec!["Airport", "Westside"]);
        assert_eq!(context.selected_outlet, None);
    }

    #[tokio::test]
    async fn test_manager_without_assignments_has_no_outlets() {
        let memory = InMemoryBackend::new();
        seed_user(&memory, Role::Manager).await;
        seed_outlets(&memory).await;
        let auth = service(&memory);

        let context = auth.login(EMAIL, PASSWORD).await.unwrap();

        assert!(context.outlets.is_empty());
        assert_eq!(context.selected_outlet, None);
    }

    #[tokio::test]
    async fn test_other_roles_get_no_outlets() {
        let memory = InMemoryBackend::new();
        seed_user(&memory, Role::Other).await;
        seed_outlets(&memory).await;
        let auth = service(&memory);

        let context = auth.login(EMAIL, PASSWORD).await.unwrap();

        assert!(context.outlets.is_empty());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let memory = InMemoryBackend::new();
        seed_user(&memory, Role::Admin).await;
        let auth = service(&memory);

        let result = auth.login(EMAIL, "wrong-password").await;

        assert!(matches!(result, Err(ServiceError::AuthFailed(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_blank_input() {
        let memory = InMemoryBackend::new();
        let auth = service(&memory);

        assert!(matches!(
            auth.login("  ", PASSWORD).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            auth.login(EMAIL, "").await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_login_without_profile_fails() {
        let memory = InMemoryBackend::new();
        let user = memory.register_user(EMAIL, PASSWORD).await;
        let auth = service(&memory);

        let result = auth.login(EMAIL, PASSWORD).await;

        assert_eq!(result, Err(ServiceError::ProfileNotFound(user.id)));
    }

    #[tokio::test]
    async fn test_deactivated_login_fails_and_ends_session() {
        init_tracing();
        let memory = InMemoryBackend::new();
        let user = memory.register_user(EMAIL, PASSWORD).await;
        memory
            .insert_profile(UserProfile::new(user.id, Role::Admin).deactivated())
            .await;
        let auth = service(&memory);

        let result = auth.login(EMAIL, PASSWORD).await;

        assert_eq!(result, Err(ServiceError::AccountDeactivated));
        assert_eq!(auth.current_session().await.unwrap(), None);
    }

    // ==================== Session Tests ====================

    #[tokio::test]
    async fn test_logout_clears_session() {
        let memory = InMemoryBackend::new();
        seed_user(&memory, Role::Admin).await;
        let auth = service(&memory);
        auth.login(EMAIL, PASSWORD).await.unwrap();
        assert!(auth.current_session().await.unwrap().is_some());

        auth.logout().await.unwrap();

        assert_eq!(auth.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_current_user_profile_matches_login() {
        for role in [Role::Admin, Role::Accountant, Role::Manager] {
            let memory = InMemoryBackend::new();
            let user = seed_user(&memory, role).await;
            let outlets = seed_outlets(&memory).await;
            if role == Role::Manager {
                memory.assign_outlet(user.id, outlets[2].id).await;
                memory.assign_outlet(user.id, outlets[3].id).await;
            }
            let auth = service(&memory);
            let from_login = auth.login(EMAIL, PASSWORD).await.unwrap();

            let current = auth.current_user_profile().await.unwrap().unwrap();

            match role {
                Role::Manager => {
                    assert_eq!(names(&current), vec!["Harbor"]);
                    assert_eq!(current.selected_outlet, Some(outlets[2].id));
                }
                _ => {
                    assert_eq!(names(&current), vec!["Airport", "Harbor", "Westside"]);
                    assert_eq!(current.selected_outlet, None);
                }
            }
            assert_eq!(current, from_login);
        }
    }

    #[tokio::test]
    async fn test_current_user_profile_is_none_for_deactivated_profile() {
        init_tracing();
        let memory = InMemoryBackend::new();
        let user = memory.register_user(EMAIL, PASSWORD).await;
        memory
            .insert_profile(UserProfile::new(user.id, Role::Admin).deactivated())
            .await;
        seed_outlets(&memory).await;
        memory
            .sign_in_with_password(EMAIL, PASSWORD)
            .await
            .unwrap();
        let auth = service(&memory);

        assert_eq!(auth.current_user_profile().await.unwrap(), None);
        assert!(auth.current_session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_current_user_profile_is_none_without_session() {
        let memory = InMemoryBackend::new();
        seed_user(&memory, Role::Admin).await;
        let auth = service(&memory);

        assert_eq!(auth.current_user_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_current_user_profile_is_none_without_profile_row() {
        let memory = InMemoryBackend::new();
        memory.register_user(EMAIL, PASSWORD).await;
        memory
            .sign_in_with_password(EMAIL, PASSWORD)
            .await
            .unwrap();
        let auth = service(&memory);

        assert_eq!(auth.current_user_profile().await.unwrap(), None);
    }

    // ==================== Password Tests ====================

    #[tokio::test]
    async fn test_reset_password_passes_configured_redirect() {
        let memory = InMemoryBackend::new();
        let config = Config {
            password_reset_redirect: Some("https://app.example.com/reset".to_string()),
            ..Config::default()
        };
        let auth = service_with_config(&memory, &config);

        auth.reset_password(EMAIL).await.unwrap();

        assert_eq!(
            memory.password_reset_requests().await,
            vec![(
                EMAIL.to_string(),
                Some("https://app.example.com/reset".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_reset_password_rejects_blank_email() {
        let memory = InMemoryBackend::new();
        let auth = service(&memory);

        let result = auth.reset_password(" ").await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        assert!(memory.password_reset_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_password_requires_session() {
        let memory = InMemoryBackend::new();
        let auth = service(&memory);

        let result = auth.update_password("n3w-secret").await;

        assert_eq!(result, Err(ServiceError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_update_password_enforces_minimum_length() {
        let memory = InMemoryBackend::new();
        seed_user(&memory, Role::Admin).await;
        let auth = service(&memory);
        auth.login(EMAIL, PASSWORD).await.unwrap();

        let result = auth.update_password("abc").await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_update_password_allows_login_with_new_password() {
        let memory = InMemoryBackend::new();
        let user = seed_user(&memory, Role::Admin).await;
        let auth = service(&memory);
        auth.login(EMAIL, PASSWORD).await.unwrap();

        let updated = auth.update_password("n3w-secret").await.unwrap();
        auth.logout().await.unwrap();

        assert_eq!(updated.id, user.id);
        assert!(auth.login(EMAIL, "n3w-secret").await.is_ok());
    }
}
