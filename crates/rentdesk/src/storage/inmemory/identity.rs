use async_trait::async_trait;
use chrono::Utc;

use rentdesk_core::auth::{
    is_session_expired, AuthUser, IdentityError, IdentityProvider, Result, Session,
};

use super::backend::{random_token, InMemoryBackend};

#[async_trait]
impl IdentityProvider for InMemoryBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&email.to_lowercase())
            .filter(|account| account.password == password)
            .ok_or_else(|| IdentityError::InvalidCredentials("Invalid login credentials".into()))?;

        let session = Session {
            access_token: random_token(),
            refresh_token: Some(random_token()),
            expires_at: Utc::now() + self.session_ttl,
            user: account.user.clone(),
        };
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        self.session.write().await.take();
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        let mut session = self.session.write().await;
        if session
            .as_ref()
            .is_some_and(|s| is_session_expired(s, Utc::now()))
        {
            session.take();
        }
        Ok((*session).clone())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<()> {
        // Unknown addresses succeed as well, matching the remote provider.
        self.password_resets
            .write()
            .await
            .push((email.to_string(), redirect_to.map(str::to_string)));
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<AuthUser> {
        let user_id = self
            .current_session()
            .await?
            .map(|s| s.user.id)
            .ok_or(IdentityError::NoSession)?;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.user.id == user_id)
            .ok_or_else(|| IdentityError::Provider(format!("user {user_id} not found")))?;
        account.password = new_password.to_string();
        Ok(account.user.clone())
    }
}
