//! Identity operations against the `/auth/v1` API.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use rentdesk_core::auth::{
    is_session_expired, AuthUser, IdentityError, IdentityProvider, Session,
};

use super::RemoteClient;
use crate::error::{ClientError, Result};

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Absolute expiry as a unix timestamp, when the server sends one.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    /// Convert to a [`Session`], resolving the expiry against `now`.
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct UpdateUserRequest<'a> {
    password: &'a str,
}

impl RemoteClient {
    fn token_url(&self, grant_type: &str) -> url::Url {
        let mut url = self.endpoint(["auth", "v1", "token"]);
        url.query_pairs_mut().append_pair("grant_type", grant_type);
        url
    }

    /// The cached session, refreshed when it has expired.
    ///
    /// An expired session without a refresh token, or whose refresh token
    /// the server rejects, is dropped and `None` is returned.
    pub(crate) async fn live_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.session_snapshot().await else {
            return Ok(None);
        };
        if !is_session_expired(&session, Utc::now()) {
            return Ok(Some(session));
        }

        // Another caller may have refreshed while this one waited.
        let _refreshing = self.refresh_lock.lock().await;
        let Some(session) = self.session_snapshot().await else {
            return Ok(None);
        };
        if !is_session_expired(&session, Utc::now()) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            tracing::debug!(user_id = %session.user.id, "Session expired without refresh token");
            self.session.write().await.take();
            return Ok(None);
        };

        match self.refresh_session(refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(ClientError::ServerError { status, message }) if (400..500).contains(&status) => {
                tracing::warn!(status, %message, "Session refresh rejected");
                self.session.write().await.take();
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let response = self
            .request_with_token(Method::POST, self.token_url("refresh_token"), &self.anon_key)
            .json(&RefreshGrant { refresh_token })
            .send()
            .await?;
        let token: TokenResponse = self.handle_response(response).await?;
        let session = token.into_session(Utc::now());

        tracing::debug!(user_id = %session.user.id, "Session refreshed");
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }
}

#[async_trait]
impl IdentityProvider for RemoteClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> rentdesk_core::auth::Result<Session> {
        let response = self
            .request_with_token(Method::POST, self.token_url("password"), &self.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(ClientError::from)?;

        let token: TokenResponse = match self.handle_response(response).await {
            Ok(token) => token,
            Err(ClientError::ServerError { status, message })
                if matches!(status, 400 | 401 | 422) =>
            {
                return Err(IdentityError::InvalidCredentials(message));
            }
            Err(err) => return Err(err.into()),
        };

        let session = token.into_session(Utc::now());
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> rentdesk_core::auth::Result<()> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        let response = self
            .request_with_token(
                Method::POST,
                self.endpoint(["auth", "v1", "logout"]),
                &session.access_token,
            )
            .send()
            .await
            .map_err(ClientError::from)?;

        match self.handle_empty_response(response).await {
            Ok(()) => Ok(()),
            // The token is already invalid on the server.
            Err(ClientError::ServerError { status: 401 | 403 | 404, .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn current_session(&self) -> rentdesk_core::auth::Result<Option<Session>> {
        Ok(self.live_session().await?)
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> rentdesk_core::auth::Result<()> {
        let mut url = self.endpoint(["auth", "v1", "recover"]);
        if let Some(redirect_to) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        }

        let response = self
            .request(Method::POST, url)
            .await?
            .json(&RecoverRequest { email })
            .send()
            .await
            .map_err(ClientError::from)?;
        Ok(self.handle_empty_response(response).await?)
    }

    async fn update_password(&self, new_password: &str) -> rentdesk_core::auth::Result<AuthUser> {
        let session = self.live_session().await?.ok_or(ClientError::NoSession)?;

        let response = self
            .request_with_token(
                Method::PUT,
                self.endpoint(["auth", "v1", "user"]),
                &session.access_token,
            )
            .json(&UpdateUserRequest {
                password: new_password,
            })
            .send()
            .await
            .map_err(ClientError::from)?;

        match self.handle_response(response).await {
            Ok(user) => Ok(user),
            Err(ClientError::ServerError { status: 422, message }) => {
                Err(IdentityError::Provider(message))
            }
            Err(err) => Err(err.into()),
        }
    }
}
