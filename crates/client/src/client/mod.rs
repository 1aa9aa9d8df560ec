//! HTTP client for the hosted rentdesk backend.
//!
//! [`RemoteClient`] implements every backend trait from `rentdesk_core`
//! against a Supabase-style API: GoTrue under `/auth/v1`, PostgREST under
//! `/rest/v1` and the storage API under `/storage/v1`.

pub mod auth;
pub mod query;
pub mod rows;
pub mod storage;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use rentdesk_core::auth::Session;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use url::Url;

use crate::error::{ClientError, Result};

/// HTTP client for the remote backend.
///
/// Clones share the cached session.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    bucket: String,
    session: Arc<RwLock<Option<Session>>>,
    /// Serializes refreshes so a refresh token is spent once.
    refresh_lock: Arc<Mutex<()>>,
}

impl RemoteClient {
    /// Create a client for the project at `base_url`.
    pub fn new(base_url: &str, anon_key: impl Into<String>, bucket: impl Into<String>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidResponse(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }
        base_url.set_query(None);

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            anon_key: anon_key.into(),
            bucket: bucket.into(),
            session: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Seed the client with a previously stored session.
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = Arc::new(RwLock::new(session));
        self
    }

    /// The cached session, without refreshing it.
    pub async fn session_snapshot(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Build a URL from path segments. Each segment is percent-encoded.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request carrying the API key and a bearer token.
    ///
    /// The token is the live session's access token, refreshed first when it
    /// has expired, or the anon key when nobody is signed in.
    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let bearer = match self.live_session().await? {
            Some(session) => session.access_token,
            None => self.anon_key.clone(),
        };
        Ok(self.request_with_token(method, url, &bearer))
    }

    fn request_with_token(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// Decode a successful response or turn an error status into a
    /// [`ClientError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(ClientError::from)
    }

    /// Handle responses whose body is ignored.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(status = status.as_u16(), %message, "Backend returned an error");
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url.as_str())
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

/// Error bodies across the auth, rest and storage APIs.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Best human-readable message in an error body.
fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}
