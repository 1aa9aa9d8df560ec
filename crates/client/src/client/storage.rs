//! Object storage against the `/storage/v1` API.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use rentdesk_core::image::{ObjectStore, ObjectStoreError, Result, StoredObject};

use super::RemoteClient;
use crate::error::ClientError;

/// Upload response. `Key` is `<bucket>/<object path>`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: [&'a str; 1],
}

/// Object path inside `bucket` from an upload response key.
fn object_path(bucket: &str, reported: &str) -> String {
    reported
        .strip_prefix(bucket)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(reported)
        .to_string()
}

/// True when a storage error body says the object is missing.
fn is_missing(status: u16, message: &str) -> bool {
    status == 404 || message.to_lowercase().contains("not found")
}

/// True when a storage error body says the key is taken.
fn is_duplicate(status: u16, message: &str) -> bool {
    let message = message.to_lowercase();
    status == 409 || message.contains("duplicate") || message.contains("already exists")
}

impl RemoteClient {
    fn object_url(&self, action: Option<&str>, key: &str) -> url::Url {
        let mut segments = vec!["storage", "v1", "object"];
        segments.extend(action);
        segments.push(self.bucket.as_str());
        segments.extend(key.split('/'));
        self.endpoint(segments)
    }

    /// Absolute URL for a signed path returned by the sign endpoint.
    fn absolute_signed_url(&self, signed_path: &str) -> String {
        if signed_path.starts_with("http://") || signed_path.starts_with("https://") {
            return signed_path.to_string();
        }
        let base = self.endpoint(["storage", "v1"]);
        format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            signed_path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ObjectStore for RemoteClient {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject> {
        let response = self
            .request(Method::POST, self.object_url(None, key))
            .await?
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", upsert.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(ClientError::from)?;

        match self.handle_response::<UploadResponse>(response).await {
            Ok(uploaded) => Ok(StoredObject {
                path: uploaded.key.map(|k| object_path(&self.bucket, &k)),
            }),
            Err(ClientError::ServerError { status, message }) if is_duplicate(status, &message) => {
                Err(ObjectStoreError::AlreadyExists {
                    key: key.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_signed_url(&self, key: &str, expires_in_seconds: u64) -> Result<String> {
        let response = self
            .request(Method::POST, self.object_url(Some("sign"), key))
            .await?
            .json(&SignRequest {
                expires_in: expires_in_seconds,
            })
            .send()
            .await
            .map_err(ClientError::from)?;

        match self.handle_response::<SignResponse>(response).await {
            Ok(signed) => Ok(self.absolute_signed_url(&signed.signed_url)),
            Err(ClientError::ServerError { status, message }) if is_missing(status, &message) => {
                Err(ObjectStoreError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let response = self
            .request(
                Method::DELETE,
                self.endpoint(["storage", "v1", "object", self.bucket.as_str()]),
            )
            .await?
            .json(&RemoveRequest { prefixes: [key] })
            .send()
            .await
            .map_err(ClientError::from)?;

        // The API answers with the removed objects; none means nothing matched.
        let removed: Vec<serde_json::Value> = self.handle_response(response).await?;
        if removed.is_empty() {
            return Err(ObjectStoreError::NotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}
