use async_trait::async_trait;

use super::{ObjectStoreError, StoredObject};

/// Result type for object store operations.
pub type Result<T> = std::result::Result<T, ObjectStoreError>;

/// Keyed binary object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`. With `upsert` false an existing key fails
    /// with [`ObjectStoreError::AlreadyExists`].
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject>;

    /// Issue a read URL for `key` that stops working after `expires_in_seconds`.
    async fn create_signed_url(&self, key: &str, expires_in_seconds: u64) -> Result<String>;

    /// Delete the object stored under `key`.
    async fn remove(&self, key: &str) -> Result<()>;
}
