use async_trait::async_trait;

use rentdesk_core::image::{ObjectStore, ObjectStoreError, Result, StoredObject};

use super::backend::{random_token, Blob, InMemoryBackend};

#[async_trait]
impl ObjectStore for InMemoryBackend {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject> {
        let mut objects = self.objects.write().await;
        if !upsert && objects.contains_key(key) {
            return Err(ObjectStoreError::AlreadyExists {
                key: key.to_string(),
            });
        }
        objects.insert(
            key.to_string(),
            Blob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(StoredObject {
            path: Some(key.to_string()),
        })
    }

    async fn create_signed_url(&self, key: &str, expires_in_seconds: u64) -> Result<String> {
        let objects = self.objects.read().await;
        if !objects.contains_key(key) {
            return Err(ObjectStoreError::NotFound {
                key: key.to_string(),
            });
        }
        Ok(format!(
            "memory://{}/{}?token={}&expires_in={}",
            self.bucket,
            key,
            random_token(),
            expires_in_seconds
        ))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut objects = self.objects.write().await;
        if objects.remove(key).is_none() {
            return Err(ObjectStoreError::NotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}
