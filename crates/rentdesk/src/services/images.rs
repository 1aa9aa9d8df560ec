use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use rentdesk_core::image::{build_image_key, ImageUpload, ObjectStore, UploadedImage};

use super::logged;
use crate::{Backend, Config, Result, ServiceError};

/// Inventory images in the object store.
#[derive(Clone)]
pub struct ImageService {
    objects: Arc<dyn ObjectStore>,
    signed_url_ttl_seconds: u64,
}

impl ImageService {
    pub fn new(backend: &Backend, config: &Config) -> Self {
        Self {
            objects: backend.objects.clone(),
            signed_url_ttl_seconds: config.signed_url_ttl_seconds,
        }
    }

    /// Stores an image under `inventory/<outlet>/<millis>_<file name>`.
    ///
    /// Existing keys are never overwritten.
    #[tracing::instrument(
        skip(self, upload),
        fields(file_name = %upload.file_name, size = upload.bytes.len())
    )]
    pub async fn upload_image(&self, upload: ImageUpload, outlet_id: Uuid) -> Result<UploadedImage> {
        let key = logged(
            build_image_key(outlet_id, &upload.file_name, Utc::now()),
            "build image key",
        )?;

        let stored = logged(
            self.objects
                .upload(&key, upload.bytes, &upload.content_type, false)
                .await,
            "upload image",
        )?;

        let key = stored.path.unwrap_or(key);
        tracing::info!(%key, "Image uploaded");
        Ok(UploadedImage { key })
    }

    /// A read URL for `key` valid for the configured lifetime.
    pub async fn signed_url(&self, key: &str) -> Result<String> {
        self.signed_url_with_expiry(key, self.signed_url_ttl_seconds)
            .await
    }

    /// A read URL for `key` valid for `expires_in_seconds`.
    #[tracing::instrument(skip(self))]
    pub async fn signed_url_with_expiry(&self, key: &str, expires_in_seconds: u64) -> Result<String> {
        if expires_in_seconds == 0 {
            return logged(
                Err(ServiceError::InvalidInput(
                    "signed URL expiry must be positive".to_string(),
                )),
                "validate expiry",
            );
        }

        logged(
            self.objects
                .create_signed_url(key, expires_in_seconds)
                .await,
            "sign image url",
        )
    }

    /// Removes the image stored under `key`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_image(&self, key: &str) -> Result<()> {
        logged(self.objects.remove(key).await, "delete image")?;
        tracing::info!(%key, "Image deleted");
        Ok(())
    }
}

impl std::fmt::Debug for ImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageService")
            .field("signed_url_ttl_seconds", &self.signed_url_ttl_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::storage::inmemory::InMemoryBackend;

    fn service(memory: &InMemoryBackend) -> ImageService {
        service_with_config(memory, &Config::default())
    }

    fn service_with_config(memory: &InMemoryBackend, config: &Config) -> ImageService {
        ImageService::new(&Backend::from_shared(Arc::new(memory.clone())), config)
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[tokio::test]
    async fn test_upload_uses_outlet_scoped_key() {
        let memory = InMemoryBackend::new();
        let images = service(&memory);
        let outlet_id = Uuid::new_v4();

        let uploaded = images.upload_image(png("tent.png"), outlet_id).await.unwrap();

        let prefix = format!("inventory/{outlet_id}/");
        let rest = uploaded.key.strip_prefix(&prefix).unwrap();
        let (millis, file_name) = rest.split_once('_').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(file_name, "tent.png");

        let (bytes, content_type) = memory.stored_object(&uploaded.key).await.unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_file_names() {
        let memory = InMemoryBackend::new();
        let images = service(&memory);

        for name in ["", "../escape.png"] {
            let result = images.upload_image(png(name), Uuid::new_v4()).await;
            assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_upload_sign_delete_lifecycle() {
        let memory = InMemoryBackend::new();
        let images = service(&memory);

        let uploaded = images
            .upload_image(png("chair.png"), Uuid::new_v4())
            .await
            .unwrap();

        let url = images.signed_url(&uploaded.key).await.unwrap();
        assert!(url.contains(&uploaded.key));
        assert!(url.ends_with("expires_in=3600"));

        images.delete_image(&uploaded.key).await.unwrap();

        let result = images.signed_url(&uploaded.key).await;
        assert!(matches!(
            result,
            Err(ServiceError::NotFound {
                entity_type: "Object",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_signed_url_uses_configured_ttl() {
        let memory = InMemoryBackend::new();
        let config = Config {
            signed_url_ttl_seconds: 120,
            ..Config::default()
        };
        let images = service_with_config(&memory, &config);
        let uploaded = images
            .upload_image(png("chair.png"), Uuid::new_v4())
            .await
            .unwrap();

        let default = images.signed_url(&uploaded.key).await.unwrap();
        let explicit = images
            .signed_url_with_expiry(&uploaded.key, 60)
            .await
            .unwrap();

        assert!(default.ends_with("expires_in=120"));
        assert!(explicit.ends_with("expires_in=60"));
    }

    #[tokio::test]
    async fn test_zero_expiry_is_rejected() {
        let memory = InMemoryBackend::new();
        let images = service(&memory);

        let result = images.signed_url_with_expiry("inventory/x/1_a.png", 0).await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_image_is_not_found() {
        let memory = InMemoryBackend::new();
        let images = service(&memory);

        let result = images.delete_image("inventory/x/1_a.png").await;

        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }
}
