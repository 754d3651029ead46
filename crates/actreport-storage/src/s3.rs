use crate::keys::{generate_file_id, generate_storage_key};
use crate::traits::{AttachmentStore, StorageError, StorageResult};
use actreport_core::models::{Attachment, UploadedFileRef};
use actreport_core::StorageBackend;
use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};

/// S3 storage implementation
///
/// Folders become key prefixes inside one bucket.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Credentials come from the environment; region and bucket are explicit.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Generate public URL for S3 object
    ///
    /// For AWS S3: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, path-style: {endpoint}/{bucket}/{key}
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }
}

#[async_trait]
impl AttachmentStore for S3Storage {
    async fn upload(
        &self,
        folder_id: &str,
        attachment: &Attachment,
    ) -> StorageResult<UploadedFileRef> {
        let id = generate_file_id();
        let key = generate_storage_key(folder_id, &id, &attachment.name)?;
        let size = attachment.size() as u64;
        let location = Path::from(key.clone());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put(&location, PutPayload::from(attachment.data.clone()))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            folder_id = %folder_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(UploadedFileRef {
            name: attachment.name.clone(),
            id,
            url,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
