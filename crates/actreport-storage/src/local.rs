use crate::keys::{generate_file_id, generate_storage_key};
use crate::traits::{AttachmentStore, StorageError, StorageResult};
use actreport_core::models::{Attachment, UploadedFileRef};
use actreport_core::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Folders map to subdirectories of `base_path`; URLs are built from
/// `base_url` for whatever serves that directory.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for uploaded files (e.g., "./data/uploads")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8080/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for LocalStorage {
    async fn upload(
        &self,
        folder_id: &str,
        attachment: &Attachment,
    ) -> StorageResult<UploadedFileRef> {
        let id = generate_file_id();
        let key = generate_storage_key(folder_id, &id, &attachment.name)?;
        let path = self.key_to_path(&key)?;
        let size = attachment.size();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&attachment.data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            folder_id = %folder_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(UploadedFileRef {
            name: attachment.name.clone(),
            id,
            url,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_upload() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/uploads/".to_string())
            .await
            .unwrap();

        let attachment = Attachment::new("camp.jpg", "image/jpeg", b"jpeg bytes".to_vec());
        let uploaded = storage.upload("photos", &attachment).await.unwrap();

        assert_eq!(uploaded.name, "camp.jpg");
        assert_eq!(
            uploaded.url,
            format!("http://localhost:8080/uploads/photos/{}_camp.jpg", uploaded.id)
        );

        let on_disk = dir
            .path()
            .join("photos")
            .join(format!("{}_camp.jpg", uploaded.id));
        assert_eq!(std::fs::read(on_disk).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_same_name_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost/u".to_string())
            .await
            .unwrap();

        let first = storage
            .upload("reports", &Attachment::new("r.pdf", "application/pdf", b"one".to_vec()))
            .await
            .unwrap();
        let second = storage
            .upload("reports", &Attachment::new("r.pdf", "application/pdf", b"two".to_vec()))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.url, second.url);
        assert_eq!(std::fs::read_dir(dir.path().join("reports")).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost/u".to_string())
            .await
            .unwrap();

        let attachment = Attachment::new("x.jpg", "image/jpeg", b"x".to_vec());
        let result = storage.upload("../outside", &attachment).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        assert!(matches!(
            storage.key_to_path("/etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_backend_type() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost/u".to_string())
            .await
            .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
