#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
#[cfg(feature = "records-webhook")]
use crate::SheetWebhookStore;
use crate::{
    AttachmentStore, JournalStore, MemoryRecordStore, MemoryStorage, RecordError, RecordResult,
    RecordStore, StorageError, StorageResult,
};
use actreport_core::{Config, RecordBackend, StorageBackend};
use std::sync::Arc;

/// Create an attachment store based on configuration
pub async fn create_attachment_store(config: &Config) -> StorageResult<Arc<dyn AttachmentStore>> {
    let storage = &config.storage;

    match storage.backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = storage
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = storage
                .s3_region
                .clone()
                .or_else(|| storage.aws_region.clone())
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;

            let store = S3Storage::new(bucket, region, storage.s3_endpoint.clone()).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let store = LocalStorage::new(
                storage.local_storage_path.clone(),
                storage.local_storage_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}

/// Create a record store based on configuration
pub async fn create_record_store(config: &Config) -> RecordResult<Arc<dyn RecordStore>> {
    let records = &config.records;

    match records.backend {
        #[cfg(feature = "records-webhook")]
        RecordBackend::Webhook => {
            let url = records.sheet_webhook_url.clone().ok_or_else(|| {
                RecordError::ConfigError("SHEET_WEBHOOK_URL not configured".to_string())
            })?;
            let timeout = std::time::Duration::from_secs(records.sheet_webhook_timeout_secs);
            Ok(Arc::new(SheetWebhookStore::new(url, timeout)?))
        }

        #[cfg(not(feature = "records-webhook"))]
        RecordBackend::Webhook => Err(RecordError::ConfigError(
            "Webhook record backend not available (records-webhook feature not enabled)"
                .to_string(),
        )),

        RecordBackend::Journal => Ok(Arc::new(
            JournalStore::new(records.journal_path.clone()).await?,
        )),

        RecordBackend::Memory => Ok(Arc::new(MemoryRecordStore::new())),
    }
}
