//! Storage abstraction traits
//!
//! [`AttachmentStore`] uploads files into folder-scoped targets and
//! [`RecordStore`] appends normalized rows. Production backends and the
//! in-memory fakes both implement these, so the submission pipeline never
//! depends on a concrete service.

use actreport_core::error::{ErrorMetadata, LogLevel};
use actreport_core::models::{Attachment, NormalizedRecord, UploadedFileRef};
use actreport_core::{RecordBackend, StorageBackend};
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record store rejected the row: {0}")]
    Rejected(String),

    #[error("Record store unreachable: {0}")]
    Unavailable(String),

    #[error("Failed to encode record: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordError>;

impl ErrorMetadata for StorageError {
    fn notification_title(&self) -> &'static str {
        "Submission Failed"
    }

    fn client_message(&self) -> String {
        "There was an error uploading your files. Please try again.".to_string()
    }

    fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            StorageError::ConfigError(_) | StorageError::InvalidKey(_)
        )
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

impl ErrorMetadata for RecordError {
    fn notification_title(&self) -> &'static str {
        "Submission Failed"
    }

    fn client_message(&self) -> String {
        "There was an error saving your form. Please try again.".to_string()
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, RecordError::Unavailable(_) | RecordError::IoError(_))
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Folder-scoped file storage
///
/// Each upload produces a fresh identifier and a location URL. Two uploads of
/// the same file name into the same folder never overwrite each other.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Upload one attachment into `folder_id`
    async fn upload(&self, folder_id: &str, attachment: &Attachment)
        -> StorageResult<UploadedFileRef>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Append-only tabular record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one row. Either the whole row is stored or an error is returned.
    async fn append(&self, record: &NormalizedRecord) -> RecordResult<()>;

    /// Get the record backend type
    fn backend_type(&self) -> RecordBackend;
}
