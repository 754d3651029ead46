//! Activity Report Storage Library
//!
//! Attachment stores (S3, local filesystem, memory) and record stores
//! (sheet webhook, JSON-lines journal, memory) behind two traits.
//!
//! # Storage key format
//!
//! Attachments are folder-scoped. Every backend uses the same key layout:
//! `{folder_id}/{file_id}_{sanitized_name}`. The file id is fresh per upload,
//! so uploading the same name twice keeps both files.
//!
//! Folder ids must not contain `..` or path separators. Key generation is
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod journal;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
#[cfg(feature = "records-webhook")]
pub mod webhook;

// Re-export commonly used types
pub use actreport_core::{RecordBackend, StorageBackend};
pub use factory::{create_attachment_store, create_record_store};
pub use journal::JournalStore;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::{MemoryRecordStore, MemoryStorage, RecordGate, StoredFile};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{
    AttachmentStore, RecordError, RecordResult, RecordStore, StorageError, StorageResult,
};
#[cfg(feature = "records-webhook")]
pub use webhook::SheetWebhookStore;
