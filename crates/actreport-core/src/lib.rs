//! Activity Report Core Library
//!
//! This crate provides the domain models, validation, configuration, error
//! types and notifications shared by all actreport components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod notification;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, RecordConfig, StorageConfig};
pub use error::{ErrorMetadata, FormError, LogLevel};
pub use notification::{MemoryNotifier, Notification, NotificationVariant, Notifier, TracingNotifier};
pub use storage_types::{RecordBackend, StorageBackend};
pub use validation::{AttachmentError, AttachmentRules, FormRules, ValidationError};
