//! Error types module
//!
//! Errors raised while editing a draft live here. Storage and record-store
//! errors are defined next to their traits in `actreport-storage`, and the
//! submission pipeline wraps all of them in `actreport-form`.
//!
//! Every error that can reach the user implements [`ErrorMetadata`], which
//! describes how it is presented as a notification and logged.

use crate::models::{AttachmentCategory, FieldName, FormVariant};
use crate::validation::{AttachmentError, ValidationError};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues the user can fix
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Describes how an error is presented to the person filling the form
pub trait ErrorMetadata {
    /// Notification title (e.g., "Validation Error")
    fn notification_title(&self) -> &'static str;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Whether resubmitting the same draft can succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Field {field} is not part of the {variant} form")]
    FieldNotInVariant {
        field: FieldName,
        variant: FormVariant,
    },

    #[error("No {category} attachment at position {index} ({len} attached)")]
    AttachmentIndex {
        category: AttachmentCategory,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("A submission is already in progress")]
    SubmissionInProgress,
}

impl ErrorMetadata for FormError {
    fn notification_title(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "Validation Error",
            FormError::Attachment(_) => "File Rejected",
            FormError::SubmissionInProgress => "Submission In Progress",
            FormError::FieldNotInVariant { .. } | FormError::AttachmentIndex { .. } => {
                "Invalid Action"
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            FormError::Validation(err) => err.to_string(),
            FormError::Attachment(err) => err.to_string(),
            FormError::SubmissionInProgress => {
                "Your report is still being submitted. Please wait.".to_string()
            }
            FormError::FieldNotInVariant { field, .. } => {
                format!("The {} field is not available on this form", field.label())
            }
            FormError::AttachmentIndex { category, .. } => {
                format!("That {} is no longer attached", category.noun())
            }
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, FormError::SubmissionInProgress)
    }

    fn log_level(&self) -> LogLevel {
        match self {
            FormError::Validation(_) | FormError::SubmissionInProgress => LogLevel::Debug,
            FormError::Attachment(_) => LogLevel::Warn,
            FormError::FieldNotInVariant { .. } | FormError::AttachmentIndex { .. } => {
                LogLevel::Warn
            }
        }
    }
}
