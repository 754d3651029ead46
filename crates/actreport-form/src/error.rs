use actreport_core::error::{ErrorMetadata, FormError, LogLevel};
use actreport_core::ValidationError;
use actreport_storage::{RecordError, StorageError};
use thiserror::Error;

const SUBMISSION_FAILED_TITLE: &str = "Submission Failed";
const SUBMISSION_FAILED_MESSAGE: &str = "There was an error saving your form. Please try again.";

/// One file of a batch could not be stored
#[derive(Debug, Error)]
#[error("Failed to upload {file} to folder {folder_id}: {source}")]
pub struct UploadError {
    pub file: String,
    pub folder_id: String,
    #[source]
    pub source: StorageError,
}

/// Everything that can stop a submission
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Storage setup failed: {0}")]
    Storage(#[from] StorageError),
}

impl From<ValidationError> for SubmitError {
    fn from(err: ValidationError) -> Self {
        SubmitError::Form(FormError::Validation(err))
    }
}

impl SubmitError {
    /// True when the pipeline ran and a backend failed
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(
            self,
            SubmitError::Upload(_) | SubmitError::Record(_) | SubmitError::Storage(_)
        )
    }
}

impl ErrorMetadata for SubmitError {
    fn notification_title(&self) -> &'static str {
        match self {
            SubmitError::Form(err) => err.notification_title(),
            SubmitError::Upload(_) | SubmitError::Record(_) | SubmitError::Storage(_) => {
                SUBMISSION_FAILED_TITLE
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            SubmitError::Form(err) => err.client_message(),
            SubmitError::Upload(_) | SubmitError::Record(_) | SubmitError::Storage(_) => {
                SUBMISSION_FAILED_MESSAGE.to_string()
            }
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            SubmitError::Form(err) => err.is_recoverable(),
            SubmitError::Upload(err) => err.source.is_recoverable(),
            SubmitError::Record(err) => err.is_recoverable(),
            SubmitError::Storage(err) => err.is_recoverable(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            SubmitError::Form(err) => err.log_level(),
            SubmitError::Upload(_) | SubmitError::Record(_) | SubmitError::Storage(_) => {
                LogLevel::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actreport_core::models::FieldName;

    #[test]
    fn test_backend_failures_share_generic_message() {
        let upload = SubmitError::from(UploadError {
            file: "camp.jpg".to_string(),
            folder_id: "photos".to_string(),
            source: StorageError::UploadFailed("timeout".to_string()),
        });
        let record = SubmitError::from(RecordError::Unavailable("down".to_string()));

        for err in [&upload, &record] {
            assert_eq!(err.notification_title(), "Submission Failed");
            assert_eq!(
                err.client_message(),
                "There was an error saving your form. Please try again."
            );
            assert_eq!(err.log_level(), LogLevel::Error);
            assert!(err.is_pipeline_failure());
        }
        assert!(upload.to_string().contains("camp.jpg"));
    }

    #[test]
    fn test_form_errors_keep_their_metadata() {
        let err = SubmitError::from(ValidationError::MissingField(FieldName::Date));
        assert_eq!(err.notification_title(), "Validation Error");
        assert_eq!(
            err.client_message(),
            "Please fill in all required fields. Missing: activity date"
        );
        assert!(!err.is_pipeline_failure());
    }
}
