//! Activity Report Form Library
//!
//! The [`FormController`] edits a draft report and drives submission through
//! the [`SubmissionAdapter`], which uploads attachments and appends the
//! normalized record.

pub mod adapter;
pub mod controller;
pub mod error;
pub mod summary;

pub use adapter::{FolderTarget, SubmissionAdapter};
pub use controller::FormController;
pub use error::{SubmitError, UploadError};
pub use summary::format_submission;
