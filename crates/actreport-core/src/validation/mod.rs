//! Validation modules

pub mod attachment;
pub mod draft;

pub use attachment::{AttachmentError, AttachmentRules};
pub use draft::{validate_draft, ValidationError};

use crate::models::AttachmentCategory;

/// Rules applied by the form controller while editing and before submitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRules {
    /// Reject beneficiary counts that are not whole numbers
    pub require_numeric_beneficiaries: bool,
    pub photos: AttachmentRules,
    pub reports: AttachmentRules,
}

impl FormRules {
    pub fn for_category(&self, category: AttachmentCategory) -> &AttachmentRules {
        match category {
            AttachmentCategory::Photos => &self.photos,
            AttachmentCategory::Reports => &self.reports,
        }
    }
}
