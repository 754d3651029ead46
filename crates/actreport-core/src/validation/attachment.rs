use crate::models::{Attachment, AttachmentCategory};

/// Reasons a file is refused when it is attached to a draft
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("{name} is too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { name: String, size: usize, max: usize },

    #[error("{name} is not an accepted {} (allowed: {})", .category.noun(), .allowed.join(", "))]
    UnsupportedType {
        name: String,
        category: AttachmentCategory,
        allowed: Vec<String>,
    },

    #[error("{0} is empty")]
    EmptyFile(String),
}

/// Which files a category accepts
///
/// A file is accepted when its extension is listed, or when its content type
/// starts with one of the listed prefixes (photos accept any `image/` type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRules {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub content_type_prefixes: Vec<String>,
}

impl AttachmentRules {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        content_type_prefixes: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            content_type_prefixes,
        }
    }

    pub fn check(
        &self,
        category: AttachmentCategory,
        attachment: &Attachment,
    ) -> Result<(), AttachmentError> {
        let size = attachment.size();
        if size == 0 {
            return Err(AttachmentError::EmptyFile(attachment.name.clone()));
        }
        if size > self.max_file_size {
            return Err(AttachmentError::FileTooLarge {
                name: attachment.name.clone(),
                size,
                max: self.max_file_size,
            });
        }

        let extension_ok = attachment
            .extension()
            .is_some_and(|ext| self.allowed_extensions.contains(&ext));
        let content_type = attachment.content_type.to_lowercase();
        let content_type_ok = self
            .content_type_prefixes
            .iter()
            .any(|prefix| content_type.starts_with(prefix.as_str()));

        if !extension_ok && !content_type_ok {
            return Err(AttachmentError::UnsupportedType {
                name: attachment.name.clone(),
                category,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }
}
