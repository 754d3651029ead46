//! Shared key generation for storage backends.
//!
//! Key format: `{folder_id}/{file_id}_{file_name}`. File names are reduced to
//! their last path component and to a safe character set first.

use crate::traits::{StorageError, StorageResult};
use uuid::Uuid;

/// Fresh identifier for an uploaded file
pub fn generate_file_id() -> String {
    format!("file_{}", Uuid::new_v4().simple())
}

/// Keep the last path component and replace anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');

    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Folder identifiers become a single path segment, so they are checked strictly.
pub fn validate_folder_id(folder_id: &str) -> StorageResult<()> {
    if folder_id.is_empty()
        || folder_id.contains("..")
        || folder_id.contains('/')
        || folder_id.contains('\\')
    {
        return Err(StorageError::InvalidKey(format!(
            "Invalid folder id: {:?}",
            folder_id
        )));
    }
    Ok(())
}

/// Generate a storage key for a file uploaded into `folder_id`.
pub fn generate_storage_key(folder_id: &str, file_id: &str, file_name: &str) -> StorageResult<String> {
    validate_folder_id(folder_id)?;
    Ok(format!(
        "{}/{}_{}",
        folder_id,
        file_id,
        sanitize_file_name(file_name)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("camp photo (1).jpg"), "camp_photo__1_.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn test_generate_storage_key() {
        let key = generate_storage_key("photos", "file_1", "camp.jpg").unwrap();
        assert_eq!(key, "photos/file_1_camp.jpg");
    }

    #[test]
    fn test_invalid_folder_ids() {
        for folder in ["", "..", "a/b", "a\\b", "../x"] {
            assert!(
                matches!(
                    generate_storage_key(folder, "file_1", "x.jpg"),
                    Err(StorageError::InvalidKey(_))
                ),
                "accepted {:?}",
                folder
            );
        }
    }

    #[test]
    fn test_file_ids_are_unique() {
        let a = generate_file_id();
        let b = generate_file_id();
        assert!(a.starts_with("file_"));
        assert_ne!(a, b);
    }
}
