use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Which collection an attachment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentCategory {
    Photos,
    Reports,
}

impl AttachmentCategory {
    /// Singular noun used in user-facing messages
    pub fn noun(&self) -> &'static str {
        match self {
            AttachmentCategory::Photos => "photo",
            AttachmentCategory::Reports => "report file",
        }
    }
}

impl FromStr for AttachmentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "photos" | "photo" => Ok(AttachmentCategory::Photos),
            "reports" | "report" | "reportfiles" => Ok(AttachmentCategory::Reports),
            _ => Err(anyhow::anyhow!("Invalid attachment category: {}", s)),
        }
    }
}

impl Display for AttachmentCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AttachmentCategory::Photos => write!(f, "photos"),
            AttachmentCategory::Reports => write!(f, "reports"),
        }
    }
}

/// A user-supplied file held by the draft until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Result of uploading one attachment to a storage folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileRef {
    pub name: String,
    pub id: String,
    pub url: String,
}
