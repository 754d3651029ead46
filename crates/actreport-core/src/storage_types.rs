use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Where attachments are uploaded
///
/// Defined in core because configuration selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Where normalized records are appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordBackend {
    /// HTTP web app in front of the spreadsheet
    Webhook,
    /// JSON-lines file on local disk
    Journal,
    Memory,
}

impl FromStr for RecordBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webhook" | "sheet" => Ok(RecordBackend::Webhook),
            "journal" | "file" => Ok(RecordBackend::Journal),
            "memory" => Ok(RecordBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid record backend: {}", s)),
        }
    }
}

impl Display for RecordBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordBackend::Webhook => write!(f, "webhook"),
            RecordBackend::Journal => write!(f, "journal"),
            RecordBackend::Memory => write!(f, "memory"),
        }
    }
}
