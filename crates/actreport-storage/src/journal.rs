use crate::traits::{RecordResult, RecordStore};
use actreport_core::models::NormalizedRecord;
use actreport_core::RecordBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Appends one JSON object per line to a local file
pub struct JournalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JournalStore {
    pub async fn new(path: impl Into<PathBuf>) -> RecordResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JournalStore {
    async fn append(&self, record: &NormalizedRecord) -> RecordResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.sync_data().await?;

        tracing::info!(
            path = %self.path.display(),
            timestamp = %record.timestamp,
            "Record appended to journal"
        );
        Ok(())
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Journal
    }
}
