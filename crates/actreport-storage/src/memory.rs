//! In-memory backends
//!
//! Used by tests and by `STORAGE_BACKEND=memory` / `RECORD_BACKEND=memory`
//! for dry runs. Both can be told to fail so the pipeline's error paths can be
//! exercised without a real service.

use crate::keys::{generate_file_id, validate_folder_id};
use crate::traits::{
    AttachmentStore, RecordError, RecordResult, RecordStore, StorageError, StorageResult,
};
use actreport_core::constants::DEFAULT_FILE_URL_BASE;
use actreport_core::models::{Attachment, NormalizedRecord, UploadedFileRef};
use actreport_core::{RecordBackend, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A file held by [`MemoryStorage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub folder_id: String,
    pub file: UploadedFileRef,
    pub data: Bytes,
}

/// Storage that keeps uploads in memory and returns Drive-style links
pub struct MemoryStorage {
    files: Mutex<Vec<StoredFile>>,
    fail_on: Mutex<HashSet<String>>,
    upload_delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    url_base: String,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            fail_on: Mutex::new(HashSet::new()),
            upload_delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            url_base: DEFAULT_FILE_URL_BASE.to_string(),
        }
    }

    /// Hold every upload open for `delay` before completing it
    pub fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = Some(delay);
        self
    }

    /// Make uploads of files named `name` fail
    pub fn fail_on(&self, name: &str) {
        lock(&self.fail_on).insert(name.to_string());
    }

    pub fn clear_failures(&self) {
        lock(&self.fail_on).clear();
    }

    /// Everything uploaded so far, in completion order
    pub fn files(&self) -> Vec<StoredFile> {
        lock(&self.files).clone()
    }

    pub fn files_in(&self, folder_id: &str) -> Vec<StoredFile> {
        lock(&self.files)
            .iter()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect()
    }

    /// Highest number of uploads observed running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentStore for MemoryStorage {
    async fn upload(
        &self,
        folder_id: &str,
        attachment: &Attachment,
    ) -> StorageResult<UploadedFileRef> {
        validate_folder_id(folder_id)?;

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.upload_delay {
            tokio::time::sleep(delay).await;
        }

        let should_fail = lock(&self.fail_on).contains(&attachment.name);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if should_fail {
            tracing::debug!(folder_id = %folder_id, name = %attachment.name, "Injected upload failure");
            return Err(StorageError::UploadFailed(format!(
                "upload of {} rejected",
                attachment.name
            )));
        }

        let id = generate_file_id();
        let file = UploadedFileRef {
            name: attachment.name.clone(),
            url: format!("{}/{}/view", self.url_base.trim_end_matches('/'), id),
            id,
        };

        lock(&self.files).push(StoredFile {
            folder_id: folder_id.to_string(),
            file: file.clone(),
            data: attachment.data.clone(),
        });

        tracing::debug!(
            folder_id = %folder_id,
            name = %attachment.name,
            size_bytes = attachment.size(),
            "Memory storage upload successful"
        );

        Ok(file)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Holds [`MemoryRecordStore::append`] open until released
#[derive(Default)]
pub struct RecordGate {
    entered: Notify,
    release: Notify,
}

impl RecordGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until an append reaches the gate
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the waiting append finish
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Record store that keeps rows in memory
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<NormalizedRecord>>,
    fail: AtomicBool,
    gate: Option<Arc<RecordGate>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause every append at `gate`
    pub fn with_gate(gate: Arc<RecordGate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Make every append fail until switched off again
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<NormalizedRecord> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append(&self, record: &NormalizedRecord) -> RecordResult<()> {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(RecordError::Unavailable(
                "memory record store is set to fail".to_string(),
            ));
        }

        lock(&self.records).push(record.clone());
        tracing::debug!(timestamp = %record.timestamp, "Memory record appended");
        Ok(())
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Memory
    }
}
