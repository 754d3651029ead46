//! Submission adapter
//!
//! Turns a validated draft into stored files and one appended record. Photos
//! are uploaded first, then report files, then the record is written. Within
//! a batch uploads run concurrently up to the configured limit while the
//! returned references keep the attachment order.

use std::sync::Arc;
use std::time::Instant;

use actreport_core::models::{
    Attachment, Draft, NormalizedRecord, RecordAttachments, ReportSection, UploadedFileRef,
};
use actreport_core::Config;
use actreport_storage::{
    create_attachment_store, create_record_store, AttachmentStore, RecordError, RecordStore,
};
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{SubmitError, UploadError};

/// Where each attachment category goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTarget {
    pub folder_id: String,
    pub folder_url: String,
}

pub struct SubmissionAdapter {
    attachments: Arc<dyn AttachmentStore>,
    records: Arc<dyn RecordStore>,
    photos: FolderTarget,
    reports: FolderTarget,
    upload_concurrency: usize,
}

impl SubmissionAdapter {
    pub fn new(
        config: &Config,
        attachments: Arc<dyn AttachmentStore>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        let target = |folder_id: &str| FolderTarget {
            folder_id: folder_id.to_string(),
            folder_url: config.folder_url(folder_id),
        };

        Self {
            attachments,
            records,
            photos: target(&config.storage.photos_folder_id),
            reports: target(&config.storage.reports_folder_id),
            upload_concurrency: config.upload_concurrency.max(1),
        }
    }

    /// Build the adapter with the backends named in `config`
    pub async fn from_config(config: &Config) -> Result<Self, SubmitError> {
        let attachments = create_attachment_store(config).await?;
        let records = create_record_store(config).await?;

        tracing::info!(
            storage_backend = %attachments.backend_type(),
            record_backend = %records.backend_type(),
            upload_concurrency = config.upload_concurrency,
            "Submission adapter ready"
        );

        Ok(Self::new(config, attachments, records))
    }

    pub fn photos_target(&self) -> &FolderTarget {
        &self.photos
    }

    pub fn reports_target(&self) -> &FolderTarget {
        &self.reports
    }

    /// Upload a batch into `folder_id`.
    ///
    /// The result lists one reference per input file, in input order. The
    /// first failing upload fails the whole batch; files already stored are
    /// left where they are.
    pub async fn upload_attachments(
        &self,
        files: &[Attachment],
        folder_id: &str,
    ) -> Result<Vec<UploadedFileRef>, UploadError> {
        let start = Instant::now();

        let uploaded: Vec<UploadedFileRef> = stream::iter(files)
            .map(|attachment| async move {
                self.attachments
                    .upload(folder_id, attachment)
                    .await
                    .map_err(|source| UploadError {
                        file: attachment.name.clone(),
                        folder_id: folder_id.to_string(),
                        source,
                    })
            })
            .boxed()
            .buffered(self.upload_concurrency)
            .try_collect()
            .await?;

        tracing::info!(
            folder_id = %folder_id,
            file_count = uploaded.len(),
            total_bytes = files.iter().map(Attachment::size).sum::<usize>(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Attachment batch uploaded"
        );

        Ok(uploaded)
    }

    /// Append one record to the record store
    pub async fn record_submission(&self, record: &NormalizedRecord) -> Result<(), RecordError> {
        self.records.append(record).await
    }

    /// Run the whole pipeline for `draft` and return the stored record
    pub async fn submit(&self, draft: &Draft) -> Result<NormalizedRecord, SubmitError> {
        let attachments = match &draft.report {
            ReportSection::Files { photos, reports } => {
                let photo_refs = self
                    .upload_attachments(photos, &self.photos.folder_id)
                    .await?;
                let report_refs = self
                    .upload_attachments(reports, &self.reports.folder_id)
                    .await?;

                RecordAttachments::links(
                    &photo_refs,
                    &report_refs,
                    self.photos.folder_url.clone(),
                    self.reports.folder_url.clone(),
                )
            }
            ReportSection::Text {
                body,
                photos_uploaded,
                report_uploaded,
            } => RecordAttachments::Text {
                report: body.clone(),
                photos_uploaded: *photos_uploaded,
                report_uploaded: *report_uploaded,
                photos_drive_link: self.photos.folder_url.clone(),
                reports_drive_link: self.reports.folder_url.clone(),
            },
        };

        let record = NormalizedRecord::new(draft, Utc::now(), attachments);
        self.record_submission(&record).await?;

        tracing::info!(
            category = %record.category,
            title = %record.title,
            timestamp = %record.timestamp,
            "Submission recorded"
        );

        Ok(record)
    }
}
