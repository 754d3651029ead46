use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::attachment::UploadedFileRef;
use super::draft::Draft;
use crate::constants::LINK_SEPARATOR;

/// Variant-specific columns of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordAttachments {
    #[serde(rename_all = "camelCase")]
    Links {
        photos_links: String,
        reports_links: String,
        photos_drive_folder: String,
        reports_drive_folder: String,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        report: String,
        photos_uploaded: bool,
        report_uploaded: bool,
        photos_drive_link: String,
        reports_drive_link: String,
    },
}

impl RecordAttachments {
    /// Link columns built from uploaded files, joined in upload order
    pub fn links(
        photos: &[UploadedFileRef],
        reports: &[UploadedFileRef],
        photos_folder_url: String,
        reports_folder_url: String,
    ) -> Self {
        RecordAttachments::Links {
            photos_links: join_urls(photos),
            reports_links: join_urls(reports),
            photos_drive_folder: photos_folder_url,
            reports_drive_folder: reports_folder_url,
        }
    }
}

fn join_urls(files: &[UploadedFileRef]) -> String {
    files
        .iter()
        .map(|file| file.url.as_str())
        .collect::<Vec<_>>()
        .join(LINK_SEPARATOR)
}

/// One flattened row for the tabular record store.
///
/// Serialized field names follow the column keys the sheet web app expects.
/// The text-report sheet names its coordinator column `facultyCoordinator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RecordRow", from = "RecordRow")]
pub struct NormalizedRecord {
    pub timestamp: String,
    pub category: String,
    pub coordinators: String,
    pub title: String,
    pub activity_date: String,
    pub beneficiaries: String,
    pub attachments: RecordAttachments,
}

const COORDINATORS_COLUMN: &str = "facultyCoordinators";
const COORDINATOR_COLUMN: &str = "facultyCoordinator";

/// Wire shape of [`NormalizedRecord`]; exactly one coordinator key is set
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordRow {
    timestamp: String,
    sdg_goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    faculty_coordinators: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    faculty_coordinator: Option<String>,
    activity_title: String,
    activity_date: String,
    number_of_beneficiaries: String,
    #[serde(flatten)]
    attachments: RecordAttachments,
}

impl From<NormalizedRecord> for RecordRow {
    fn from(record: NormalizedRecord) -> Self {
        let (faculty_coordinators, faculty_coordinator) = match record.attachments {
            RecordAttachments::Links { .. } => (Some(record.coordinators), None),
            RecordAttachments::Text { .. } => (None, Some(record.coordinators)),
        };
        Self {
            timestamp: record.timestamp,
            sdg_goal: record.category,
            faculty_coordinators,
            faculty_coordinator,
            activity_title: record.title,
            activity_date: record.activity_date,
            number_of_beneficiaries: record.beneficiaries,
            attachments: record.attachments,
        }
    }
}

impl From<RecordRow> for NormalizedRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            timestamp: row.timestamp,
            category: row.sdg_goal,
            coordinators: row
                .faculty_coordinators
                .or(row.faculty_coordinator)
                .unwrap_or_default(),
            title: row.activity_title,
            activity_date: row.activity_date,
            beneficiaries: row.number_of_beneficiaries,
            attachments: row.attachments,
        }
    }
}

impl NormalizedRecord {
    /// Copy the scalar fields of `draft` and stamp the record with `generated_at`.
    pub fn new(
        draft: &Draft,
        generated_at: DateTime<Utc>,
        attachments: RecordAttachments,
    ) -> Self {
        Self {
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            category: draft.category.clone(),
            coordinators: draft.coordinators.joined(LINK_SEPARATOR),
            title: draft.title.clone(),
            activity_date: draft
                .activity_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            beneficiaries: draft.beneficiaries.clone(),
            attachments,
        }
    }

    /// Column names in store order
    pub fn columns(&self) -> Vec<&'static str> {
        let coordinators = match self.attachments {
            RecordAttachments::Links { .. } => COORDINATORS_COLUMN,
            RecordAttachments::Text { .. } => COORDINATOR_COLUMN,
        };
        let mut columns = vec![
            "timestamp",
            "sdgGoal",
            coordinators,
            "activityTitle",
            "activityDate",
            "numberOfBeneficiaries",
        ];
        match self.attachments {
            RecordAttachments::Links { .. } => columns.extend([
                "photosLinks",
                "reportsLinks",
                "photosDriveFolder",
                "reportsDriveFolder",
            ]),
            RecordAttachments::Text { .. } => columns.extend([
                "report",
                "photosUploaded",
                "reportUploaded",
                "photosDriveLink",
                "reportsDriveLink",
            ]),
        }
        columns
    }

    /// Values in the same order as [`NormalizedRecord::columns`]
    pub fn row(&self) -> Vec<Value> {
        let mut row: Vec<Value> = vec![
            self.timestamp.clone().into(),
            self.category.clone().into(),
            self.coordinators.clone().into(),
            self.title.clone().into(),
            self.activity_date.clone().into(),
            self.beneficiaries.clone().into(),
        ];
        match &self.attachments {
            RecordAttachments::Links {
                photos_links,
                reports_links,
                photos_drive_folder,
                reports_drive_folder,
            } => row.extend([
                photos_links.clone().into(),
                reports_links.clone().into(),
                photos_drive_folder.clone().into(),
                reports_drive_folder.clone().into(),
            ]),
            RecordAttachments::Text {
                report,
                photos_uploaded,
                report_uploaded,
                photos_drive_link,
                reports_drive_link,
            } => row.extend([
                report.clone().into(),
                (*photos_uploaded).into(),
                (*report_uploaded).into(),
                photos_drive_link.clone().into(),
                reports_drive_link.clone().into(),
            ]),
        }
        row
    }
}
