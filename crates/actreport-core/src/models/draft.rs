use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, AttachmentCategory};
use super::coordinator::CoordinatorSelection;
use super::field::FieldUpdate;
use crate::error::FormError;

/// Shape of the form for a session
///
/// `MultiFile` collects several coordinators and photo/report files.
/// `TextReport` collects one coordinator, a written report, and two flags
/// saying whether photos and the report were uploaded elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormVariant {
    #[default]
    MultiFile,
    TextReport,
}

impl FromStr for FormVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "multi-file" | "files" => Ok(FormVariant::MultiFile),
            "text-report" | "text" => Ok(FormVariant::TextReport),
            _ => Err(anyhow::anyhow!("Invalid form variant: {}", s)),
        }
    }
}

impl Display for FormVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FormVariant::MultiFile => write!(f, "multi-file"),
            FormVariant::TextReport => write!(f, "text-report"),
        }
    }
}

/// Variant-specific part of a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSection {
    Files {
        photos: Vec<Attachment>,
        reports: Vec<Attachment>,
    },
    Text {
        body: String,
        photos_uploaded: bool,
        report_uploaded: bool,
    },
}

/// In-progress form data for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub category: String,
    pub coordinators: CoordinatorSelection,
    pub title: String,
    pub activity_date: Option<NaiveDate>,
    pub beneficiaries: String,
    pub report: ReportSection,
}

impl Draft {
    /// An empty draft for `variant`; this is also the state after a reset.
    pub fn empty(variant: FormVariant) -> Self {
        let (coordinators, report) = match variant {
            FormVariant::MultiFile => (
                CoordinatorSelection::Multiple(Vec::new()),
                ReportSection::Files {
                    photos: Vec::new(),
                    reports: Vec::new(),
                },
            ),
            FormVariant::TextReport => (
                CoordinatorSelection::Single(None),
                ReportSection::Text {
                    body: String::new(),
                    photos_uploaded: false,
                    report_uploaded: false,
                },
            ),
        };

        Self {
            category: String::new(),
            coordinators,
            title: String::new(),
            activity_date: None,
            beneficiaries: String::new(),
            report,
        }
    }

    pub fn variant(&self) -> FormVariant {
        match self.report {
            ReportSection::Files { .. } => FormVariant::MultiFile,
            ReportSection::Text { .. } => FormVariant::TextReport,
        }
    }

    /// Replace one field. Values are stored as given.
    pub fn apply(&mut self, update: FieldUpdate) -> Result<(), FormError> {
        let field = update.field();
        let variant = self.variant();

        match update {
            FieldUpdate::Category(value) => self.category = value,
            FieldUpdate::Title(value) => self.title = value,
            FieldUpdate::Date(value) => self.activity_date = value,
            FieldUpdate::Beneficiaries(value) => self.beneficiaries = value,
            FieldUpdate::Coordinator(value) => {
                self.coordinators = match self.coordinators {
                    CoordinatorSelection::Single(_) => CoordinatorSelection::Single(value),
                    CoordinatorSelection::Multiple(_) => {
                        CoordinatorSelection::Multiple(value.into_iter().collect())
                    }
                };
            }
            FieldUpdate::ReportBody(value) => match &mut self.report {
                ReportSection::Text { body, .. } => *body = value,
                ReportSection::Files { .. } => {
                    return Err(FormError::FieldNotInVariant { field, variant })
                }
            },
            FieldUpdate::PhotosUploaded(value) => match &mut self.report {
                ReportSection::Text {
                    photos_uploaded, ..
                } => *photos_uploaded = value,
                ReportSection::Files { .. } => {
                    return Err(FormError::FieldNotInVariant { field, variant })
                }
            },
            FieldUpdate::ReportUploaded(value) => match &mut self.report {
                ReportSection::Text {
                    report_uploaded, ..
                } => *report_uploaded = value,
                ReportSection::Files { .. } => {
                    return Err(FormError::FieldNotInVariant { field, variant })
                }
            },
        }

        Ok(())
    }

    /// Attachments of `category`, or `None` for a text-report draft
    pub fn attachments(&self, category: AttachmentCategory) -> Option<&[Attachment]> {
        match &self.report {
            ReportSection::Files { photos, reports } => Some(match category {
                AttachmentCategory::Photos => photos.as_slice(),
                AttachmentCategory::Reports => reports.as_slice(),
            }),
            ReportSection::Text { .. } => None,
        }
    }

    pub fn attachments_mut(
        &mut self,
        category: AttachmentCategory,
    ) -> Option<&mut Vec<Attachment>> {
        match &mut self.report {
            ReportSection::Files { photos, reports } => Some(match category {
                AttachmentCategory::Photos => photos,
                AttachmentCategory::Reports => reports,
            }),
            ReportSection::Text { .. } => None,
        }
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::empty(FormVariant::default())
    }
}
