use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::coordinator::Coordinator;

/// Fields of a draft, keyed by their internal (camelCase) names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    Category,
    Coordinators,
    Title,
    Date,
    Beneficiaries,
    Photos,
    Reports,
    ReportBody,
    PhotosUploaded,
    ReportUploaded,
}

impl FieldName {
    pub fn internal_name(&self) -> &'static str {
        match self {
            FieldName::Category => "sdgGoal",
            FieldName::Coordinators => "facultyCoordinators",
            FieldName::Title => "activityTitle",
            FieldName::Date => "activityDate",
            FieldName::Beneficiaries => "numberOfBeneficiaries",
            FieldName::Photos => "photos",
            FieldName::Reports => "reportFiles",
            FieldName::ReportBody => "report",
            FieldName::PhotosUploaded => "photosUploaded",
            FieldName::ReportUploaded => "reportUploaded",
        }
    }

    /// Human-readable label derived from the internal name
    pub fn label(&self) -> String {
        humanize(self.internal_name())
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.internal_name())
    }
}

/// Split a camelCase identifier on uppercase letters and lowercase the result.
///
/// `numberOfBeneficiaries` becomes `number of beneficiaries`.
pub fn humanize(internal_name: &str) -> String {
    let mut label = String::with_capacity(internal_name.len() + 4);
    for ch in internal_name.chars() {
        if ch.is_uppercase() {
            label.push(' ');
            label.extend(ch.to_lowercase());
        } else {
            label.push(ch);
        }
    }
    label
}

/// A single typed mutation of a draft field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldUpdate {
    Category(String),
    /// Replace the coordinator selection with one value, or clear it
    Coordinator(Option<Coordinator>),
    Title(String),
    Date(Option<NaiveDate>),
    /// Stored verbatim; numeric checks happen during validation
    Beneficiaries(String),
    ReportBody(String),
    PhotosUploaded(bool),
    ReportUploaded(bool),
}

impl FieldUpdate {
    pub fn field(&self) -> FieldName {
        match self {
            FieldUpdate::Category(_) => FieldName::Category,
            FieldUpdate::Coordinator(_) => FieldName::Coordinators,
            FieldUpdate::Title(_) => FieldName::Title,
            FieldUpdate::Date(_) => FieldName::Date,
            FieldUpdate::Beneficiaries(_) => FieldName::Beneficiaries,
            FieldUpdate::ReportBody(_) => FieldName::ReportBody,
            FieldUpdate::PhotosUploaded(_) => FieldName::PhotosUploaded,
            FieldUpdate::ReportUploaded(_) => FieldName::ReportUploaded,
        }
    }
}
