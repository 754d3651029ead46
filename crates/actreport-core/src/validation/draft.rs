use crate::models::{AttachmentCategory, Draft, FieldName, ReportSection};

/// Why a draft cannot be submitted. Only the first problem found is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields. Missing: {}", .0.label())]
    MissingField(FieldName),

    #[error("Please select at least one faculty coordinator")]
    NoCoordinator,

    #[error("Please upload at least one {}", .0.noun())]
    NoAttachments(AttachmentCategory),

    #[error("Number of beneficiaries must be a whole number (got \"{0}\")")]
    BeneficiariesNotNumeric(String),
}

impl ValidationError {
    /// The field the error refers to
    pub fn field(&self) -> FieldName {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::NoCoordinator => FieldName::Coordinators,
            ValidationError::NoAttachments(AttachmentCategory::Photos) => FieldName::Photos,
            ValidationError::NoAttachments(AttachmentCategory::Reports) => FieldName::Reports,
            ValidationError::BeneficiariesNotNumeric(_) => FieldName::Beneficiaries,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a draft in fixed field order and stop at the first failure.
///
/// Order: category, title, date, beneficiaries, coordinators, then photos and
/// reports (file form) or the report body (text form).
pub fn validate_draft(
    draft: &Draft,
    require_numeric_beneficiaries: bool,
) -> Result<(), ValidationError> {
    if is_blank(&draft.category) {
        return Err(ValidationError::MissingField(FieldName::Category));
    }
    if is_blank(&draft.title) {
        return Err(ValidationError::MissingField(FieldName::Title));
    }
    if draft.activity_date.is_none() {
        return Err(ValidationError::MissingField(FieldName::Date));
    }
    if is_blank(&draft.beneficiaries) {
        return Err(ValidationError::MissingField(FieldName::Beneficiaries));
    }
    if require_numeric_beneficiaries && draft.beneficiaries.trim().parse::<u32>().is_err() {
        return Err(ValidationError::BeneficiariesNotNumeric(
            draft.beneficiaries.clone(),
        ));
    }
    if draft.coordinators.is_empty() {
        return Err(ValidationError::NoCoordinator);
    }

    match &draft.report {
        ReportSection::Files { photos, reports } => {
            if photos.is_empty() {
                return Err(ValidationError::NoAttachments(AttachmentCategory::Photos));
            }
            if reports.is_empty() {
                return Err(ValidationError::NoAttachments(AttachmentCategory::Reports));
            }
        }
        ReportSection::Text { body, .. } => {
            if is_blank(body) {
                return Err(ValidationError::MissingField(FieldName::ReportBody));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, Coordinator, FieldUpdate, FormVariant};
    use chrono::NaiveDate;

    fn complete_file_draft() -> Draft {
        let mut draft = Draft::empty(FormVariant::MultiFile);
        draft.apply(FieldUpdate::Category("Goal 3".into())).unwrap();
        draft.apply(FieldUpdate::Title("Health Camp".into())).unwrap();
        draft
            .apply(FieldUpdate::Date(NaiveDate::from_ymd_opt(2024, 5, 1)))
            .unwrap();
        draft.apply(FieldUpdate::Beneficiaries("120".into())).unwrap();
        draft.coordinators.toggle(Coordinator::Gunasekar, true);
        if let ReportSection::Files { photos, reports } = &mut draft.report {
            photos.push(Attachment::new("camp.jpg", "image/jpeg", vec![1u8]));
            reports.push(Attachment::new("camp.pdf", "application/pdf", vec![1u8]));
        }
        draft
    }

    fn complete_text_draft() -> Draft {
        let mut draft = Draft::empty(FormVariant::TextReport);
        draft.apply(FieldUpdate::Category("Goal 4".into())).unwrap();
        draft.apply(FieldUpdate::Title("Reading Drive".into())).unwrap();
        draft
            .apply(FieldUpdate::Date(NaiveDate::from_ymd_opt(2024, 6, 12)))
            .unwrap();
        draft.apply(FieldUpdate::Beneficiaries("45".into())).unwrap();
        draft
            .apply(FieldUpdate::Coordinator(Some(Coordinator::Radhika)))
            .unwrap();
        draft.apply(FieldUpdate::ReportBody("Books donated".into())).unwrap();
        draft
    }

    #[test]
    fn test_complete_drafts_pass() {
        assert_eq!(validate_draft(&complete_file_draft(), true), Ok(()));
        assert_eq!(validate_draft(&complete_text_draft(), true), Ok(()));
    }

    fn assert_reported_then_fixed(
        field: FieldName,
        clear: impl Fn(&mut Draft),
        fill: impl Fn(&mut Draft),
    ) {
        let mut draft = complete_file_draft();
        clear(&mut draft);
        let err = validate_draft(&draft, false).unwrap_err();
        assert_eq!(err.field(), field, "wrong field reported: {}", err);

        fill(&mut draft);
        assert_eq!(validate_draft(&draft, false), Ok(()), "still failing for {}", field);
    }

    #[test]
    fn test_each_missing_field_is_reported_then_fixed() {
        assert_reported_then_fixed(
            FieldName::Category,
            |d| d.category.clear(),
            |d| d.category = "Goal 3".into(),
        );
        assert_reported_then_fixed(
            FieldName::Title,
            |d| d.title.clear(),
            |d| d.title = "Health Camp".into(),
        );
        assert_reported_then_fixed(
            FieldName::Date,
            |d| d.activity_date = None,
            |d| d.activity_date = NaiveDate::from_ymd_opt(2024, 5, 1),
        );
        assert_reported_then_fixed(
            FieldName::Beneficiaries,
            |d| d.beneficiaries.clear(),
            |d| d.beneficiaries = "120".into(),
        );
        assert_reported_then_fixed(
            FieldName::Coordinators,
            |d| d.coordinators.toggle(Coordinator::Gunasekar, false),
            |d| d.coordinators.toggle(Coordinator::Gunasekar, true),
        );
        assert_reported_then_fixed(
            FieldName::Photos,
            |d| d.attachments_mut(AttachmentCategory::Photos).unwrap().clear(),
            |d| {
                d.attachments_mut(AttachmentCategory::Photos)
                    .unwrap()
                    .push(Attachment::new("a.png", "image/png", vec![1u8]))
            },
        );
        assert_reported_then_fixed(
            FieldName::Reports,
            |d| d.attachments_mut(AttachmentCategory::Reports).unwrap().clear(),
            |d| {
                d.attachments_mut(AttachmentCategory::Reports)
                    .unwrap()
                    .push(Attachment::new("a.txt", "text/plain", vec![1u8]))
            },
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let draft = Draft::empty(FormVariant::MultiFile);
        assert_eq!(
            validate_draft(&draft, true),
            Err(ValidationError::MissingField(FieldName::Category))
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut draft = complete_file_draft();
        draft.title = "   ".into();
        assert_eq!(
            validate_draft(&draft, false),
            Err(ValidationError::MissingField(FieldName::Title))
        );
    }

    #[test]
    fn test_numeric_beneficiaries_policy() {
        let mut draft = complete_file_draft();
        draft.beneficiaries = "about forty".into();

        assert_eq!(
            validate_draft(&draft, true),
            Err(ValidationError::BeneficiariesNotNumeric("about forty".into()))
        );
        assert_eq!(validate_draft(&draft, false), Ok(()));

        draft.beneficiaries = "-3".into();
        assert!(validate_draft(&draft, true).is_err());

        draft.beneficiaries = " 42 ".into();
        assert_eq!(validate_draft(&draft, true), Ok(()));
    }

    #[test]
    fn test_text_report_requires_body() {
        let mut draft = complete_text_draft();
        draft.apply(FieldUpdate::ReportBody(String::new())).unwrap();
        let err = validate_draft(&draft, true).unwrap_err();
        assert_eq!(err, ValidationError::MissingField(FieldName::ReportBody));
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields. Missing: report"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::MissingField(FieldName::Beneficiaries).to_string(),
            "Please fill in all required fields. Missing: number of beneficiaries"
        );
        assert_eq!(
            ValidationError::NoAttachments(AttachmentCategory::Reports).to_string(),
            "Please upload at least one report file"
        );
        assert_eq!(
            ValidationError::NoCoordinator.to_string(),
            "Please select at least one faculty coordinator"
        );
    }
}
