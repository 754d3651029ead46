use actreport_core::models::{
    Attachment, AttachmentCategory, Coordinator, FieldUpdate, FormVariant,
};
use actreport_form::FormController;
use chrono::NaiveDate;

pub fn photo(name: &str) -> Attachment {
    Attachment::new(name, "image/jpeg", format!("jpeg:{}", name).into_bytes())
}

pub fn report(name: &str) -> Attachment {
    Attachment::new(name, "application/pdf", format!("%PDF:{}", name).into_bytes())
}

pub fn activity_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
}

/// Fill every scalar field with the health camp scenario
pub fn fill_health_camp(form: &FormController) {
    form.apply(FieldUpdate::Category("Goal 3".to_string()))
        .expect("category");
    form.apply(FieldUpdate::Title("Health Camp".to_string()))
        .expect("title");
    form.apply(FieldUpdate::Date(Some(activity_date())))
        .expect("date");
    form.apply(FieldUpdate::Beneficiaries("120".to_string()))
        .expect("beneficiaries");
    form.toggle_coordinator(Coordinator::Hema, true);
}

/// Health camp scenario with one photo and one report attached
pub fn complete_health_camp(form: &FormController) {
    fill_health_camp(form);
    match form.variant() {
        FormVariant::MultiFile => {
            form.add_attachments(vec![photo("camp.jpg")], AttachmentCategory::Photos)
                .expect("photo");
            form.add_attachments(vec![report("summary.pdf")], AttachmentCategory::Reports)
                .expect("report");
        }
        FormVariant::TextReport => {
            form.apply(FieldUpdate::ReportBody(
                "Free screening for 120 residents.".to_string(),
            ))
            .expect("report body");
        }
    }
}
