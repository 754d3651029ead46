//! Plain-text summary of a stored submission

use actreport_core::models::{NormalizedRecord, RecordAttachments};

const RULE: &str = "==============================";

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Render `record` as the block printed after a successful submission
pub fn format_submission(record: &NormalizedRecord) -> String {
    let activity = format!(
        "Activity Title: {}\nActivity Date: {}\nNumber of Beneficiaries: {}\n",
        record.title, record.activity_date, record.beneficiaries
    );

    let details = match &record.attachments {
        RecordAttachments::Links {
            photos_links,
            reports_links,
            photos_drive_folder,
            reports_drive_folder,
        } => format!(
            "Faculty Coordinators: {}\n{}\n\
             Photos Links: {}\n\
             Reports Links: {}\n\
             Photos Drive Folder: {}\n\
             Reports Drive Folder: {}\n",
            record.coordinators,
            activity,
            photos_links,
            reports_links,
            photos_drive_folder,
            reports_drive_folder
        ),
        RecordAttachments::Text {
            report,
            photos_uploaded,
            report_uploaded,
            photos_drive_link,
            reports_drive_link,
        } => format!(
            "Faculty Coordinator: {}\n{}\
             Photos Uploaded: {}\n\
             Report Uploaded: {}\n\n\
             Photos Drive Link: {}\n\
             Reports Drive Link: {}\n\n\
             Report Content:\n{}\n",
            record.coordinators,
            activity,
            yes_no(*photos_uploaded),
            yes_no(*report_uploaded),
            photos_drive_link,
            reports_drive_link,
            report
        ),
    };

    format!(
        "SDG Activity Report Submission\n{rule}\nTimestamp: {}\nSDG Goal: {}\n{}{rule}\n",
        record.timestamp,
        record.category,
        details,
        rule = RULE
    )
}
