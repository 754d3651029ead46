use std::path::{Path, PathBuf};
use std::sync::Arc;

use actreport_core::models::{
    Attachment, AttachmentCategory, Coordinator, FieldUpdate, FormVariant,
};
use actreport_core::{Config, Notifier};
use actreport_form::{FormController, SubmissionAdapter};
use actreport_storage::{MemoryRecordStore, MemoryStorage};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;

/// Field values for one report, as given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Form variant: multi-file or text-report (defaults to FORM_VARIANT)
    #[arg(long)]
    pub variant: Option<FormVariant>,
    /// SDG goal, e.g. "Goal 3"
    #[arg(long)]
    pub category: Option<String>,
    /// Faculty coordinator, by name or list position (repeatable)
    #[arg(long = "coordinator")]
    pub coordinators: Vec<Coordinator>,
    /// Activity title
    #[arg(long)]
    pub title: Option<String>,
    /// Activity date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Number of beneficiaries
    #[arg(long)]
    pub beneficiaries: Option<String>,
    /// Photo to attach (repeatable)
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
    /// Report file to attach (repeatable)
    #[arg(long = "report")]
    pub reports: Vec<PathBuf>,
    /// Report text, for the text-report form
    #[arg(long)]
    pub report_text: Option<String>,
    /// Mark photos as uploaded separately (text-report form)
    #[arg(long)]
    pub photos_uploaded: bool,
    /// Mark the report as uploaded separately (text-report form)
    #[arg(long)]
    pub report_uploaded: bool,
}

/// Content type guessed from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

pub async fn read_attachment(path: &Path) -> anyhow::Result<Attachment> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Attachment::new(name, content_type_for(path), data))
}

async fn read_attachments(paths: &[PathBuf]) -> anyhow::Result<Vec<Attachment>> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in paths {
        attachments.push(read_attachment(path).await?);
    }
    Ok(attachments)
}

/// Copy `args` into the form's draft
pub async fn fill_form(form: &FormController, args: &ReportArgs) -> anyhow::Result<()> {
    if let Some(category) = &args.category {
        form.apply(FieldUpdate::Category(category.clone()))?;
    }
    if let Some(title) = &args.title {
        form.apply(FieldUpdate::Title(title.clone()))?;
    }
    if args.date.is_some() {
        form.apply(FieldUpdate::Date(args.date))?;
    }
    if let Some(beneficiaries) = &args.beneficiaries {
        form.apply(FieldUpdate::Beneficiaries(beneficiaries.clone()))?;
    }
    for coordinator in &args.coordinators {
        form.toggle_coordinator(*coordinator, true);
    }

    if !args.photos.is_empty() {
        let photos = read_attachments(&args.photos).await?;
        form.add_attachments(photos, AttachmentCategory::Photos)?;
    }
    if !args.reports.is_empty() {
        let reports = read_attachments(&args.reports).await?;
        form.add_attachments(reports, AttachmentCategory::Reports)?;
    }

    if let Some(text) = &args.report_text {
        form.apply(FieldUpdate::ReportBody(text.clone()))?;
    }
    if args.photos_uploaded {
        form.apply(FieldUpdate::PhotosUploaded(true))?;
    }
    if args.report_uploaded {
        form.apply(FieldUpdate::ReportUploaded(true))?;
    }

    Ok(())
}

/// Controller wired to the backends named in `config`
pub async fn build_controller(
    config: &Config,
    variant: FormVariant,
    notifier: Arc<dyn Notifier>,
) -> anyhow::Result<FormController> {
    let adapter = SubmissionAdapter::from_config(config)
        .await
        .context("Failed to set up storage backends")?;
    Ok(FormController::new(
        variant,
        config.rules.clone(),
        adapter,
        notifier,
    ))
}

/// Controller that can validate but stores nothing outside memory
pub fn offline_controller(
    config: &Config,
    variant: FormVariant,
    notifier: Arc<dyn Notifier>,
) -> FormController {
    let adapter = SubmissionAdapter::new(
        config,
        Arc::new(MemoryStorage::new()),
        Arc::new(MemoryRecordStore::new()),
    );
    FormController::new(variant, config.rules.clone(), adapter, notifier)
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use actreport_core::MemoryNotifier;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        report: ReportArgs,
    }

    fn config() -> Config {
        Config::from_vars(|_| None).unwrap()
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("camp.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("report.pdf")), "application/pdf");
        assert_eq!(
            content_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_report_args_parse() {
        let cli = TestCli::try_parse_from([
            "actreport",
            "--category",
            "Goal 3",
            "--coordinator",
            "7",
            "--coordinator",
            "Dr. R. Raveen (AP(Sr.G)/Mech)",
            "--date",
            "2024-05-01",
            "--photo",
            "a.jpg",
            "--photo",
            "b.jpg",
            "--variant",
            "multi-file",
        ])
        .unwrap();

        assert_eq!(cli.report.category.as_deref(), Some("Goal 3"));
        assert_eq!(
            cli.report.coordinators,
            vec![Coordinator::Hema, Coordinator::Raveen]
        );
        assert_eq!(cli.report.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(cli.report.photos.len(), 2);
        assert_eq!(cli.report.variant, Some(FormVariant::MultiFile));
    }

    #[test]
    fn test_unknown_coordinator_rejected() {
        assert!(TestCli::try_parse_from(["actreport", "--coordinator", "Dr. Nobody"]).is_err());
        assert!(TestCli::try_parse_from(["actreport", "--coordinator", "15"]).is_err());
    }

    #[tokio::test]
    async fn test_fill_form_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("camp.jpg");
        let report = dir.path().join("summary.pdf");
        std::fs::write(&photo, b"jpeg").unwrap();
        std::fs::write(&report, b"%PDF").unwrap();

        let form = offline_controller(
            &config(),
            FormVariant::MultiFile,
            Arc::new(MemoryNotifier::new()),
        );
        let args = ReportArgs {
            category: Some("Goal 3".to_string()),
            coordinators: vec![Coordinator::Hema],
            title: Some("Health Camp".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            beneficiaries: Some("120".to_string()),
            photos: vec![photo],
            reports: vec![report],
            ..ReportArgs::default()
        };

        fill_form(&form, &args).await.unwrap();

        assert!(form.validate().is_ok());
        let draft = form.draft();
        let photos = draft.attachments(AttachmentCategory::Photos).unwrap();
        assert_eq!(photos[0].name, "camp.jpg");
        assert_eq!(photos[0].content_type, "image/jpeg");

        let record = form.submit().await.unwrap();
        assert_eq!(record.title, "Health Camp");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let form = offline_controller(
            &config(),
            FormVariant::MultiFile,
            Arc::new(MemoryNotifier::new()),
        );
        let args = ReportArgs {
            photos: vec![PathBuf::from("/definitely/not/here.jpg")],
            ..ReportArgs::default()
        };

        let err = fill_form(&form, &args).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
