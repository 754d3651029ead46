//! Configuration module
//!
//! Settings come from the environment (optionally seeded from a `.env` file).
//! Every value has a default so the form runs locally with no configuration:
//! attachments go to `./data/uploads` and records to `./data/records.jsonl`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_FOLDER_URL_BASE, DEFAULT_PHOTOS_FOLDER_ID, DEFAULT_PHOTO_EXTENSIONS,
    DEFAULT_REPORTS_FOLDER_ID, DEFAULT_REPORT_EXTENSIONS,
};
use crate::models::FormVariant;
use crate::storage_types::{RecordBackend, StorageBackend};
use crate::validation::{AttachmentRules, FormRules};

const UPLOAD_CONCURRENCY: usize = 4;
const SHEET_WEBHOOK_TIMEOUT_SECS: u64 = 30;
const MAX_PHOTO_SIZE_MB: usize = 20;
const MAX_REPORT_SIZE_MB: usize = 10;
const LOCAL_STORAGE_PATH: &str = "./data/uploads";
const LOCAL_STORAGE_BASE_URL: &str = "http://localhost:8080/uploads";
const JOURNAL_PATH: &str = "./data/records.jsonl";

/// Attachment storage settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub photos_folder_id: String,
    pub reports_folder_id: String,
    /// Folder links in records are `{folder_url_base}/{folder_id}`
    pub folder_url_base: String,
}

/// Record store settings
#[derive(Clone, Debug)]
pub struct RecordConfig {
    pub backend: RecordBackend,
    pub sheet_webhook_url: Option<String>,
    pub sheet_webhook_timeout_secs: u64,
    pub journal_path: PathBuf,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub form_variant: FormVariant,
    pub storage: StorageConfig,
    pub records: RecordConfig,
    /// Uploads running at once within one batch
    pub upload_concurrency: usize,
    pub rules: FormRules,
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_list(value: Option<String>, default: &str) -> Vec<String> {
    value
        .unwrap_or_else(|| default.to_string())
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Size limit in bytes from a megabyte count named `key`
fn megabytes(key: &str, value: Option<String>, default: usize) -> Result<usize, anyhow::Error> {
    parse_or(value, default)
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} is too large", key))
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) if v == "true" || v == "1" || v == "yes" => true,
        Some(v) if v == "false" || v == "0" || v == "no" => false,
        _ => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let form_variant = match var("FORM_VARIANT") {
            Some(value) => value.parse()?,
            None => FormVariant::default(),
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Local,
        };

        let record_backend = match var("RECORD_BACKEND") {
            Some(value) => value.parse()?,
            None => RecordBackend::Journal,
        };

        let storage = StorageConfig {
            backend: storage_backend,
            local_storage_path: var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| LOCAL_STORAGE_BASE_URL.to_string()),
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION"),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_region: var("AWS_REGION"),
            photos_folder_id: var("PHOTOS_FOLDER_ID")
                .unwrap_or_else(|| DEFAULT_PHOTOS_FOLDER_ID.to_string()),
            reports_folder_id: var("REPORTS_FOLDER_ID")
                .unwrap_or_else(|| DEFAULT_REPORTS_FOLDER_ID.to_string()),
            folder_url_base: var("FOLDER_URL_BASE")
                .unwrap_or_else(|| DEFAULT_FOLDER_URL_BASE.to_string()),
        };

        let records = RecordConfig {
            backend: record_backend,
            sheet_webhook_url: var("SHEET_WEBHOOK_URL"),
            sheet_webhook_timeout_secs: parse_or(
                var("SHEET_WEBHOOK_TIMEOUT_SECS"),
                SHEET_WEBHOOK_TIMEOUT_SECS,
            ),
            journal_path: var("JOURNAL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(JOURNAL_PATH)),
        };

        let max_photo_size =
            megabytes("MAX_PHOTO_SIZE_MB", var("MAX_PHOTO_SIZE_MB"), MAX_PHOTO_SIZE_MB)?;
        let max_report_size =
            megabytes("MAX_REPORT_SIZE_MB", var("MAX_REPORT_SIZE_MB"), MAX_REPORT_SIZE_MB)?;

        let rules = FormRules {
            require_numeric_beneficiaries: parse_bool(
                var("REQUIRE_NUMERIC_BENEFICIARIES"),
                true,
            ),
            photos: AttachmentRules::new(
                max_photo_size,
                parse_list(var("PHOTO_EXTENSIONS"), DEFAULT_PHOTO_EXTENSIONS),
                vec!["image/".to_string()],
            ),
            reports: AttachmentRules::new(
                max_report_size,
                parse_list(var("REPORT_EXTENSIONS"), DEFAULT_REPORT_EXTENSIONS),
                Vec::new(),
            ),
        };

        let config = Config {
            environment,
            form_variant,
            storage,
            records,
            upload_concurrency: parse_or(var("UPLOAD_CONCURRENCY"), UPLOAD_CONCURRENCY),
            rules,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_concurrency == 0 {
            return Err(anyhow::anyhow!("UPLOAD_CONCURRENCY must be at least 1"));
        }

        if self.storage.photos_folder_id.trim().is_empty()
            || self.storage.reports_folder_id.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "PHOTOS_FOLDER_ID and REPORTS_FOLDER_ID must not be empty"
            ));
        }

        match self.storage.backend {
            StorageBackend::S3 => {
                if self.storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.storage.s3_region.is_none() && self.storage.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Memory if self.is_production() => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND=memory is not allowed in production"
                ));
            }
            StorageBackend::Local | StorageBackend::Memory => {}
        }

        match self.records.backend {
            RecordBackend::Webhook => {
                let url = self.records.sheet_webhook_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("SHEET_WEBHOOK_URL must be set when using the webhook record backend")
                })?;
                if !url.starts_with("https://") && !url.starts_with("http://") {
                    return Err(anyhow::anyhow!(
                        "SHEET_WEBHOOK_URL must be an http(s) URL"
                    ));
                }
                if self.is_production() && url.starts_with("http://") {
                    return Err(anyhow::anyhow!(
                        "SHEET_WEBHOOK_URL must use https in production"
                    ));
                }
            }
            RecordBackend::Memory if self.is_production() => {
                return Err(anyhow::anyhow!(
                    "RECORD_BACKEND=memory is not allowed in production"
                ));
            }
            RecordBackend::Journal | RecordBackend::Memory => {}
        }

        Ok(())
    }

    /// Public link of a storage folder
    pub fn folder_url(&self, folder_id: &str) -> String {
        format!(
            "{}/{}",
            self.storage.folder_url_base.trim_end_matches('/'),
            folder_id
        )
    }
}
