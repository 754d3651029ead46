use crate::traits::{RecordError, RecordResult, RecordStore};
use actreport_core::models::NormalizedRecord;
use actreport_core::RecordBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Body posted to the sheet web app
#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    columns: Vec<&'static str>,
    values: Vec<Value>,
    record: &'a NormalizedRecord,
}

/// Optional JSON reply. Script endpoints answer 200 even when the append
/// failed, so an explicit `"result": "error"` is treated as a rejection.
#[derive(Debug, Default, Deserialize)]
struct AppendResponse {
    result: Option<String>,
    error: Option<String>,
}

/// Appends rows through an HTTP web app sitting in front of a spreadsheet
#[derive(Clone, Debug)]
pub struct SheetWebhookStore {
    client: Client,
    url: String,
}

impl SheetWebhookStore {
    pub fn new(url: String, timeout: Duration) -> RecordResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecordError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecordStore for SheetWebhookStore {
    async fn append(&self, record: &NormalizedRecord) -> RecordResult<()> {
        let body = AppendRequest {
            columns: record.columns(),
            values: record.row(),
            record,
        };

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecordError::Unavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RecordError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Sheet webhook rejected row"
            );
            return Err(RecordError::Rejected(format!("status {}: {}", status, text)));
        }

        let reply: AppendResponse = serde_json::from_str(&text).unwrap_or_default();
        if reply.result.as_deref() == Some("error") {
            let message = reply.error.unwrap_or_else(|| "unknown error".to_string());
            tracing::error!(error = %message, "Sheet webhook reported an error");
            return Err(RecordError::Rejected(message));
        }

        tracing::info!(
            status = %status,
            timestamp = %record.timestamp,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Row appended through sheet webhook"
        );

        Ok(())
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Webhook
    }
}
