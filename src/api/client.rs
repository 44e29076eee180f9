//! HTTP client for the external sheet and the assignment write endpoint.
//!
//! Reads go to the Google Sheets values API; writes go to an Apps Script
//! endpoint that owns the actual cell update. The two are separate systems
//! with no shared transaction, so ordering between a write and a subsequent
//! read is only what the caller arranges by invalidating the cache.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::SheetError;

/// HTTP request timeout in seconds.
/// 30s allows for slow upstream responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response envelope from the values API.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<String>>>,
}

/// Error payload the values API attaches to non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssignmentRequest<'a> {
    #[serde(rename = "merchantName")]
    merchant_name: &'a str,
    #[serde(rename = "volunteerName")]
    volunteer_name: &'a str,
}

/// Response from the write RPC. Only `status == "success"` is success; any
/// other value is a semantic failure even on HTTP 200.
#[derive(Debug, Deserialize)]
pub struct ScriptResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Interpret the write RPC's own success/failure signal, independent of
/// HTTP-level success.
pub fn interpret_script_response(response: ScriptResponse) -> Result<String, SheetError> {
    if response.status == "success" {
        Ok(response
            .message
            .unwrap_or_else(|| "Assignment updated".to_string()))
    } else {
        Err(SheetError::AssignmentRejected(response.message.unwrap_or_else(
            || "An unknown error occurred during assignment.".to_string(),
        )))
    }
}

/// Client for the sheet read API and the assignment write RPC.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    sheet_id: String,
    api_key: String,
    script_url: String,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.sheets_base_url.trim_end_matches('/').to_string(),
            sheet_id: config.sheet_id.clone(),
            api_key: config.api_key.clone(),
            script_url: config.script_url.clone(),
        })
    }

    /// Fetch the raw cells for a named range. The first returned row is the
    /// header row; callers skip it when mapping.
    pub async fn fetch_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let url = format!(
            "{}/{}/values/{}?key={}",
            self.base_url, self.sheet_id, range, self.api_key
        );
        debug!(range = range, "Fetching range from sheet");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("Sheet API returned status {}", status));
            return Err(SheetError::UpstreamUnavailable(message));
        }

        let parsed: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::UpstreamUnavailable(e.to_string()))?;

        match parsed.values {
            Some(values) if !values.is_empty() => Ok(values),
            _ => Err(SheetError::EmptyDataset {
                range: range.to_string(),
            }),
        }
    }

    /// Submit an assignment write to the script endpoint. Writes key on the
    /// business name because the synthetic row id is not stable across reads.
    pub async fn submit_assignment(
        &self,
        merchant_name: &str,
        volunteer_name: &str,
    ) -> Result<String, SheetError> {
        debug!(merchant = merchant_name, volunteer = volunteer_name, "Submitting assignment");

        let response = self
            .client
            .post(&self.script_url)
            .json(&AssignmentRequest {
                merchant_name,
                volunteer_name,
            })
            .send()
            .await?;

        let parsed: ScriptResponse = response
            .json()
            .await
            .map_err(|e| SheetError::UpstreamUnavailable(e.to_string()))?;

        interpret_script_response(parsed)
    }
}
