//! Service configuration.
//!
//! The column layout of the sheet has changed between deployments, so
//! everything the service needs to know about the source — identifiers,
//! ranges, the write endpoint, the column mapping, cache TTL, and the
//! assignment cap — is configuration, not code.
//!
//! Settings load from a JSON file (`sponsorbook.json` by default, path
//! overridable via `SPONSORBOOK_CONFIG`) and individual values can be
//! overridden through environment variables, which `.env` files feed via
//! dotenvy.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::ColumnMap;

/// Default config file name, looked up in the working directory.
const CONFIG_FILE: &str = "sponsorbook.json";

/// Google Sheets values API.
const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

fn default_sheets_base_url() -> String {
    DEFAULT_SHEETS_BASE_URL.to_string()
}

fn default_merchants_range() -> String {
    "Sheet1!A:L".to_string()
}

fn default_volunteers_range() -> String {
    "Sheet1!L:L".to_string()
}

fn default_cache_ttl_ms() -> u64 {
    30_000
}

fn default_assignment_cap() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_refresh_interval_ms() -> u64 {
    30_000
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet identifier in the values API.
    #[serde(default)]
    pub sheet_id: String,
    /// API key for read access.
    #[serde(default)]
    pub api_key: String,
    /// Apps Script endpoint that performs the assignment write.
    #[serde(default)]
    pub script_url: String,
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
    #[serde(default = "default_merchants_range")]
    pub merchants_range: String,
    #[serde(default = "default_volunteers_range")]
    pub volunteers_range: String,
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    /// Maximum merchants one volunteer may hold at once.
    #[serde(default = "default_assignment_cap")]
    pub assignment_cap: usize,
    /// The cap pre-check has been both on and off in past deployments;
    /// keep it a switch rather than an assumption.
    #[serde(default = "default_true")]
    pub enforce_assignment_cap: bool,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Field -> column index table for the merchant range.
    #[serde(default)]
    pub columns: ColumnMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_id: String::new(),
            api_key: String::new(),
            script_url: String::new(),
            sheets_base_url: default_sheets_base_url(),
            merchants_range: default_merchants_range(),
            volunteers_range: default_volunteers_range(),
            cache_ttl_ms: default_cache_ttl_ms(),
            assignment_cap: default_assignment_cap(),
            enforce_assignment_cap: true,
            refresh_interval_ms: default_refresh_interval_ms(),
            bind_addr: default_bind_addr(),
            columns: ColumnMap::default(),
        }
    }
}

impl Config {
    /// Load the config file (if present), apply environment overrides, and
    /// validate the column mapping.
    pub fn load() -> Result<Self> {
        let path = std::env::var("SPONSORBOOK_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env_overrides();

        config
            .columns
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid column mapping: {}", e))?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn apply_env_overrides(&mut self) {
        override_string(&mut self.sheet_id, "SPONSORBOOK_SHEET_ID");
        override_string(&mut self.api_key, "SPONSORBOOK_API_KEY");
        override_string(&mut self.script_url, "SPONSORBOOK_SCRIPT_URL");
        override_string(&mut self.sheets_base_url, "SPONSORBOOK_SHEETS_BASE_URL");
        override_string(&mut self.merchants_range, "SPONSORBOOK_MERCHANTS_RANGE");
        override_string(&mut self.volunteers_range, "SPONSORBOOK_VOLUNTEERS_RANGE");
        override_string(&mut self.bind_addr, "SPONSORBOOK_BIND_ADDR");
        override_parsed(&mut self.cache_ttl_ms, "SPONSORBOOK_CACHE_TTL_MS");
        override_parsed(&mut self.assignment_cap, "SPONSORBOOK_ASSIGNMENT_CAP");
        override_parsed(
            &mut self.enforce_assignment_cap,
            "SPONSORBOOK_ENFORCE_ASSIGNMENT_CAP",
        );
        override_parsed(&mut self.refresh_interval_ms, "SPONSORBOOK_REFRESH_INTERVAL_MS");
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_interval_ms)
    }
}

fn override_string(field: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *field = value;
        }
    }
}

fn override_parsed<T: std::str::FromStr>(field: &mut T, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if let Ok(parsed) = value.parse() {
            *field = parsed;
        }
    }
}
