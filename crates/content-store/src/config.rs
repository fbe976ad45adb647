//! Client Configuration
//!
//! Where the content API lives and how often the UI-facing helpers tick.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;
const DEFAULT_LAN_POLL_INTERVAL_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Origin (plus optional path prefix) the `/api/...` routes hang off
    pub base_url: String,
    /// How long a toast stays visible
    pub notification_ttl_ms: u64,
    /// How often the LAN sharing status is refreshed
    pub lan_poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            lan_poll_interval_ms: DEFAULT_LAN_POLL_INTERVAL_MS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl_ms = ttl.as_millis() as u64;
        self
    }

    pub fn with_lan_poll_interval(mut self, interval: Duration) -> Self {
        self.lan_poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn lan_poll_interval(&self) -> Duration {
        Duration::from_millis(self.lan_poll_interval_ms)
    }

    /// Parsed base URL, always ending in `/` so relative joins keep the prefix
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(self.base_url.trim())
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.notification_ttl_ms == 0 {
            return Err(ConfigError::InvalidInterval("notificationTtlMs"));
        }
        if self.lan_poll_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval("lanPollIntervalMs"));
        }
        Ok(())
    }
}
