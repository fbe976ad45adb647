//! LAN Sharing
//!
//! The backend can temporarily expose itself on the local network. This
//! helper toggles that and reports the outcome as notifications.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::api::ContentApi;
use crate::error::{ApiError, ApiResult};
use crate::notification::NotificationCenter;

/// `GET /api/system/lan/status` body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanStatus {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub remaining_ms: u64,
}

impl LanStatus {
    /// Minutes left on the sharing window, rounded up
    pub fn remaining_minutes(&self) -> u64 {
        self.remaining_ms.div_ceil(60_000)
    }
}

#[derive(Clone)]
pub struct LanSharing {
    api: Arc<dyn ContentApi>,
    notifications: NotificationCenter,
    status: Arc<Mutex<Option<LanStatus>>>,
}

impl LanSharing {
    pub fn new(api: Arc<dyn ContentApi>, notifications: NotificationCenter) -> Self {
        Self {
            api,
            notifications,
            status: Arc::new(Mutex::new(None)),
        }
    }

    /// Last known status; `None` until the first successful refresh
    pub fn status(&self) -> Option<LanStatus> {
        *self.status.lock()
    }

    /// Failures are logged only; the previous status is kept
    pub async fn refresh_status(&self) -> ApiResult<LanStatus> {
        match self.api.lan_status().await {
            Ok(status) => {
                *self.status.lock() = Some(status);
                Ok(status)
            }
            Err(e) => {
                log::warn!("Failed to fetch LAN status: {}", e);
                Err(e)
            }
        }
    }

    /// Enables sharing, or resets the timer when it is already on
    pub async fn enable(&self) -> ApiResult<()> {
        let is_reset = self.status().map(|s| s.enabled).unwrap_or(false);
        match self.api.enable_lan().await {
            Ok(()) => {
                let _ = self.refresh_status().await;
                self.notifications.success(if is_reset {
                    "LAN Timer Reset to 15m"
                } else {
                    "LAN Sharing Enabled"
                });
                Ok(())
            }
            Err(e) => {
                self.notifications.error(failure_message(
                    &e,
                    "enable",
                    "Failed to enable: Access denied or server error",
                ));
                Err(e)
            }
        }
    }

    pub async fn disable(&self) -> ApiResult<()> {
        match self.api.disable_lan().await {
            Ok(()) => {
                let _ = self.refresh_status().await;
                self.notifications.info("LAN Sharing Disabled");
                Ok(())
            }
            Err(e) => {
                self.notifications.error(failure_message(
                    &e,
                    "disable",
                    "Failed to disable: Access denied or server error",
                ));
                Err(e)
            }
        }
    }
}

fn failure_message(err: &ApiError, action: &str, fallback: &str) -> String {
    match err {
        ApiError::Network(_) => format!(
            "A network error occurred while trying to {} LAN sharing.",
            action
        ),
        _ => err
            .backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
    }
}
