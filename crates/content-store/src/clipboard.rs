//! Clipboard Access
//!
//! Reading the OS clipboard is capability-gated, so the store only sees it
//! through this trait. The browser implementation lives in the UI crate.

use async_trait::async_trait;

use crate::error::ClipboardError;

#[async_trait(?Send)]
pub trait ClipboardReader {
    /// Current clipboard text
    async fn read_text(&self) -> Result<String, ClipboardError>;
}

/// Environment without clipboard read access
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

#[async_trait(?Send)]
impl ClipboardReader for NoClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}
