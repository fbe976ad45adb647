//! Content API
//!
//! The REST contract the store depends on, as a trait, plus the request and
//! response bodies it exchanges. `HttpContentApi` is the reqwest-backed
//! implementation.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::lan::LanStatus;
use crate::models::{bool_ish, Checklist, ChecklistItem, Content, ContentKey, Note};

pub use http::HttpContentApi;

/// Remote content API.
///
/// Every method is a single request: no retries, no caching. Futures are not
/// `Send` because the browser fetch backend is single-threaded.
#[async_trait(?Send)]
pub trait ContentApi {
    /// GET /api/content
    async fn list_content(&self) -> ApiResult<Vec<Content>>;

    /// GET /api/content/hidden (session-credentialed)
    async fn list_hidden_content(&self) -> ApiResult<Vec<Content>>;

    /// POST /api/auth (session-credentialed)
    async fn authenticate(&self, pin: &str) -> ApiResult<Message>;

    /// GET /api/auth/status (session-credentialed)
    async fn auth_status(&self) -> ApiResult<AuthStatus>;

    /// POST /api/logout (session-credentialed)
    async fn logout(&self) -> ApiResult<Message>;

    /// POST /api/notes
    async fn create_note(&self, title: &str, content: &str) -> ApiResult<Note>;

    /// POST /api/checklists
    async fn create_checklist(&self, title: &str) -> ApiResult<Checklist>;

    /// PUT /api/notes/:id
    async fn update_note(&self, note: &Note) -> ApiResult<Note>;

    /// PUT /api/checklists/:id
    async fn update_checklist(&self, checklist: &Checklist) -> ApiResult<Checklist>;

    /// DELETE /api/notes/:id
    async fn delete_note(&self, id: i64) -> ApiResult<()>;

    /// DELETE /api/checklists/:id
    async fn delete_checklist(&self, id: i64) -> ApiResult<()>;

    /// POST /api/checklists/:id/items
    async fn add_checklist_item(&self, checklist_id: i64, content: &str)
        -> ApiResult<ChecklistItem>;

    /// PUT /api/checklists/items/:itemId
    async fn update_checklist_item(
        &self,
        item_id: i64,
        patch: &ChecklistItemPatch,
    ) -> ApiResult<ChecklistItem>;

    /// DELETE /api/checklists/items/:itemId
    async fn delete_checklist_item(&self, item_id: i64) -> ApiResult<()>;

    /// DELETE /api/content/batch
    async fn delete_batch(&self, keys: &[ContentKey]) -> ApiResult<Message>;

    /// GET /api/system/lan/status
    async fn lan_status(&self) -> ApiResult<LanStatus>;

    /// POST /api/system/lan/enable
    async fn enable_lan(&self) -> ApiResult<()>;

    /// POST /api/system/lan/disable
    async fn disable_lan(&self) -> ApiResult<()>;
}

// ========================
// Response Bodies
// ========================

/// `{message}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}

/// `{loggedIn}` session probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "loggedIn", default, deserialize_with = "bool_ish")]
    pub logged_in: bool,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
}

/// Builds the error for a non-2xx response.
///
/// The backend's `error` field wins; a missing field, an empty string, or a
/// body that is not JSON falls back to the status code.
pub fn parse_error_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .filter(|message| !message.trim().is_empty());
    ApiError::Http { status, message }
}

// ========================
// Request Bodies
// ========================

#[derive(Serialize)]
pub(crate) struct PinBody<'a> {
    pub pin: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NewNoteBody<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NewChecklistBody<'a> {
    pub title: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NoteUpdateBody<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub pinned: bool,
    pub hidden: bool,
}

impl<'a> From<&'a Note> for NoteUpdateBody<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            title: &note.title,
            content: &note.content,
            pinned: note.pinned,
            hidden: note.hidden,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ChecklistUpdateBody<'a> {
    pub title: &'a str,
    pub items: &'a [ChecklistItem],
    pub pinned: bool,
    pub hidden: bool,
}

impl<'a> From<&'a Checklist> for ChecklistUpdateBody<'a> {
    fn from(checklist: &'a Checklist) -> Self {
        Self {
            title: &checklist.title,
            items: &checklist.items,
            pinned: checklist.pinned,
            hidden: checklist.hidden,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct NewItemBody<'a> {
    pub content: &'a str,
}

#[derive(Serialize)]
pub(crate) struct BatchDeleteBody<'a> {
    pub items: &'a [ContentKey],
}

/// Partial checklist item update; unset fields are left out of the body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl ChecklistItemPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Default::default()
        }
    }

    pub fn position(position: i64) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }
}
