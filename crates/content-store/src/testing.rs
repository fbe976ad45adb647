//! Test Support
//!
//! An in-memory stand-in for the content API that behaves like a tiny
//! server, plus fixtures.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::api::{AuthStatus, ChecklistItemPatch, ContentApi, Message};
use crate::clipboard::ClipboardReader;
use crate::error::{ApiError, ApiResult, ClipboardError};
use crate::lan::LanStatus;
use crate::models::{Checklist, ChecklistItem, Content, ContentKey, Note, CLIPBOARD_NOTE_TITLE};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

pub fn note(id: i64, title: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: String::new(),
        pinned: false,
        hidden: false,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn clipboard_note(id: i64, content: &str) -> Note {
    Note {
        content: content.to_string(),
        ..note(id, CLIPBOARD_NOTE_TITLE)
    }
}

pub fn checklist(id: i64, title: &str) -> Checklist {
    Checklist {
        id,
        title: title.to_string(),
        pinned: false,
        hidden: false,
        created_at: fixed_time(),
        updated_at: fixed_time(),
        items: Vec::new(),
    }
}

pub fn item(id: i64, checklist_id: i64, content: &str) -> ChecklistItem {
    ChecklistItem {
        id,
        checklist_id,
        content: content.to_string(),
        checked: false,
        position: 0,
    }
}

#[derive(Debug, Default)]
struct Server {
    next_id: i64,
    content: Vec<Content>,
    hidden: Vec<Content>,
    items: HashMap<i64, ChecklistItem>,
    logged_in: bool,
    lan: VecDeque<ApiResult<LanStatus>>,
    failures: VecDeque<ApiError>,
    calls: Vec<&'static str>,
    batches: Vec<Vec<ContentKey>>,
    slow_fetch: bool,
}

impl Server {
    fn call(&mut self, name: &'static str) -> ApiResult<()> {
        self.calls.push(name);
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Scripted fake of the content API
#[derive(Debug, Default)]
pub struct MockApi {
    server: Mutex<Server>,
}

impl MockApi {
    pub fn with_content(content: Vec<Content>) -> Self {
        let api = Self::default();
        api.server.lock().content = content;
        api
    }

    pub fn set_content(&self, content: Vec<Content>) {
        self.server.lock().content = content;
    }

    /// `list_content` suspends once before answering, like a real round trip
    pub fn set_slow_fetch(&self) {
        self.server.lock().slow_fetch = true;
    }

    pub fn set_hidden(&self, hidden: Vec<Content>) {
        self.server.lock().hidden = hidden;
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.server.lock().logged_in = logged_in;
    }

    pub fn seed_item(&self, item: ChecklistItem) {
        self.server.lock().items.insert(item.id, item);
    }

    /// The next call (whichever it is) fails with `err`
    pub fn fail_next(&self, err: ApiError) {
        self.server.lock().failures.push_back(err);
    }

    pub fn push_lan_status(&self, status: ApiResult<LanStatus>) {
        self.server.lock().lan.push_back(status);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.server.lock().calls.clone()
    }

    pub fn batches(&self) -> Vec<Vec<ContentKey>> {
        self.server.lock().batches.clone()
    }
}

#[async_trait(?Send)]
impl ContentApi for MockApi {
    async fn list_content(&self) -> ApiResult<Vec<Content>> {
        let slow = self.server.lock().slow_fetch;
        if slow {
            tokio::task::yield_now().await;
        }
        let mut server = self.server.lock();
        server.call("list_content")?;
        Ok(server.content.clone())
    }

    async fn list_hidden_content(&self) -> ApiResult<Vec<Content>> {
        let mut server = self.server.lock();
        server.call("list_hidden_content")?;
        Ok(server.hidden.clone())
    }

    async fn authenticate(&self, _pin: &str) -> ApiResult<Message> {
        let mut server = self.server.lock();
        server.call("authenticate")?;
        server.logged_in = true;
        Ok(Message { message: "Authenticated".into() })
    }

    async fn auth_status(&self) -> ApiResult<AuthStatus> {
        let mut server = self.server.lock();
        server.call("auth_status")?;
        Ok(AuthStatus { logged_in: server.logged_in })
    }

    async fn logout(&self) -> ApiResult<Message> {
        let mut server = self.server.lock();
        server.call("logout")?;
        server.logged_in = false;
        Ok(Message { message: "Logged out".into() })
    }

    async fn create_note(&self, title: &str, content: &str) -> ApiResult<Note> {
        let mut server = self.server.lock();
        server.call("create_note")?;
        let id = server.next_id();
        Ok(Note {
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..note(id, title)
        })
    }

    async fn create_checklist(&self, title: &str) -> ApiResult<Checklist> {
        let mut server = self.server.lock();
        server.call("create_checklist")?;
        let id = server.next_id();
        Ok(checklist(id, title))
    }

    async fn update_note(&self, note: &Note) -> ApiResult<Note> {
        self.server.lock().call("update_note")?;
        Ok(Note {
            updated_at: Utc::now(),
            ..note.clone()
        })
    }

    async fn update_checklist(&self, checklist: &Checklist) -> ApiResult<Checklist> {
        self.server.lock().call("update_checklist")?;
        Ok(Checklist {
            updated_at: Utc::now(),
            ..checklist.clone()
        })
    }

    async fn delete_note(&self, _id: i64) -> ApiResult<()> {
        self.server.lock().call("delete_note")
    }

    async fn delete_checklist(&self, _id: i64) -> ApiResult<()> {
        self.server.lock().call("delete_checklist")
    }

    async fn add_checklist_item(
        &self,
        checklist_id: i64,
        content: &str,
    ) -> ApiResult<ChecklistItem> {
        let mut server = self.server.lock();
        server.call("add_checklist_item")?;
        let id = server.next_id();
        let created = item(id, checklist_id, content);
        server.items.insert(id, created.clone());
        Ok(created)
    }

    async fn update_checklist_item(
        &self,
        item_id: i64,
        patch: &ChecklistItemPatch,
    ) -> ApiResult<ChecklistItem> {
        let mut server = self.server.lock();
        server.call("update_checklist_item")?;
        let existing = server.items.get_mut(&item_id).ok_or(ApiError::Http {
            status: 404,
            message: Some("Checklist item not found".into()),
        })?;
        if let Some(content) = &patch.content {
            existing.content = content.clone();
        }
        if let Some(checked) = patch.checked {
            existing.checked = checked;
        }
        if let Some(position) = patch.position {
            existing.position = position;
        }
        Ok(existing.clone())
    }

    async fn delete_checklist_item(&self, item_id: i64) -> ApiResult<()> {
        let mut server = self.server.lock();
        server.call("delete_checklist_item")?;
        server.items.remove(&item_id);
        Ok(())
    }

    async fn delete_batch(&self, keys: &[ContentKey]) -> ApiResult<Message> {
        let mut server = self.server.lock();
        server.call("delete_batch")?;
        server.batches.push(keys.to_vec());
        Ok(Message { message: format!("Deleted {} items", keys.len()) })
    }

    async fn lan_status(&self) -> ApiResult<LanStatus> {
        let mut server = self.server.lock();
        server.call("lan_status")?;
        server.lan.pop_front().unwrap_or(Ok(LanStatus::default()))
    }

    async fn enable_lan(&self) -> ApiResult<()> {
        self.server.lock().call("enable_lan")
    }

    async fn disable_lan(&self) -> ApiResult<()> {
        self.server.lock().call("disable_lan")
    }
}

/// Clipboard that always answers with the same result
pub struct MockClipboard(pub Result<String, ClipboardError>);

#[async_trait(?Send)]
impl ClipboardReader for MockClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.0.clone()
    }
}
