//! Content Store
//!
//! Single source of truth for the content the current view shows. Every
//! `*_api` operation awaits its request first and only then commits the
//! result in one critical section, so observers never see half an update.
//! The lock is never held across an `.await`.
//!
//! Updates are not versioned: when two requests touching the same item are
//! in flight, whichever completes last wins.

mod state;
mod view;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::future::{poll_fn, Future};
use std::pin::pin;
use std::sync::Arc;
use std::task::Poll;

use parking_lot::Mutex;

use crate::api::{ChecklistItemPatch, ContentApi};
use crate::auth::LockState;
use crate::clipboard::{ClipboardReader, NoClipboard};
use crate::error::{ApiError, ApiResult, PasteError};
use crate::models::{Checklist, Content, ContentKey, ContentType, Note};

pub use state::{ContentState, SESSION_EXPIRED_MESSAGE};
pub use view::{arrange, ArrangedContent};

/// Drives `op`, calling `sync` once it has started and again when it ends.
///
/// The first poll runs an operation up to its request, so flags like
/// `loading` are already committed by the first `sync`. An operation that
/// finishes without suspending is synced once.
pub async fn run_with_sync<Fut: Future>(op: Fut, mut sync: impl FnMut()) -> Fut::Output {
    let mut op = pin!(op);
    let started = poll_fn(|cx| Poll::Ready(op.as_mut().poll(cx))).await;
    sync();
    match started {
        Poll::Ready(output) => output,
        Poll::Pending => {
            let output = op.await;
            sync();
            output
        }
    }
}

#[derive(Clone)]
pub struct ContentStore {
    state: Arc<Mutex<ContentState>>,
    api: Arc<dyn ContentApi>,
    clipboard: Arc<dyn ClipboardReader>,
}

impl ContentStore {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ContentState::default())),
            api,
            clipboard: Arc::new(NoClipboard),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardReader>) -> Self {
        self.clipboard = clipboard;
        self
    }

    // ========================
    // Reads
    // ========================

    pub fn snapshot(&self) -> ContentState {
        self.state.lock().clone()
    }

    pub fn content(&self) -> Vec<Content> {
        self.state.lock().content.clone()
    }

    pub fn hidden_content(&self) -> Vec<Content> {
        self.state.lock().hidden_content.clone()
    }

    pub fn clipboard_note(&self) -> Option<Note> {
        self.state.lock().clipboard_note.clone()
    }

    pub fn selected_content_keys(&self) -> BTreeSet<ContentKey> {
        self.state.lock().selected_content_keys.clone()
    }

    pub fn is_selected(&self, id: i64, kind: ContentType) -> bool {
        self.state.lock().is_selected(&ContentKey::new(kind, id))
    }

    pub fn lock_state(&self) -> LockState {
        self.state.lock().lock_state
    }

    pub fn loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    pub fn arranged(&self) -> ArrangedContent {
        arrange(&self.state.lock())
    }

    // ========================
    // Local Mutations
    // ========================

    fn mutate<R>(&self, f: impl FnOnce(&mut ContentState) -> R) -> R {
        let mut state = self.state.lock();
        let result = f(&mut state);
        state.revision += 1;
        result
    }

    pub fn set_error(&self, error: Option<String>) {
        self.mutate(|s| s.error = error);
    }

    pub fn set_content(&self, all: Vec<Content>) {
        self.mutate(|s| s.replace_content(all));
    }

    pub fn set_clipboard_note(&self, note: Option<Note>) {
        self.mutate(|s| s.clipboard_note = note);
    }

    pub fn add_content(&self, item: Content) {
        self.mutate(|s| s.add_content(item));
    }

    pub fn update_content(&self, item: Content) {
        log::debug!("reconciling {}", item.key());
        self.mutate(|s| s.update_content(item));
    }

    pub fn delete_content(&self, id: i64, kind: ContentType) {
        self.mutate(|s| s.delete_content(id, kind));
    }

    pub fn toggle_select_content(&self, id: i64, kind: ContentType) {
        self.mutate(|s| s.toggle_select_content(ContentKey::new(kind, id)));
    }

    pub fn clear_selected_content(&self) {
        self.mutate(ContentState::clear_selected_content);
    }

    /// Re-locks the hidden view, then asks the server to end the session.
    ///
    /// The local lock always holds; a failed logout is only logged.
    pub async fn hide_hidden_content(&self) {
        self.mutate(ContentState::lock_hidden);
        log::info!("hidden content locked");
        if let Err(e) = self.api.logout().await {
            log::warn!("Logout after re-lock failed: {}", e);
        }
    }

    // ========================
    // Request Bookkeeping
    // ========================

    fn begin(&self) {
        self.mutate(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn finish(&self, apply: impl FnOnce(&mut ContentState)) {
        self.mutate(|s| {
            s.loading = false;
            apply(s);
        });
    }

    fn fail(&self, error: String) {
        log::error!("{}", error);
        self.mutate(|s| {
            s.loading = false;
            s.error = Some(error);
        });
    }

    /// Content-mutating calls treat 403 as proof the session is gone
    fn fail_mutating(&self, label: &str, err: &ApiError) {
        if err.is_session_expired() {
            log::warn!("{}: session expired, locking hidden content", label);
            self.mutate(|s| {
                s.loading = false;
                s.expire_session();
            });
        } else {
            self.fail(format!("{}: {}", label, err));
        }
    }

    // ========================
    // Fetching & Auth
    // ========================

    pub async fn fetch_content_api(&self) -> ApiResult<()> {
        self.begin();
        match self.api.list_content().await {
            Ok(all) => {
                log::info!("fetched {} content items", all.len());
                self.finish(|s| s.replace_content(all));
                Ok(())
            }
            Err(e) => {
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn fetch_hidden_content_api(&self) -> ApiResult<()> {
        self.begin();
        match self.api.list_hidden_content().await {
            Ok(hidden) => {
                log::info!("fetched {} hidden items", hidden.len());
                self.finish(|s| s.replace_hidden(hidden));
                Ok(())
            }
            Err(e) => {
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Authenticates only; the caller follows up with `fetch_hidden_content_api`
    pub async fn submit_pin_api(&self, pin: &str) -> ApiResult<()> {
        self.mutate(|s| {
            s.loading = true;
            s.error = None;
            s.lock_state = s.lock_state.on_pin_submitted();
        });
        match self.api.authenticate(pin).await {
            Ok(_) => {
                self.finish(|_| {});
                Ok(())
            }
            Err(e) => {
                log::error!("Login failed: {}", e);
                self.mutate(|s| {
                    s.loading = false;
                    s.lock_state = s.lock_state.on_pin_rejected();
                    s.error = Some(format!("Login failed: {}", e));
                });
                Err(e)
            }
        }
    }

    /// Whether the server still considers this session logged in
    pub async fn check_auth_status_api(&self) -> ApiResult<bool> {
        self.begin();
        match self.api.auth_status().await {
            Ok(status) => {
                self.finish(|s| {
                    if !status.logged_in && s.lock_state.is_unlocked() {
                        s.lock_hidden();
                    }
                });
                Ok(status.logged_in)
            }
            Err(e) => {
                self.fail(format!("Login failed: {}", e));
                Err(e)
            }
        }
    }

    pub async fn logout_api(&self) -> ApiResult<()> {
        self.begin();
        match self.api.logout().await {
            Ok(_) => {
                self.finish(|_| {});
                Ok(())
            }
            Err(e) => {
                self.fail(format!("Logout failed: {}", e));
                Err(e)
            }
        }
    }

    // ========================
    // Content CRUD
    // ========================

    pub async fn add_note_api(&self, title: &str, content: &str) -> ApiResult<()> {
        self.begin();
        match self.api.create_note(title, content).await {
            Ok(note) => {
                log::info!("created note {}", note.id);
                self.finish(|s| s.add_content(Content::Note(note)));
                Ok(())
            }
            Err(e) => {
                self.fail(format!("Failed to add note: {}", e));
                Err(e)
            }
        }
    }

    pub async fn add_checklist_api(&self, title: &str) -> ApiResult<()> {
        self.begin();
        match self.api.create_checklist(title).await {
            Ok(checklist) => {
                log::info!("created checklist {}", checklist.id);
                self.finish(|s| s.add_content(Content::Checklist(checklist)));
                Ok(())
            }
            Err(e) => {
                self.fail(format!("Failed to add checklist: {}", e));
                Err(e)
            }
        }
    }

    pub async fn update_note_api(&self, note: &Note) -> ApiResult<()> {
        self.begin();
        match self.api.update_note(note).await {
            Ok(updated) => {
                self.finish(|s| s.update_content(Content::Note(updated)));
                Ok(())
            }
            Err(e) => {
                self.fail_mutating("Failed to update note", &e);
                Err(e)
            }
        }
    }

    pub async fn update_checklist_api(&self, checklist: &Checklist) -> ApiResult<()> {
        self.begin();
        match self.api.update_checklist(checklist).await {
            Ok(updated) => {
                self.finish(|s| s.update_content(Content::Checklist(updated)));
                Ok(())
            }
            Err(e) => {
                self.fail_mutating("Failed to update checklist", &e);
                Err(e)
            }
        }
    }

    pub async fn delete_note_api(&self, id: i64) -> ApiResult<()> {
        self.begin();
        match self.api.delete_note(id).await {
            Ok(()) => {
                self.finish(|s| s.delete_content(id, ContentType::Note));
                Ok(())
            }
            Err(e) => {
                self.fail_mutating("Failed to delete note", &e);
                Err(e)
            }
        }
    }

    pub async fn delete_checklist_api(&self, id: i64) -> ApiResult<()> {
        self.begin();
        match self.api.delete_checklist(id).await {
            Ok(()) => {
                self.finish(|s| s.delete_content(id, ContentType::Checklist));
                Ok(())
            }
            Err(e) => {
                self.fail_mutating("Failed to delete checklist", &e);
                Err(e)
            }
        }
    }

    /// Deletes every selected item in one request. No selection, no request.
    pub async fn delete_selected_content_api(&self) -> ApiResult<()> {
        let keys = self.selected_content_keys();
        if keys.is_empty() {
            return Ok(());
        }

        self.begin();
        let batch: Vec<ContentKey> = keys.iter().copied().collect();
        match self.api.delete_batch(&batch).await {
            Ok(_) => {
                log::info!("deleted {} selected items", batch.len());
                self.finish(|s| s.remove_keys(&keys));
                Ok(())
            }
            Err(e) => {
                self.fail_mutating("Failed to delete items", &e);
                Err(e)
            }
        }
    }

    // ========================
    // Checklist Items
    // ========================
    //
    // Only visible checklists are reconciled; items of a hidden checklist are
    // persisted server-side but the cached copy is left as is.

    pub async fn add_checklist_item_api(&self, checklist_id: i64, content: &str) -> ApiResult<()> {
        match self.api.add_checklist_item(checklist_id, content).await {
            Ok(item) => {
                self.mutate(|s| s.edit_checklist_items(checklist_id, |items| items.push(item)));
                Ok(())
            }
            Err(e) => {
                self.fail_item(format!("Failed to add item: {}", e));
                Err(e)
            }
        }
    }

    pub async fn update_checklist_item_api(
        &self,
        checklist_id: i64,
        item_id: i64,
        patch: &ChecklistItemPatch,
    ) -> ApiResult<()> {
        match self.api.update_checklist_item(item_id, patch).await {
            Ok(updated) => {
                self.mutate(|s| {
                    s.edit_checklist_items(checklist_id, |items| {
                        if let Some(existing) = items.iter_mut().find(|i| i.id == item_id) {
                            *existing = updated;
                        }
                    })
                });
                Ok(())
            }
            Err(e) => {
                self.fail_item(format!("Failed to update item: {}", e));
                Err(e)
            }
        }
    }

    pub async fn delete_checklist_item_api(&self, checklist_id: i64, item_id: i64) -> ApiResult<()> {
        match self.api.delete_checklist_item(item_id).await {
            Ok(()) => {
                self.mutate(|s| {
                    s.edit_checklist_items(checklist_id, |items| items.retain(|i| i.id != item_id))
                });
                Ok(())
            }
            Err(e) => {
                self.fail_item(format!("Failed to delete item: {}", e));
                Err(e)
            }
        }
    }

    /// Item calls leave the loading flag alone
    fn fail_item(&self, error: String) {
        log::error!("{}", error);
        self.mutate(|s| s.error = Some(error));
    }

    // ========================
    // Clipboard Note
    // ========================

    /// Reads the OS clipboard and saves it as the clipboard note's content.
    ///
    /// The cached clipboard note only changes once the server confirms.
    pub async fn paste_to_clipboard_note_api(&self) -> Result<(), PasteError> {
        self.set_error(None);

        let Some(mut note) = self.clipboard_note() else {
            let err = PasteError::MissingClipboardNote;
            self.set_error(Some(err.to_string()));
            return Err(err);
        };

        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Clipboard read failed: {}", e);
                self.set_error(Some(e.to_string()));
                return Err(PasteError::Clipboard(e));
            }
        };

        if text.trim().is_empty() {
            let err = PasteError::EmptyClipboard;
            self.set_error(Some(err.to_string()));
            return Err(err);
        }

        note.content = text;
        self.update_note_api(&note).await.map_err(PasteError::Api)
    }
}
