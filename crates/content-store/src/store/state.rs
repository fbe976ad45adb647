//! Content State
//!
//! Plain data plus the reconciliation rules. Nothing here talks to the
//! network; `ContentStore` calls these after a request has completed.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::auth::LockState;
use crate::models::{Checklist, ChecklistItem, Content, ContentKey, ContentType, Note};

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentState {
    /// Visible items, newest additions first
    pub content: Vec<Content>,
    /// Items unlocked via PIN; empty while locked
    pub hidden_content: Vec<Content>,
    /// The "Clipboard" note, kept out of both lists
    pub clipboard_note: Option<Note>,
    pub selected_content_keys: BTreeSet<ContentKey>,
    pub lock_state: LockState,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped on every committed change
    pub revision: u64,
}

impl ContentState {
    pub fn contains(&self, key: &ContentKey) -> bool {
        self.content.iter().any(|c| c.key() == *key)
            || self.hidden_content.iter().any(|c| c.key() == *key)
    }

    pub fn is_selected(&self, key: &ContentKey) -> bool {
        self.selected_content_keys.contains(key)
    }

    /// Prepends; the caller guarantees the item is new
    pub fn add_content(&mut self, item: Content) {
        self.content.insert(0, item);
    }

    /// Merges a server-confirmed item into whichever slot it belongs to.
    ///
    /// Order matters: clipboard note, then becoming hidden, then becoming
    /// visible again, then a plain in-place edit.
    pub fn update_content(&mut self, item: Content) {
        if let Content::Note(note) = &item {
            if note.is_clipboard_note() {
                self.clipboard_note = Some(note.clone());
                return;
            }
        }

        let key = item.key();

        if item.hidden() {
            self.content.retain(|c| c.key() != key);
            // Hidden items are only cached once the hidden view is unlocked
            if !self.lock_state.is_unlocked() {
                self.prune_selection();
                return;
            }
            match self.hidden_content.iter_mut().find(|c| c.key() == key) {
                Some(existing) => *existing = item,
                None => self.hidden_content.push(item),
            }
            return;
        }

        if let Some(pos) = self.hidden_content.iter().position(|c| c.key() == key) {
            self.hidden_content.remove(pos);
            self.content.insert(0, item);
            return;
        }

        replace_in(&mut self.content, &item);
        replace_in(&mut self.hidden_content, &item);
    }

    /// Removes the item from both lists and clears the whole selection
    pub fn delete_content(&mut self, id: i64, kind: ContentType) {
        let key = ContentKey::new(kind, id);
        self.content.retain(|c| c.key() != key);
        self.hidden_content.retain(|c| c.key() != key);
        self.selected_content_keys.clear();
    }

    /// Toggles selection; keys of items not in either list are ignored
    pub fn toggle_select_content(&mut self, key: ContentKey) {
        if !self.selected_content_keys.remove(&key) && self.contains(&key) {
            self.selected_content_keys.insert(key);
        }
    }

    pub fn clear_selected_content(&mut self) {
        self.selected_content_keys.clear();
    }

    /// Drops cached hidden content and re-locks the view
    pub fn lock_hidden(&mut self) {
        self.hidden_content.clear();
        self.lock_state = self.lock_state.on_relock();
        self.prune_selection();
    }

    /// A 403 on a mutating call: the hidden view is stale or unauthorized
    pub fn expire_session(&mut self) {
        self.lock_hidden();
        self.error = Some(SESSION_EXPIRED_MESSAGE.to_string());
    }

    /// Replaces the visible list from a full fetch, splitting out the clipboard note.
    ///
    /// Items flagged hidden are skipped; a visible item evicts any stale
    /// hidden copy of itself.
    pub fn replace_content(&mut self, all: Vec<Content>) {
        let mut clipboard_note = None;
        let mut visible = Vec::with_capacity(all.len());

        for item in all {
            match item {
                Content::Note(note) if note.is_clipboard_note() => {
                    if clipboard_note.is_none() {
                        clipboard_note = Some(note);
                    }
                }
                // The server's flag wins over whatever copy is cached
                other if other.hidden() => {}
                other => {
                    let key = other.key();
                    self.hidden_content.retain(|c| c.key() != key);
                    visible.push(other);
                }
            }
        }

        self.content = visible;
        self.clipboard_note = clipboard_note;
        self.prune_selection();
    }

    /// Replaces the hidden list and unlocks the view
    pub fn replace_hidden(&mut self, hidden: Vec<Content>) {
        let hidden: Vec<Content> = hidden.into_iter().filter(|c| !c.is_clipboard_note()).collect();
        self.content
            .retain(|c| !hidden.iter().any(|h| h.key() == c.key()));
        self.hidden_content = hidden;
        self.lock_state = self.lock_state.on_hidden_loaded();
        self.prune_selection();
    }

    /// Removes every item whose key is in `keys` and clears the selection
    pub fn remove_keys(&mut self, keys: &BTreeSet<ContentKey>) {
        self.content.retain(|c| !keys.contains(&c.key()));
        self.hidden_content.retain(|c| !keys.contains(&c.key()));
        self.selected_content_keys.clear();
    }

    /// Applies `edit` to the items of a visible checklist and stamps `updated_at`.
    ///
    /// Hidden checklists are not searched. Returns false when the checklist
    /// is not in the visible list.
    pub fn edit_checklist_items<F>(&mut self, checklist_id: i64, edit: F) -> bool
    where
        F: FnOnce(&mut Vec<ChecklistItem>),
    {
        let found = self.content.iter_mut().find_map(|c| match c {
            Content::Checklist(checklist) if checklist.id == checklist_id => Some(checklist),
            _ => None,
        });

        match found {
            Some(checklist) => {
                edit(&mut checklist.items);
                checklist.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn checklist(&self, checklist_id: i64) -> Option<&Checklist> {
        self.content
            .iter()
            .chain(self.hidden_content.iter())
            .find_map(|c| match c {
                Content::Checklist(checklist) if checklist.id == checklist_id => Some(checklist),
                _ => None,
            })
    }

    fn prune_selection(&mut self) {
        let present: BTreeSet<ContentKey> = self
            .content
            .iter()
            .chain(self.hidden_content.iter())
            .map(Content::key)
            .collect();
        self.selected_content_keys.retain(|key| present.contains(key));
    }
}

fn replace_in(list: &mut [Content], item: &Content) {
    let key = item.key();
    if let Some(existing) = list.iter_mut().find(|c| c.key() == key) {
        *existing = item.clone();
    }
}
