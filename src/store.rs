//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store mirrors
//! the content-store crate's state; components read from here and every
//! mutation goes through `ContentStore` first.

use std::collections::BTreeSet;

use content_store::{
    store::arrange, ArrangedContent, ContentKey, ContentStore, LanStatus, LockState,
    MinimizedNotes, Notification,
};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Clipboard note, pinned, others and hidden in display order
    pub arranged: ArrangedContent,
    /// Keys chosen for batch deletion
    pub selected: BTreeSet<ContentKey>,
    pub lock_state: LockState,
    pub loading: bool,
    pub error: Option<String>,
    /// Last `ContentStore` revision copied in
    pub revision: u64,
    pub notifications: Vec<Notification>,
    pub lan_status: Option<LanStatus>,
    pub minimized: MinimizedNotes,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Copy the content cache into the store
pub fn store_sync_content(store: &AppStore, content: &ContentStore) {
    let snapshot = content.snapshot();
    if store.revision().get_untracked() != snapshot.revision {
        *store.arranged().write() = arrange(&snapshot);
        *store.selected().write() = snapshot.selected_content_keys.clone();
        *store.revision().write() = snapshot.revision;
    }
    if store.lock_state().get_untracked() != snapshot.lock_state {
        *store.lock_state().write() = snapshot.lock_state;
    }
    if store.loading().get_untracked() != snapshot.loading {
        *store.loading().write() = snapshot.loading;
    }
    if store.error().get_untracked() != snapshot.error {
        *store.error().write() = snapshot.error;
    }
}

pub fn store_set_notifications(store: &AppStore, notifications: Vec<Notification>) {
    *store.notifications().write() = notifications;
}

pub fn store_set_lan_status(store: &AppStore, status: Option<LanStatus>) {
    *store.lan_status().write() = status;
}

pub fn store_set_minimized(store: &AppStore, minimized: MinimizedNotes) {
    *store.minimized().write() = minimized;
}

/// Whether a note is shown collapsed
pub fn store_is_minimized(store: &AppStore, id: i64) -> bool {
    store.minimized().read().get(&id).copied().unwrap_or(false)
}
