//! Content Store
//!
//! Client-side cache of notes and checklists kept consistent with the remote
//! content API.
//!
//! Layout:
//! - models: content entities as the API returns them
//! - api: REST client and error envelope handling
//! - store: the reconciling `ContentStore`, selection and arranged views
//! - auth: explicit lock state for hidden content
//! - notification / note_ui / lan: small UI-facing collaborators

mod auth;
mod clipboard;
mod config;
mod error;
mod lan;
mod models;
mod note_ui;
mod notification;

pub mod api;
pub mod store;

#[cfg(test)]
mod testing;

pub use auth::{validate_pin, LockState, PinError, PIN_LENGTH};
pub use clipboard::{ClipboardReader, NoClipboard};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ClipboardError, ConfigError, KeyParseError, PasteError};
pub use lan::{LanSharing, LanStatus};
pub use models::{
    Checklist, ChecklistItem, Content, ContentKey, ContentType, Note, CLIPBOARD_NOTE_TITLE,
};
pub use note_ui::{
    LocalBroadcast, LocalEndpoint, MinimizedNotes, NoteUiSnapshot, NoteUiStore, NoteUiTransport,
    PreferenceStorage, NOTE_UI_STORAGE_KEY,
};
pub use notification::{Notification, NotificationCenter, NotificationKind};
pub use store::{ArrangedContent, ContentState, ContentStore};
