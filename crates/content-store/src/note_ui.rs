//! Note UI Preferences
//!
//! Per-note minimized flags, shared between every open tab. Each local change
//! publishes the whole map; receivers overwrite their copy without merging
//! (last write wins).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Storage key and channel name shared by all tabs
pub const NOTE_UI_STORAGE_KEY: &str = "note-ui-sync";

/// Note id → minimized
pub type MinimizedNotes = BTreeMap<i64, bool>;

/// Wire and storage shape: `{"minimizedNotes": {"<id>": bool}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUiSnapshot {
    #[serde(default)]
    pub minimized_notes: MinimizedNotes,
}

/// Envelope persisted under `NOTE_UI_STORAGE_KEY`
#[derive(Debug, Serialize, Deserialize)]
struct Persisted {
    state: NoteUiSnapshot,
    #[serde(default)]
    version: u32,
}

/// Fan-out to the other tabs
pub trait NoteUiTransport {
    fn publish(&self, minimized: &MinimizedNotes);

    /// Pull-style transports return the latest map another tab published
    fn poll(&self) -> Option<MinimizedNotes> {
        None
    }
}

/// Key/value persistence that outlives the tab
pub trait PreferenceStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

#[derive(Default)]
pub struct NoteUiStore {
    minimized: MinimizedNotes,
    transport: Option<Box<dyn NoteUiTransport>>,
    storage: Option<Box<dyn PreferenceStorage>>,
}

impl NoteUiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads any persisted map from `storage`
    pub fn with_storage(mut self, storage: Box<dyn PreferenceStorage>) -> Self {
        if let Some(raw) = storage.load(NOTE_UI_STORAGE_KEY) {
            match serde_json::from_str::<Persisted>(&raw) {
                Ok(persisted) => self.minimized = persisted.state.minimized_notes,
                Err(e) => log::warn!("Ignoring unreadable note UI preferences: {}", e),
            }
        }
        self.storage = Some(storage);
        self
    }

    pub fn with_transport(mut self, transport: Box<dyn NoteUiTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn set_transport(&mut self, transport: Box<dyn NoteUiTransport>) {
        self.transport = Some(transport);
    }

    pub fn is_minimized(&self, id: i64) -> bool {
        self.minimized.get(&id).copied().unwrap_or(false)
    }

    pub fn minimized(&self) -> &MinimizedNotes {
        &self.minimized
    }

    pub fn toggle(&mut self, id: i64) -> bool {
        let minimized = !self.is_minimized(id);
        self.set(id, minimized);
        minimized
    }

    pub fn set(&mut self, id: i64, minimized: bool) {
        self.minimized.insert(id, minimized);
        self.persist();
        if let Some(transport) = &self.transport {
            transport.publish(&self.minimized);
        }
    }

    /// Another tab's map replaces ours wholesale; nothing is re-published
    pub fn apply_remote(&mut self, minimized: MinimizedNotes) {
        self.minimized = minimized;
        self.persist();
    }

    /// Applies whatever a pull-style transport has received; returns whether anything changed
    pub fn sync(&mut self) -> bool {
        let remote = self.transport.as_ref().and_then(|t| t.poll());
        match remote {
            Some(minimized) => {
                self.apply_remote(minimized);
                true
            }
            None => false,
        }
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let persisted = Persisted {
            state: NoteUiSnapshot {
                minimized_notes: self.minimized.clone(),
            },
            version: 0,
        };
        match serde_json::to_string(&persisted) {
            Ok(raw) => storage.save(NOTE_UI_STORAGE_KEY, &raw),
            Err(e) => log::warn!("Failed to persist note UI preferences: {}", e),
        }
    }
}

// ========================
// In-process Broadcast
// ========================

#[derive(Debug, Clone)]
struct NoteUiMessage {
    origin: u64,
    minimized: MinimizedNotes,
}

/// In-process stand-in for a cross-tab channel
#[derive(Debug, Clone)]
pub struct LocalBroadcast {
    sender: broadcast::Sender<NoteUiMessage>,
    next_origin: std::sync::Arc<AtomicU64>,
}

impl LocalBroadcast {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_origin: std::sync::Arc::new(AtomicU64::new(1)),
        }
    }

    /// A new participant ("tab") on the channel
    pub fn endpoint(&self) -> LocalEndpoint {
        LocalEndpoint {
            origin: self.next_origin.fetch_add(1, Ordering::Relaxed),
            sender: self.sender.clone(),
            receiver: Mutex::new(self.sender.subscribe()),
        }
    }
}

pub struct LocalEndpoint {
    origin: u64,
    sender: broadcast::Sender<NoteUiMessage>,
    receiver: Mutex<broadcast::Receiver<NoteUiMessage>>,
}

impl NoteUiTransport for LocalEndpoint {
    fn publish(&self, minimized: &MinimizedNotes) {
        let message = NoteUiMessage {
            origin: self.origin,
            minimized: minimized.clone(),
        };
        // No other endpoint alive is not an error
        let _ = self.sender.send(message);
    }

    fn poll(&self) -> Option<MinimizedNotes> {
        let mut receiver = self.receiver.lock();
        let mut latest = None;
        loop {
            match receiver.try_recv() {
                Ok(message) if message.origin != self.origin => latest = Some(message.minimized),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    log::debug!("note UI channel lagged by {} messages", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        latest
    }
}
