//! Application Context
//!
//! Shared handles provided via Leptos Context API. The content-store types
//! carry `?Send` trait objects (browser fetch, clipboard), so they live in
//! local `StoredValue`s and are only touched from the UI thread.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use content_store::api::{ContentApi, HttpContentApi};
use content_store::store::run_with_sync;
use content_store::{
    ClientConfig, ConfigError, ContentStore, LanSharing, NoteUiStore,
    NotificationCenter, NotificationKind, NOTE_UI_STORAGE_KEY,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::platform::{BroadcastChannelTransport, BrowserClipboard, BrowserStorage};
use crate::store::{
    store_set_lan_status, store_set_minimized, store_set_notifications, store_sync_content,
    AppStore,
};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    content: StoredValue<ContentStore, LocalStorage>,
    lan: StoredValue<LanSharing, LocalStorage>,
    note_ui: StoredValue<NoteUiStore, LocalStorage>,
    notifications: StoredValue<NotificationCenter, LocalStorage>,
    /// LAN status poll period in ms
    pub lan_poll_ms: u32,
}

impl AppContext {
    pub fn new(store: AppStore, config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let api: Arc<dyn ContentApi> = Arc::new(HttpContentApi::new(config)?);

        let content = ContentStore::new(api.clone()).with_clipboard(Arc::new(BrowserClipboard));
        let notifications = NotificationCenter::new(config.notification_ttl());
        let lan = LanSharing::new(api, notifications.clone());

        let mut note_ui = NoteUiStore::new();
        if let Some(storage) = BrowserStorage::local() {
            note_ui = note_ui.with_storage(Box::new(storage));
        }
        store_set_minimized(&store, note_ui.minimized().clone());

        let ctx = Self {
            store,
            content: StoredValue::new_local(content),
            lan: StoredValue::new_local(lan),
            note_ui: StoredValue::new_local(note_ui),
            notifications: StoredValue::new_local(notifications),
            lan_poll_ms: config.lan_poll_interval().as_millis().min(u32::MAX as u128) as u32,
        };
        ctx.connect_note_ui();
        Ok(ctx)
    }

    fn connect_note_ui(&self) {
        let note_ui = self.note_ui;
        let store = self.store;
        let transport = BroadcastChannelTransport::open(NOTE_UI_STORAGE_KEY, move |minimized| {
            note_ui.update_value(|ui| ui.apply_remote(minimized.clone()));
            store_set_minimized(&store, minimized);
        });
        match transport {
            Ok(transport) => self
                .note_ui
                .update_value(|ui| ui.set_transport(Box::new(transport))),
            Err(e) => log::warn!("BroadcastChannel unavailable, note UI stays tab-local: {:?}", e),
        }
    }

    // ========================
    // Content
    // ========================

    pub fn content(&self) -> ContentStore {
        self.content.get_value()
    }

    /// Mirror the content cache into the reactive store
    pub fn sync(&self) {
        let store = self.store;
        self.content.with_value(|content| store_sync_content(&store, content));
    }

    /// Run a content operation in the background, syncing once it has
    /// started (so `loading` shows) and again when it completes.
    ///
    /// Failures are already recorded in the cache's `error`, so the result
    /// is dropped here.
    pub fn dispatch<F, Fut, R>(&self, op: F)
    where
        F: FnOnce(ContentStore) -> Fut + 'static,
        Fut: Future<Output = R> + 'static,
    {
        let ctx = *self;
        let content = self.content();
        spawn_local(async move {
            let _ = run_with_sync(op(content), || ctx.sync()).await;
        });
    }

    /// Local-only change (selection and the like); no request
    pub fn update(&self, f: impl FnOnce(&ContentStore)) {
        self.content.with_value(f);
        self.sync();
    }

    // ========================
    // Note UI
    // ========================

    pub fn toggle_minimized(&self, note_id: i64) {
        let minimized = self.note_ui.try_update_value(|ui| {
            ui.toggle(note_id);
            ui.minimized().clone()
        });
        if let Some(minimized) = minimized {
            store_set_minimized(&self.store, minimized);
        }
    }

    // ========================
    // Notifications
    // ========================

    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.with_value(|center| {
            center.add(message, kind);
        });
        self.sync_notifications();
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.with_value(|center| {
            center.remove(id);
        });
        self.sync_notifications();
    }

    /// Publishes the current list and schedules its expiry
    fn sync_notifications(&self) {
        let ctx = *self;
        let (list, ttl) = self
            .notifications
            .with_value(|center| (center.notifications(), center.ttl()));
        store_set_notifications(&self.store, list);

        let ttl_ms = ttl.as_millis().min(u32::MAX as u128) as u32;
        spawn_local(async move {
            TimeoutFuture::new(ttl_ms).await;
            let remaining = ctx.notifications.with_value(|center| {
                center.prune_expired(Utc::now());
                center.notifications()
            });
            store_set_notifications(&ctx.store, remaining);
        });
    }

    // ========================
    // LAN Sharing
    // ========================

    pub fn refresh_lan(&self) {
        let ctx = *self;
        let lan = self.lan.get_value();
        spawn_local(async move {
            let _ = lan.refresh_status().await;
            store_set_lan_status(&ctx.store, lan.status());
        });
    }

    pub fn lan(&self) -> LanSharing {
        self.lan.get_value()
    }

    /// Mirror LAN status and whatever notifications the last action raised
    pub fn sync_lan(&self) {
        store_set_lan_status(&self.store, self.lan.with_value(LanSharing::status));
        self.sync_notifications();
    }
}
