//! `localStorage`-backed preference storage.

use content_store::PreferenceStorage;

pub struct BrowserStorage(web_sys::Storage);

impl BrowserStorage {
    /// `None` when storage is disabled (private mode, sandboxed iframes)
    pub fn local() -> Option<Self> {
        web_sys::window()?.local_storage().ok()?.map(Self)
    }
}

impl PreferenceStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        if let Err(e) = self.0.set_item(key, value) {
            log::warn!("Failed to write {} to localStorage: {:?}", key, e);
        }
    }
}
