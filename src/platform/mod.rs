//! Browser Adapters
//!
//! Implementations of the content-store seams on top of web APIs.

mod channel;
mod clipboard;
mod storage;

pub use channel::BroadcastChannelTransport;
pub use clipboard::BrowserClipboard;
pub use storage::BrowserStorage;

/// Origin the page was served from; the API lives on the same host
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
