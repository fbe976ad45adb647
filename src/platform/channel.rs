//! Cross-tab note UI sync over a `BroadcastChannel`.
//!
//! Messages are the JSON form of `NoteUiSnapshot`. A channel never delivers
//! to the tab that posted, so no origin tagging is needed.

use content_store::{MinimizedNotes, NoteUiSnapshot, NoteUiTransport};
use wasm_bindgen::prelude::*;
use web_sys::{BroadcastChannel, MessageEvent};

pub struct BroadcastChannelTransport {
    channel: BroadcastChannel,
    // Dropping the closure would detach the handler
    _on_message: Closure<dyn FnMut(MessageEvent)>,
}

impl BroadcastChannelTransport {
    pub fn open(name: &str, on_remote: impl Fn(MinimizedNotes) + 'static) -> Result<Self, JsValue> {
        let channel = BroadcastChannel::new(name)?;

        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(raw) = event.data().as_string() else {
                log::warn!("Ignoring non-text note UI message");
                return;
            };
            match serde_json::from_str::<NoteUiSnapshot>(&raw) {
                Ok(snapshot) => on_remote(snapshot.minimized_notes),
                Err(e) => log::warn!("Ignoring malformed note UI message: {}", e),
            }
        });
        channel.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        Ok(Self {
            channel,
            _on_message: on_message,
        })
    }
}

impl NoteUiTransport for BroadcastChannelTransport {
    fn publish(&self, minimized: &MinimizedNotes) {
        let snapshot = NoteUiSnapshot {
            minimized_notes: minimized.clone(),
        };
        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to encode note UI message: {}", e);
                return;
            }
        };
        if let Err(e) = self.channel.post_message(&JsValue::from_str(&raw)) {
            log::warn!("Failed to post note UI message: {:?}", e);
        }
    }
}

impl Drop for BroadcastChannelTransport {
    fn drop(&mut self) {
        self.channel.set_onmessage(None);
        self.channel.close();
    }
}
