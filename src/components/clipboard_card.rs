//! Clipboard Card Component
//!
//! The shared clipboard note. Its content is only ever replaced by pasting
//! from the system clipboard.

use content_store::{Note, NotificationKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

#[component]
pub fn ClipboardCard(note: Note) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (pasting, set_pasting) = signal(false);

    let paste = move |_| {
        set_pasting.set(true);
        let content = ctx.content();
        spawn_local(async move {
            let result = content.paste_to_clipboard_note_api().await;
            set_pasting.set(false);
            match result {
                Ok(()) => ctx.notify("Pasted from clipboard", NotificationKind::Success),
                Err(e) => log::warn!("Paste failed: {}", e),
            }
            ctx.sync();
        });
    };

    view! {
        <div class="content-card clipboard-note">
            <div class="card-header">
                <h3 class="card-title">{note.title.clone()}</h3>
                <div class="card-actions">
                    <button class="primary-btn" disabled=move || pasting.get() on:click=paste>
                        {move || if pasting.get() { "Pasting..." } else { "Paste" }}
                    </button>
                </div>
            </div>
            <pre class="card-body clipboard-body">{note.content}</pre>
        </div>
    }
}
