//! Note Card Component
//!
//! A single note: inline editing, pin/hide toggles, minimize and delete.

use content_store::{ContentKey, ContentType, Note};
use leptos::prelude::*;

use super::ConfirmButton;
use crate::context::AppContext;
use crate::store::{store_is_minimized, AppStateStoreFields};

#[component]
pub fn NoteCard(note: Note, selecting: ReadSignal<bool>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let id = note.id;
    let key = ContentKey::note(id);
    let pinned = note.pinned;
    let hidden = note.hidden;
    let title = note.title.clone();
    let (draft, set_draft) = signal(note.content.clone());
    let note = StoredValue::new(note);

    let is_selected = move || ctx.store.selected().read().contains(&key);
    let minimized = move || store_is_minimized(&ctx.store, id);

    // Send an edited copy; the card re-renders once the server confirms
    let update = move |apply: fn(&mut Note)| {
        let mut updated = note.get_value();
        apply(&mut updated);
        ctx.dispatch(move |content| async move { content.update_note_api(&updated).await });
    };

    let save_body = move |_| {
        let text = draft.get_untracked();
        let mut updated = note.get_value();
        if updated.content == text {
            return;
        }
        updated.content = text;
        ctx.dispatch(move |content| async move { content.update_note_api(&updated).await });
    };

    view! {
        <div class=move || card_class(pinned, hidden, is_selected())>
            <div class="card-header">
                <Show when=move || selecting.get()>
                    <input
                        type="checkbox"
                        class="select-checkbox"
                        prop:checked=is_selected
                        on:change=move |_| ctx.update(|c| c.toggle_select_content(id, ContentType::Note))
                    />
                </Show>
                <h3 class="card-title">{title}</h3>
                <div class="card-actions">
                    <button class="icon-btn" on:click=move |_| ctx.toggle_minimized(id)>
                        {move || if minimized() { "▸" } else { "▾" }}
                    </button>
                    <button class="icon-btn" on:click=move |_| update(|n| n.pinned = !n.pinned)>
                        {if pinned { "Unpin" } else { "Pin" }}
                    </button>
                    <button class="icon-btn" on:click=move |_| update(|n| n.hidden = !n.hidden)>
                        {if hidden { "Unhide" } else { "Hide" }}
                    </button>
                    <ConfirmButton
                        label="×"
                        prompt="Delete?"
                        button_class="delete-btn"
                        on_confirm=Callback::new(move |_| {
                            ctx.dispatch(move |content| async move { content.delete_note_api(id).await })
                        })
                    />
                </div>
            </div>
            <Show when=move || !minimized()>
                <textarea
                    class="card-body"
                    rows="5"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:blur=save_body
                ></textarea>
            </Show>
        </div>
    }
}

pub(crate) fn card_class(pinned: bool, hidden: bool, selected: bool) -> String {
    let mut class = String::from("content-card");
    if pinned {
        class.push_str(" pinned");
    }
    if hidden {
        class.push_str(" hidden-item");
    }
    if selected {
        class.push_str(" selected");
    }
    class
}
