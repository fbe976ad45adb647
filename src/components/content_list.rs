//! Content List Component
//!
//! The main view: clipboard note, pinned and other items, unlocked hidden
//! items, plus the multi-select toolbar.

use content_store::{Content, ContentKey};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{ChecklistCard, ClipboardCard, ConfirmButton, NoteCard, PinForm};
use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn ContentList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (selecting, set_selecting) = signal(false);

    let selected_count = move || ctx.store.selected().read().len();

    let toggle_selecting = move |_| {
        if selecting.get() {
            ctx.update(|content| content.clear_selected_content());
        }
        set_selecting.update(|s| *s = !*s);
    };

    let delete_selected = Callback::new(move |_| {
        let content = ctx.content();
        spawn_local(async move {
            let deleted = content.delete_selected_content_api().await.is_ok();
            ctx.sync();
            if deleted {
                set_selecting.set(false);
            }
        });
    });

    let clipboard = Memo::new(move |_| ctx.store.arranged().read().clipboard.clone());
    let pinned = Signal::derive(move || ctx.store.arranged().read().pinned.clone());
    let others = Signal::derive(move || ctx.store.arranged().read().others.clone());
    let hidden = Signal::derive(move || ctx.store.arranged().read().hidden.clone());

    view! {
        <section class="content-list">
            <div class="list-toolbar">
                <Show when=move || { selecting.get() && selected_count() > 0 }>
                    {move || {
                        let n = selected_count();
                        view! {
                            <ConfirmButton
                                label=format!("Delete ({})", n)
                                prompt=format!("Delete {} items?", n)
                                button_class="danger-btn"
                                on_confirm=delete_selected
                            />
                        }
                    }}
                </Show>
                <button class="secondary-btn" on:click=toggle_selecting>
                    {move || if selecting.get() { "Cancel" } else { "Select" }}
                </button>
                <PinForm />
            </div>

            {move || clipboard.get().map(|note| view! { <ClipboardCard note=note /> })}

            <ContentSection title="Pinned" items=pinned selecting=selecting />
            <ContentSection title="Notes" items=others selecting=selecting />
            <ContentSection title="Hidden" items=hidden selecting=selecting />

            <Show when=move || ctx.store.arranged().read().is_empty() && !ctx.store.loading().get()>
                <p class="empty-state">"Nothing here yet."</p>
            </Show>
        </section>
    }
}

#[component]
fn ContentSection(
    #[prop(into)] title: String,
    items: Signal<Vec<Content>>,
    selecting: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <Show when=move || items.with(|items| !items.is_empty())>
            <h2 class="section-title">{title.clone()}</h2>
            <div class="card-grid">
                <For
                    each=move || items.get()
                    key=render_key
                    children=move |item| render_content(item, selecting)
                />
            </div>
        </Show>
    }
}

/// Re-render a card whenever the server hands back a newer copy
fn render_key(item: &Content) -> (ContentKey, i64, bool, bool) {
    (
        item.key(),
        item.updated_at().timestamp_millis(),
        item.pinned(),
        item.hidden(),
    )
}

fn render_content(item: Content, selecting: ReadSignal<bool>) -> AnyView {
    match item {
        Content::Note(note) => view! { <NoteCard note=note selecting=selecting /> }.into_any(),
        Content::Checklist(checklist) => {
            view! { <ChecklistCard checklist=checklist selecting=selecting /> }.into_any()
        }
    }
}
