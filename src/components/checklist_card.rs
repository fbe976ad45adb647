//! Checklist Card Component
//!
//! A checklist with its items. Item edits go straight to the item
//! endpoints; title, pin and hide go through the checklist update.

use content_store::api::ChecklistItemPatch;
use content_store::{Checklist, ChecklistItem, ContentKey, ContentType};
use leptos::prelude::*;

use super::note_card::card_class;
use super::ConfirmButton;
use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn ChecklistCard(checklist: Checklist, selecting: ReadSignal<bool>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let id = checklist.id;
    let key = ContentKey::checklist(id);
    let pinned = checklist.pinned;
    let hidden = checklist.hidden;
    let title = checklist.title.clone();
    let items = checklist.items.clone();
    let done = items.iter().filter(|i| i.checked).count();
    let total = items.len();
    let checklist = StoredValue::new(checklist);

    let (new_item, set_new_item) = signal(String::new());

    let is_selected = move || ctx.store.selected().read().contains(&key);

    let update = move |apply: fn(&mut Checklist)| {
        let mut updated = checklist.get_value();
        apply(&mut updated);
        ctx.dispatch(move |content| async move { content.update_checklist_api(&updated).await });
    };

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_item.get();
        if text.trim().is_empty() {
            return;
        }
        set_new_item.set(String::new());
        ctx.dispatch(move |content| async move { content.add_checklist_item_api(id, &text).await });
    };

    view! {
        <div class=move || card_class(pinned, hidden, is_selected())>
            <div class="card-header">
                <Show when=move || selecting.get()>
                    <input
                        type="checkbox"
                        class="select-checkbox"
                        prop:checked=is_selected
                        on:change=move |_| ctx.update(|c| c.toggle_select_content(id, ContentType::Checklist))
                    />
                </Show>
                <h3 class="card-title">{title}</h3>
                <span class="item-count">{format!("{}/{}", done, total)}</span>
                <div class="card-actions">
                    <button class="icon-btn" on:click=move |_| update(|c| c.pinned = !c.pinned)>
                        {if pinned { "Unpin" } else { "Pin" }}
                    </button>
                    <button class="icon-btn" on:click=move |_| update(|c| c.hidden = !c.hidden)>
                        {if hidden { "Unhide" } else { "Hide" }}
                    </button>
                    <ConfirmButton
                        label="×"
                        prompt="Delete?"
                        button_class="delete-btn"
                        on_confirm=Callback::new(move |_| {
                            ctx.dispatch(move |content| async move { content.delete_checklist_api(id).await })
                        })
                    />
                </div>
            </div>

            <ul class="checklist-items">
                {items.into_iter().map(|item| view! { <ChecklistRow checklist_id=id item=item /> }).collect_view()}
            </ul>

            <form class="add-item-form" on:submit=add_item>
                <input
                    type="text"
                    placeholder="Add item..."
                    prop:value=move || new_item.get()
                    on:input=move |ev| set_new_item.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
        </div>
    }
}

#[component]
fn ChecklistRow(checklist_id: i64, item: ChecklistItem) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let item_id = item.id;
    let checked = item.checked;
    let original = item.content.clone();
    let (text, set_text) = signal(item.content);

    let toggle = move |_| {
        let patch = ChecklistItemPatch::checked(!checked);
        ctx.dispatch(move |content| async move {
            content.update_checklist_item_api(checklist_id, item_id, &patch).await
        });
    };

    let rename = move |_| {
        let value = text.get_untracked();
        if value == original || value.trim().is_empty() {
            return;
        }
        let patch = ChecklistItemPatch::content(value);
        ctx.dispatch(move |content| async move {
            content.update_checklist_item_api(checklist_id, item_id, &patch).await
        });
    };

    view! {
        <li class=if checked { "checklist-item checked" } else { "checklist-item" }>
            <input type="checkbox" checked=checked on:change=toggle />
            <input
                type="text"
                class="item-text"
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
                on:blur=rename
            />
            <button
                class="item-delete-btn"
                on:click=move |_| {
                    ctx.dispatch(move |content| async move {
                        content.delete_checklist_item_api(checklist_id, item_id).await
                    })
                }
            >
                "×"
            </button>
        </li>
    }
}
