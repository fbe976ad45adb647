//! Add Content Form Component
//!
//! Creates a note or a checklist.

use content_store::ContentType;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

const CONTENT_TYPES: &[(ContentType, &str)] = &[
    (ContentType::Note, "Note"),
    (ContentType::Checklist, "Checklist"),
];

#[component]
pub fn AddContentForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let (title, set_title) = signal(String::new());
    let (body, set_body) = signal(String::new());
    let (kind, set_kind) = signal(ContentType::Note);
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() {
            set_form_error.set(Some("Title cannot be empty.".to_string()));
            return;
        }
        set_form_error.set(None);
        let selected = kind.get();
        let note_body = body.get();
        let content = ctx.content();

        spawn_local(async move {
            let result = match selected {
                ContentType::Note => content.add_note_api(&text, &note_body).await,
                ContentType::Checklist => content.add_checklist_api(&text).await,
            };
            ctx.sync();
            if result.is_ok() {
                set_title.set(String::new());
                set_body.set(String::new());
            }
        });
    };

    view! {
        <form class="add-content-form" on:submit=submit>
            {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            <div class="type-selector-row">
                {CONTENT_TYPES.iter().map(|(value, label)| {
                    let value = *value;
                    view! {
                        <button
                            type="button"
                            class=move || if kind.get() == value { "type-btn active" } else { "type-btn" }
                            on:click=move |_| set_kind.set(value)
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </div>

            <input
                type="text"
                autocomplete="off"
                placeholder=move || format!("Enter {} title", kind.get())
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />

            <Show when=move || kind.get() == ContentType::Note>
                <textarea
                    rows="4"
                    placeholder="Write something..."
                    prop:value=move || body.get()
                    on:input=move |ev| set_body.set(event_target_value(&ev))
                ></textarea>
            </Show>

            <button type="submit" disabled=move || ctx.store.loading().get()>"Add"</button>
        </form>
    }
}
