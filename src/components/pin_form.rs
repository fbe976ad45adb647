//! PIN Form Component
//!
//! Unlocks hidden content, or re-locks it once shown.

use content_store::{validate_pin, LockState, PIN_LENGTH};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn PinForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let (pin, set_pin) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let lock_state = move || ctx.store.lock_state().get();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = pin.get();
        set_pin.set(String::new());
        if let Err(e) = validate_pin(&value) {
            set_form_error.set(Some(e.to_string()));
            return;
        }
        set_form_error.set(None);

        let content = ctx.content();
        spawn_local(async move {
            let unlocked = content.submit_pin_api(&value).await.is_ok();
            ctx.sync();
            if unlocked {
                let _ = content.fetch_hidden_content_api().await;
                ctx.sync();
            }
        });
    };

    let relock = move |_| {
        ctx.dispatch(|content| async move { content.hide_hidden_content().await });
    };

    view! {
        <Show
            when=move || lock_state() == LockState::Unlocked
            fallback=move || view! {
                <form class="pin-form" on:submit=submit>
                    {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                    <input
                        type="password"
                        inputmode="text"
                        autocomplete="off"
                        maxlength=PIN_LENGTH.to_string()
                        placeholder="PIN"
                        prop:value=move || pin.get()
                        on:input=move |ev| set_pin.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || lock_state() == LockState::Unlocking>
                        "Show hidden"
                    </button>
                </form>
            }
        >
            <button class="secondary-btn" on:click=relock>"Hide hidden"</button>
        </Show>
    }
}
