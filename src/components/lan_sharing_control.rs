//! LAN Sharing Control Component
//!
//! Shows the sharing window and lets the user open, extend or close it.
//! Status is polled on an interval while mounted.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn LanSharingControl() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (busy, set_busy) = signal(false);

    ctx.refresh_lan();
    // Dropped, and so cancelled, together with the component
    let poll = Interval::new(ctx.lan_poll_ms, move || ctx.refresh_lan());
    let _poll = StoredValue::new_local(poll);

    let enable = move |_| {
        set_busy.set(true);
        let lan = ctx.lan();
        spawn_local(async move {
            let _ = lan.enable().await;
            ctx.sync_lan();
            set_busy.set(false);
        });
    };

    let disable = move |_| {
        set_busy.set(true);
        let lan = ctx.lan();
        spawn_local(async move {
            let _ = lan.disable().await;
            ctx.sync_lan();
            set_busy.set(false);
        });
    };

    move || {
        ctx.store.lan_status().get().map(|status| {
            if status.enabled {
                view! {
                    <div class="lan-control">
                        <span class="lan-status">
                            "LAN Active: " <strong>{format!("({}m)", status.remaining_minutes())}</strong>
                        </span>
                        <button class="success-btn" disabled=move || busy.get() on:click=enable>"Reset"</button>
                        <button class="danger-btn" disabled=move || busy.get() on:click=disable>"Disable"</button>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div class="lan-control">
                        <button class="primary-btn" disabled=move || busy.get() on:click=enable>
                            "Share on LAN (15m)"
                        </button>
                    </div>
                }
                .into_any()
            }
        })
    }
}
