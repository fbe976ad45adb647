//! Notification List Component
//!
//! Toasts; each one disappears on its own after the configured TTL.

use content_store::NotificationKind;
use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn NotificationList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class="notification-list">
            <For
                each=move || ctx.store.notifications().get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=format!("notification {}", kind_class(n.kind))>
                            <span>{n.message}</span>
                            <button class="close-btn" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "success",
        NotificationKind::Warning => "warning",
        NotificationKind::Error => "error",
    }
}
