//! Jotter Frontend App
//!
//! Wires the context, loads content on mount and lays out the page.

use content_store::ClientConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{AddContentForm, ContentList, LanSharingControl, NotificationList};
use crate::context::AppContext;
use crate::platform::page_origin;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());

    let origin = page_origin().unwrap_or_else(|| "http://localhost:3000".to_string());
    let config = ClientConfig::new(origin);

    let ctx = match AppContext::new(store, &config) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Client setup failed: {}", e);
            return view! { <p class="fatal-error">{format!("Client setup failed: {}", e)}</p> }
                .into_any();
        }
    };
    provide_context(ctx);

    // Initial load; the clipboard note arrives with the regular list
    let content = ctx.content();
    spawn_local(async move {
        let _ = content.fetch_content_api().await;
        ctx.sync();
        // A session from an earlier visit may still be valid
        if let Ok(true) = content.check_auth_status_api().await {
            let _ = content.fetch_hidden_content_api().await;
        }
        ctx.sync();
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Jotter"</h1>
                <LanSharingControl />
            </header>

            <main class="main-content">
                {move || store.error().get().map(|msg| view! {
                    <div class="error-banner">
                        <span>{msg}</span>
                        <button class="close-btn" on:click=move |_| ctx.update(|c| c.set_error(None))>"×"</button>
                    </div>
                })}
                <Show when=move || store.loading().get()>
                    <div class="loading-spinner">"Loading..."</div>
                </Show>

                <AddContentForm />
                <ContentList />
            </main>

            <NotificationList />
        </div>
    }
    .into_any()
}
