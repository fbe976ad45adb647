//! Jotter Frontend Entry Point

mod app;
mod components;
mod context;
mod platform;
mod store;

use app::App;
use leptos::prelude::*;

const LOG_CAPACITY: usize = 500;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("Jotter", LOG_CAPACITY) {
        web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
    }
    mount_to_body(App);
}
