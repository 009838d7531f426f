//! # natter
//!
//! A Leptos + WASM chat client: login and registration, a sidebar with the
//! signed-in user's chats and a creation menu, and a live chat window backed
//! by a reconnecting websocket channel that merges fetched history with live
//! broadcasts.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs panic and log hooks, then hydrates the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
