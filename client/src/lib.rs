//! # client
//!
//! Leptos frontend for the Tião Carreiro e Pardinho song ranking.
//!
//! The crate renders on the server (`ssr`) inside the host binary and
//! hydrates in the browser (`hydrate`). Login state lives in a plain-Rust
//! session (`state::auth`) that components observe through a Leptos
//! context (`util::auth`).

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the console logger and hydrate the
/// server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
