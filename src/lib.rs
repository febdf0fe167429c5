//! # library-console
//!
//! Leptos + WASM frontend for the library-management system: login and
//! registration, the admin console (dashboard, catalog, borrow records,
//! users) and the reader console (home, library, borrowing, profile).
//!
//! The load-bearing pieces are the session store (`state::session`), the
//! HTTP wrapper with its auth/error interceptors (`net::http`) and the
//! navigation guard (`router::guard`). Pages and components sit on top and
//! stay thin.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: install logging and mount the application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("library-console starting");
    leptos::mount::mount_to_body(app::App);
}
