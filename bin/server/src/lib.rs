//! spec-atlas web server and UI.
//!
//! This crate provides the Leptos-based chat interface that sits next to
//! the 3GPP knowledge graph, and the axum server that proxies questions to
//! the answering backend.

#![allow(non_snake_case)]

pub mod app;
pub mod error;
pub mod pages;
pub mod surface;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod server_helpers;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
