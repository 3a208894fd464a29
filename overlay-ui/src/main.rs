//! jamfeed Overlays
//!
//! Browser-source overlays for a code-jam stream, built with Leptos (WASM).
//!
//! # Pages
//!
//! - `/`: team dashboard (team grid, timezone layout, solo and managers)
//! - `/ticker`: commit notification ticker
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application. Each page opens its own
//! `EventSource`; all decoding, classification and layout come from the
//! `jamfeed` crate.

use leptos::*;

mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
