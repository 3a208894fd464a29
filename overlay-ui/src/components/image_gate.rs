//! Avatar Fade-In
//!
//! Member cards mount hidden. One gate per render pass polls their avatars
//! and reveals each card once its image has loaded.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use jamfeed::overlay::PendingImages;

use crate::state::global::{DashboardSnapshot, GlobalState};

/// Start polling the widgets of `snapshot`. Stops once every avatar has
/// loaded or a newer pass replaces this one.
pub fn watch_images(state: &GlobalState, snapshot: &DashboardSnapshot) {
    let mut gate = PendingImages::new();
    for widget in snapshot.widgets() {
        gate.watch(widget.dom_id.clone());
    }

    let generation = state.generation.get_untracked();
    let generation_signal = state.generation;
    let interval = state.settings.image_poll_ms;

    spawn_local(async move {
        while !gate.is_settled() {
            TimeoutFuture::new(interval).await;

            if generation_signal.get_untracked() != generation {
                return;
            }

            for dom_id in gate.poll(|id| avatar_loaded(id)) {
                reveal(&dom_id);
            }
        }
    });
}

fn avatar_loaded(dom_id: &str) -> bool {
    document()
        .get_element_by_id(&format!("{}-avatar", dom_id))
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        .map(|img| img.complete())
        .unwrap_or(false)
}

fn reveal(dom_id: &str) {
    if let Some(el) = document().get_element_by_id(dom_id) {
        let _ = el.class_list().add_1("loaded");
    }
}
