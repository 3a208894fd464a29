//! Dashboard Page
//!
//! Team roster overlay. Every feed message is a full snapshot and replaces
//! the previous render.

use leptos::*;
use leptos_router::use_query_map;
use std::rc::Rc;

use jamfeed::roster::{Dashboard as RosterDashboard, Roster};

use crate::components::{watch_images, MemberList, StatsBar, TeamGrid, TimezoneLayout};
use crate::state::global::{DashboardSnapshot, GlobalState};
use crate::state::FeedSource;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // `?feed=` overrides the configured stream
    let url = use_query_map()
        .with_untracked(|q| q.get("feed").cloned())
        .unwrap_or_else(|| state.settings.dashboard_url.clone());

    let feed = FeedSource::new(&url);
    let state_for_feed = state.clone();
    feed.connect(
        state.connected,
        Rc::new(move |payload: String| handle_snapshot(&state_for_feed, &payload)),
    );
    on_cleanup(move || feed.close());

    // Each new pass gets its own image gate, started once it has mounted
    let state_for_gate = state.clone();
    create_effect(move |_| {
        let _ = state_for_gate.generation.get();
        if let Some(snapshot) = state_for_gate.snapshot.get_untracked() {
            watch_images(&state_for_gate, &snapshot);
        }
    });

    view! {
        <div class="dashboard">
            {move || match state.snapshot.get() {
                Some(snapshot) => view! {
                    <StatsBar stats=snapshot.stats />
                    <TeamGrid teams=snapshot.teams />
                    <h2>"Looking for group"</h2>
                    <TimezoneLayout members=snapshot.unassigned height=snapshot.layout_height />
                    <MemberList title="Solo" members=snapshot.solo />
                    <MemberList title="Managers" members=snapshot.managers />
                }.into_view(),
                None => view! {
                    <p class="waiting">"Waiting for roster..."</p>
                }.into_view(),
            }}
        </div>
    }
}

/// Decode and lay out one snapshot. A bad payload is logged and the current
/// render stays.
fn handle_snapshot(state: &GlobalState, payload: &str) {
    let metrics = state.settings.metrics;

    let result = Roster::parse(payload).and_then(|roster| {
        RosterDashboard::build(&roster, &metrics)
            .map(|dashboard| DashboardSnapshot::from_dashboard(&dashboard, &metrics))
    });

    match result {
        Ok(snapshot) => state.show_snapshot(snapshot),
        Err(e) => {
            web_sys::console::error_1(&format!("Skipping roster snapshot: {}", e).into());
        }
    }
}
