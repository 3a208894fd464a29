//! App Root Component
//!
//! Routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::pages::{Dashboard, Ticker};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <main class="overlay">
                <Routes>
                    <Route path="/" view=Dashboard />
                    <Route path="/ticker" view=Ticker />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>

            <Status />
        </Router>
    }
}

/// Connection indicator and last update time
#[component]
fn Status() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="status">
            {move || {
                if state.connected.get() {
                    view! { <span class="status-dot connected" title="Connected" /> }
                } else {
                    view! { <span class="status-dot" title="Disconnected" /> }
                }
            }}

            <span class="status-time">
                {move || {
                    state.last_update.get()
                        .and_then(chrono::DateTime::from_timestamp_millis)
                        .map(|dt| format!("Last update: {}", dt.format("%H:%M:%S")))
                        .unwrap_or_default()
                }}
            </span>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <p>"Unknown overlay. Use " <A href="/">"/"</A> " or " <A href="/ticker">"/ticker"</A> "."</p>
        </div>
    }
}
