//! Ticker Page
//!
//! Commit notification overlay. Cards queue up and show one at a time;
//! browser timers drive the shared ticker state machine.

use gloo_timers::callback::Timeout;
use leptos::*;
use leptos_router::use_query_map;
use std::rc::Rc;
use web_sys::HtmlAudioElement;

use jamfeed::ticker::{CommitEvent, Ticker as TickerState, TickerAction};

use crate::components::CommitCard;
use crate::state::global::GlobalState;
use crate::state::FeedSource;

const NOTIFICATION_SOUND: &str = "notif.mp3";

/// Ticker page component
#[component]
pub fn Ticker() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let ticker = state.ticker;
    let max_commits = state.settings.max_commits;

    let url = use_query_map()
        .with_untracked(|q| q.get("feed").cloned())
        .unwrap_or_else(|| state.settings.ticker_url.clone());

    let feed = FeedSource::new(&url);
    let state_for_feed = state.clone();
    feed.connect(
        state.connected,
        Rc::new(move |payload: String| handle_commit(&state_for_feed, &payload)),
    );
    on_cleanup(move || {
        feed.close();
        // Timers still pending find nothing to act on
        ticker.update(|t| t.clear());
    });

    view! {
        <div class="ticker">
            <For
                each=move || ticker.with(|t| t.cards().to_vec())
                key=|card| (card.id, card.active)
                children=move |card| view! { <CommitCard card=card max_commits=max_commits /> }
            />
        </div>
    }
}

fn handle_commit(state: &GlobalState, payload: &str) {
    match CommitEvent::parse(payload) {
        Ok(event) => {
            state.touch();
            if let Some((_, actions)) = state.ticker.try_update(|t| t.push(event)) {
                perform(state.ticker, actions);
            }
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Skipping commit payload: {}", e).into());
        }
    }
}

/// Carry out what the state machine asked for
fn perform(ticker: RwSignal<TickerState>, actions: Vec<TickerAction>) {
    for action in actions {
        match action {
            TickerAction::PlaySound => play_sound(),
            TickerAction::ScheduleExpiry { card, after } => {
                Timeout::new(millis(after), move || {
                    if let Some(next) = ticker.try_update(|t| t.expire(card)) {
                        perform(ticker, next);
                    }
                })
                .forget();
            }
            TickerAction::ScheduleRemoval { card, after } => {
                Timeout::new(millis(after), move || {
                    ticker.update(|t| {
                        t.remove(card);
                    });
                })
                .forget();
            }
        }
    }
}

fn millis(duration: std::time::Duration) -> u32 {
    duration.as_millis().min(u32::MAX as u128) as u32
}

fn play_sound() {
    match HtmlAudioElement::new_with_src(NOTIFICATION_SOUND) {
        // Autoplay may be blocked; the card still shows
        Ok(audio) => {
            let _ = audio.play();
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("Notification sound unavailable: {:?}", e).into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamfeed::ticker::TickerTimings;

    #[test]
    fn test_millis_conversion() {
        let timings = TickerTimings::default();
        assert_eq!(millis(timings.display), 7000);
        assert_eq!(millis(timings.display + timings.exit), 7300);
    }
}
