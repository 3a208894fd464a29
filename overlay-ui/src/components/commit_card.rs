//! Commit Card Component
//!
//! One push notification in the ticker.

use leptos::*;

use jamfeed::ticker::CommitCard as Card;

/// Commit card; fades out once no longer active
#[component]
pub fn CommitCard(card: Card, max_commits: usize) -> impl IntoView {
    let class = if card.active {
        "commit-card"
    } else {
        "commit-card leaving"
    };
    let event = card.event;

    let commits = event
        .visible_commits(max_commits)
        .iter()
        .map(|commit| {
            view! {
                <li class="commit">
                    <span class="commit-author">{commit.author.clone()}</span>
                    " - "
                    <span class="commit-message">{commit.message.clone()}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class=class>
            <div class="commit-header">
                <img class="avatar" src=event.sender.avatar.clone() alt=event.sender.name.clone() />
                <span class="commit-headline">{event.headline()}</span>
            </div>
            <ul class="commit-list">{commits}</ul>
            <div class="commit-footer">{event.footer()}</div>
        </div>
    }
}
