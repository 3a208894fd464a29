//! Commit Ticker
//!
//! Each commit-feed message becomes a card. Cards are shown in arrival order:
//! the card at the head of the queue stays active for the display duration,
//! then fades out and is detached shortly after, and the next card's timer
//! starts. Only one timer chain is ever running.
//!
//! [`Ticker`] is a plain state machine. It never sleeps; it returns
//! [`TickerAction`]s telling the driver (tokio task or browser timers) what
//! to schedule, and the driver calls back into [`Ticker::expire`] and
//! [`Ticker::remove`] when those timers fire.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Push event from a team's repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEvent {
    pub sender: Sender,
    pub team: TeamRef,
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Total commits in the push; `commits` may be truncated
    pub commit_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub author: String,
    pub message: String,
}

impl CommitEvent {
    /// Decode a feed payload
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// `sender - (team)`
    pub fn headline(&self) -> String {
        format!("{} - ({})", self.sender.name, self.team.name)
    }

    /// Commits to show on the card
    pub fn visible_commits(&self, max: usize) -> &[Commit] {
        &self.commits[..self.commits.len().min(max)]
    }

    /// `N new commits...`
    pub fn footer(&self) -> String {
        format!("{} new commits...", self.commit_length)
    }
}

/// Card timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerTimings {
    /// How long the head card stays active
    pub display: Duration,
    /// Fade-out time between deactivation and detaching
    pub exit: Duration,
}

impl Default for TickerTimings {
    fn default() -> Self {
        Self {
            display: Duration::from_millis(7000),
            exit: Duration::from_millis(300),
        }
    }
}

pub type CardId = u64;

/// A card on screen
#[derive(Debug, Clone, PartialEq)]
pub struct CommitCard {
    pub id: CardId,
    pub event: CommitEvent,
    /// Cleared when the card starts fading out
    pub active: bool,
}

/// Something the driver must do after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerAction {
    /// A card arrived while nothing was showing
    PlaySound,
    /// Call [`Ticker::expire`] for `card` after the delay
    ScheduleExpiry { card: CardId, after: Duration },
    /// Call [`Ticker::remove`] for `card` after the delay
    ScheduleRemoval { card: CardId, after: Duration },
}

/// Ticker state: cards on screen plus the expiry queue
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    timings: TickerTimings,
    cards: Vec<CommitCard>,
    queue: VecDeque<CardId>,
    next_id: CardId,
}

impl Ticker {
    pub fn new(timings: TickerTimings) -> Self {
        Self {
            timings,
            ..Default::default()
        }
    }

    pub fn timings(&self) -> TickerTimings {
        self.timings
    }

    /// Cards currently attached, oldest first
    pub fn cards(&self) -> &[CommitCard] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&CommitCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn is_active(&self, id: CardId) -> bool {
        self.card(id).map(|c| c.active).unwrap_or(false)
    }

    /// Cards still waiting to expire, head first
    pub fn queued(&self) -> impl Iterator<Item = CardId> + '_ {
        self.queue.iter().copied()
    }

    /// Add a card for a new event. Starts the timer chain if the queue was
    /// empty; otherwise the card waits its turn.
    pub fn push(&mut self, event: CommitEvent) -> (CardId, Vec<TickerAction>) {
        let id = self.next_id;
        self.next_id += 1;

        self.cards.push(CommitCard {
            id,
            event,
            active: true,
        });

        let was_idle = self.queue.is_empty();
        self.queue.push_back(id);

        let actions = if was_idle {
            let mut actions = vec![TickerAction::PlaySound];
            actions.extend(self.schedule_head());
            actions
        } else {
            Vec::new()
        };

        tracing::debug!(card = id, queued = self.queue.len(), "Commit card added");
        (id, actions)
    }

    /// Display time of `id` is over. Only the queue head can expire; any
    /// other id (stale timer, already expired) is ignored.
    pub fn expire(&mut self, id: CardId) -> Vec<TickerAction> {
        if self.queue.front() != Some(&id) {
            tracing::trace!(card = id, "Ignoring expiry for non-head card");
            return Vec::new();
        }

        self.queue.pop_front();
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
            card.active = false;
        }

        self.schedule_head()
    }

    /// Detach a card. Returns false if it was already gone.
    pub fn remove(&mut self, id: CardId) -> bool {
        match self.cards.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.cards.remove(idx);
                self.queue.retain(|queued| *queued != id);
                true
            }
            None => false,
        }
    }

    /// Drop everything, e.g. on teardown. Pending timers become no-ops.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.queue.clear();
    }

    fn schedule_head(&self) -> Vec<TickerAction> {
        match self.queue.front() {
            Some(&card) => vec![
                TickerAction::ScheduleExpiry {
                    card,
                    after: self.timings.display,
                },
                TickerAction::ScheduleRemoval {
                    card,
                    after: self.timings.display + self.timings.exit,
                },
            ],
            None => Vec::new(),
        }
    }
}
