//! Commit feed handler and ticker driver
//!
//! The handler only decodes messages and forwards them. The driver owns the
//! [`Ticker`] and is its single writer: feed events and timer expiries all
//! arrive as [`TickerCommand`]s on one channel and are applied in order.

use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

use super::sse::SseEvent;
use super::{FeedError, FeedHandler};
use crate::render::render_card;
use crate::ticker::{CardId, CommitEvent, Ticker, TickerAction, TickerTimings};

/// Input to the ticker driver
#[derive(Debug)]
pub enum TickerCommand {
    Push(CommitEvent),
    Expire(CardId),
    Remove(CardId),
    Shutdown,
}

/// Cloneable sender side of a driver
#[derive(Debug, Clone)]
pub struct TickerHandle {
    tx: mpsc::UnboundedSender<TickerCommand>,
}

impl TickerHandle {
    pub fn push(&self, event: CommitEvent) -> Result<(), FeedError> {
        self.tx
            .send(TickerCommand::Push(event))
            .map_err(|_| FeedError::Closed)
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(TickerCommand::Shutdown);
    }
}

/// Owns the ticker and prints cards as they arrive
pub struct TickerDriver<W> {
    ticker: Ticker,
    max_commits: usize,
    out: W,
    tx: mpsc::UnboundedSender<TickerCommand>,
    rx: mpsc::UnboundedReceiver<TickerCommand>,
}

impl<W: Write + Send + 'static> TickerDriver<W> {
    pub fn new(timings: TickerTimings, max_commits: usize, out: W) -> (TickerHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = TickerHandle { tx: tx.clone() };

        let driver = Self {
            ticker: Ticker::new(timings),
            max_commits,
            out,
            tx,
            rx,
        };

        (handle, driver)
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Apply commands until [`TickerCommand::Shutdown`]. Returns the driver
    /// so its final state can be inspected.
    pub async fn run(mut self) -> Self {
        while let Some(command) = self.rx.recv().await {
            if matches!(command, TickerCommand::Shutdown) {
                break;
            }
            if let Err(e) = self.apply(command) {
                tracing::warn!(error = %e, "Ticker output failed");
            }
        }

        self.ticker.clear();
        self
    }

    fn apply(&mut self, command: TickerCommand) -> Result<(), FeedError> {
        match command {
            TickerCommand::Push(event) => {
                let (id, actions) = self.ticker.push(event);
                if let Some(card) = self.ticker.card(id) {
                    self.out
                        .write_all(render_card(card, self.max_commits).as_bytes())?;
                }
                self.perform(actions)?;
            }
            TickerCommand::Expire(id) => {
                let actions = self.ticker.expire(id);
                self.perform(actions)?;
            }
            TickerCommand::Remove(id) => {
                if self.ticker.remove(id) {
                    tracing::debug!(card = id, "Commit card removed");
                }
            }
            TickerCommand::Shutdown => {}
        }

        self.out.flush()?;
        Ok(())
    }

    fn perform(&mut self, actions: Vec<TickerAction>) -> Result<(), FeedError> {
        for action in actions {
            match action {
                // Terminal bell
                TickerAction::PlaySound => self.out.write_all(b"\x07")?,
                TickerAction::ScheduleExpiry { card, after } => {
                    self.schedule(after, TickerCommand::Expire(card))
                }
                TickerAction::ScheduleRemoval { card, after } => {
                    self.schedule(after, TickerCommand::Remove(card))
                }
            }
        }
        Ok(())
    }

    fn schedule(&self, after: Duration, command: TickerCommand) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // Driver gone: nothing left to update
            let _ = tx.send(command);
        });
    }
}

/// Forwards decoded commit events to a driver
pub struct TickerHandler {
    handle: TickerHandle,
}

impl TickerHandler {
    pub fn new(handle: TickerHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl FeedHandler for TickerHandler {
    fn name(&self) -> &str {
        "ticker"
    }

    async fn on_event(&mut self, event: SseEvent) -> Result<(), FeedError> {
        let commit = CommitEvent::parse(&event.data).map_err(FeedError::Commit)?;
        tracing::info!(
            team = %commit.team.name,
            sender = %commit.sender.name,
            commits = commit.commit_length,
            "Commit pushed"
        );
        self.handle.push(commit)
    }
}
