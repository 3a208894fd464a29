//! Roster feed handler
//!
//! Every message is a complete roster; it is decoded, classified, laid out
//! and rendered from scratch. A bad message is reported to the caller and
//! the previous render stays on screen.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::Write;

use super::sse::SseEvent;
use super::{FeedError, FeedHandler};
use crate::render::render_dashboard;
use crate::roster::{Dashboard, LayoutMetrics, Roster, RosterStats};

/// Renders each roster snapshot to a writer
pub struct DashboardHandler<W> {
    metrics: LayoutMetrics,
    out: W,
    last_stats: Option<RosterStats>,
    updated_at: Option<DateTime<Utc>>,
    rendered: u64,
}

impl<W: Write + Send> DashboardHandler<W> {
    pub fn new(metrics: LayoutMetrics, out: W) -> Self {
        Self {
            metrics,
            out,
            last_stats: None,
            updated_at: None,
            rendered: 0,
        }
    }

    /// Stats of the last snapshot that rendered
    pub fn last_stats(&self) -> Option<RosterStats> {
        self.last_stats
    }

    /// When the last snapshot rendered
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Snapshots rendered so far
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, payload: &str) -> Result<RosterStats, FeedError> {
        let roster = Roster::parse(payload)?;
        let dashboard = Dashboard::build(&roster, &self.metrics)?;

        let now = Utc::now();
        self.out.write_all(render_dashboard(&dashboard).as_bytes())?;
        writeln!(self.out, "Last update: {}\n", now.format("%H:%M:%S UTC"))?;
        self.out.flush()?;
        self.updated_at = Some(now);

        Ok(dashboard.stats)
    }
}

#[async_trait]
impl<W: Write + Send> FeedHandler for DashboardHandler<W> {
    fn name(&self) -> &str {
        "dashboard"
    }

    async fn on_event(&mut self, event: SseEvent) -> Result<(), FeedError> {
        let stats = self.render(&event.data)?;

        if self.last_stats != Some(stats) {
            tracing::info!(
                total = stats.total_count(),
                teams = stats.team_count,
                lfg = stats.lfg_count,
                solo = stats.solo_count,
                "Roster updated"
            );
        }

        self.last_stats = Some(stats);
        self.rendered += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_renders_snapshot() {
        let mut handler = DashboardHandler::new(LayoutMetrics::default(), Vec::new());

        handler
            .on_event(SseEvent::message(
                r#"{"None":[{"name":"A","timezone":-5}],"CodeJam Managers":[{"name":"B","timezone":0}]}"#,
            ))
            .await
            .unwrap();

        let stats = handler.last_stats().unwrap();
        assert_eq!(stats.lfg_count, 1);
        assert_eq!(stats.total_count(), 1);
        assert_eq!(handler.rendered(), 1);
        assert!(handler.updated_at().is_some());

        let output = String::from_utf8(handler.into_inner()).unwrap();
        assert!(output.contains("A [UTC-5]"));
        assert!(output.contains("B [UTC0]"));
        assert!(output.contains("Last update: "));
    }

    #[tokio::test]
    async fn test_bad_snapshot_keeps_previous() {
        let mut handler = DashboardHandler::new(LayoutMetrics::default(), Vec::new());
        handler
            .on_event(SseEvent::message(r#"{"T":[{"name":"a","timezone":1}]}"#))
            .await
            .unwrap();

        let err = handler
            .on_event(SseEvent::message(r#"{"None":[{"name":"x","timezone":20}]}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Roster(_)));
        assert!(!err.is_fatal());

        assert!(handler.on_event(SseEvent::message("not json")).await.is_err());

        assert_eq!(handler.rendered(), 1);
        assert_eq!(handler.last_stats().unwrap().team_member_count, 1);
    }
}
