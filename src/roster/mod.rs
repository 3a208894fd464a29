//! Team Roster Engine
//!
//! Everything the team dashboard derives from a roster snapshot:
//!
//! - [`types`]: snapshot decoding, members and the language table
//! - [`classify`]: routing members into the four dashboard views
//! - [`layout`]: timezone columns for unassigned members
//! - [`stats`]: summary counts
//!
//! A snapshot is rebuilt from scratch on every feed message; nothing here
//! keeps state between snapshots.

pub mod classify;
mod error;
pub mod layout;
pub mod stats;
pub mod types;

pub use classify::{classify, is_all_solo, route, RosterViews, TeamCard, View};
pub use error::{RosterError, RosterResult};
pub use layout::{LayoutMetrics, PlacedMember, TimezoneLayout, BUCKET_COUNT};
pub use stats::RosterStats;
pub use types::{
    team_anchor, timezone_label, Language, Member, Roster, TeamEntry, TeamKind, MANAGERS_TEAM,
    UNASSIGNED_TEAM,
};

/// Everything one dashboard render needs, computed from a snapshot
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    pub views: RosterViews<'a>,
    pub layout: TimezoneLayout<'a>,
    pub stats: RosterStats,
}

impl<'a> Dashboard<'a> {
    /// Classify, lay out and count one snapshot
    pub fn build(roster: &'a Roster, metrics: &LayoutMetrics) -> RosterResult<Self> {
        let views = classify(roster);
        let layout = TimezoneLayout::build(&views.unassigned, metrics)?;
        let stats = RosterStats::collect(roster);

        Ok(Self {
            views,
            layout,
            stats,
        })
    }
}
