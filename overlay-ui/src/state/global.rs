//! Global Overlay State
//!
//! Reactive state shared by both pages, using Leptos signals.

use leptos::*;

use jamfeed::config::Config;
use jamfeed::roster::{Dashboard, LayoutMetrics, Member, RosterStats};
use jamfeed::Ticker;

/// Global overlay state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Last dashboard snapshot that rendered
    pub snapshot: RwSignal<Option<DashboardSnapshot>>,
    /// Render pass counter; image polling of older passes stops
    pub generation: RwSignal<u64>,
    /// Commit cards on screen
    pub ticker: RwSignal<Ticker>,
    /// Feed connection status
    pub connected: RwSignal<bool>,
    /// Last message timestamp (ms)
    pub last_update: RwSignal<Option<i64>>,
    /// Static settings
    pub settings: Settings,
}

/// Settings fixed for the life of the page
#[derive(Clone, Debug)]
pub struct Settings {
    pub dashboard_url: String,
    pub ticker_url: String,
    pub metrics: LayoutMetrics,
    pub popover_gutter: f64,
    pub image_poll_ms: u32,
    pub max_commits: usize,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            dashboard_url: config.feeds.dashboard_url.clone(),
            ticker_url: config.feeds.ticker_url.clone(),
            metrics: config.layout.metrics(),
            popover_gutter: config.layout.popover_gutter,
            image_poll_ms: config.layout.image_poll_ms,
            max_commits: config.ticker.max_commits,
        }
    }
}

/// One member widget of a render pass
#[derive(Clone, Debug, PartialEq)]
pub struct MemberWidget {
    pub member: Member,
    /// DOM id, unique within the pass
    pub dom_id: String,
    /// Absolute position, timezone layout only
    pub style: Option<String>,
}

impl MemberWidget {
    pub fn avatar_id(&self) -> String {
        format!("{}-avatar", self.dom_id)
    }
}

/// A named team as shown in the grid
#[derive(Clone, Debug, PartialEq)]
pub struct TeamWidget {
    pub name: String,
    pub anchor: String,
    pub members: Vec<MemberWidget>,
}

/// Owned copy of one [`Dashboard`] for the view layer
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: RosterStats,
    pub teams: Vec<TeamWidget>,
    pub unassigned: Vec<MemberWidget>,
    pub layout_height: f64,
    pub solo: Vec<MemberWidget>,
    pub managers: Vec<MemberWidget>,
}

impl DashboardSnapshot {
    pub fn from_dashboard(dashboard: &Dashboard<'_>, metrics: &LayoutMetrics) -> Self {
        let mut next_id = 0usize;
        let mut widget = |member: &Member, style: Option<String>| {
            next_id += 1;
            MemberWidget {
                member: member.clone(),
                dom_id: format!("member-{}", next_id),
                style,
            }
        };

        let teams = dashboard
            .views
            .teams
            .iter()
            .map(|team| TeamWidget {
                name: team.name.to_string(),
                anchor: team.anchor.clone(),
                members: team.members.iter().map(|&m| widget(m, None)).collect(),
            })
            .collect();

        let unassigned = dashboard
            .layout
            .placed()
            .iter()
            .map(|placed| widget(placed.member, Some(placed.style())))
            .collect();

        let solo = dashboard.views.solo.iter().map(|&m| widget(m, None)).collect();
        let managers = dashboard
            .views
            .managers
            .iter()
            .map(|&m| widget(m, None))
            .collect();

        Self {
            stats: dashboard.stats,
            teams,
            unassigned,
            layout_height: dashboard.layout.content_height(metrics),
            solo,
            managers,
        }
    }

    /// Every widget of the pass, for image gating
    pub fn widgets(&self) -> impl Iterator<Item = &MemberWidget> {
        self.teams
            .iter()
            .flat_map(|t| t.members.iter())
            .chain(self.unassigned.iter())
            .chain(self.solo.iter())
            .chain(self.managers.iter())
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let config = Config::default();

    let state = GlobalState {
        snapshot: create_rw_signal(None),
        generation: create_rw_signal(0),
        ticker: create_rw_signal(Ticker::new(config.ticker.timings())),
        connected: create_rw_signal(false),
        last_update: create_rw_signal(None),
        settings: Settings::from(&config),
    };

    provide_context(state);
}

impl GlobalState {
    /// Swap in a new render pass. The generation bump comes last so its
    /// watchers see the new snapshot already mounted.
    pub fn show_snapshot(&self, snapshot: DashboardSnapshot) {
        self.snapshot.set(Some(snapshot));
        self.generation.update(|g| *g += 1);
        self.touch();
    }

    /// Record that a message arrived
    pub fn touch(&self) {
        self.last_update
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamfeed::roster::{Roster, MANAGERS_TEAM, UNASSIGNED_TEAM};

    #[test]
    fn test_snapshot_from_dashboard() {
        let roster = Roster::new()
            .team("Crabs", vec![Member::new("ana", 1), Member::new("bo", 2).solo(true)])
            .team(UNASSIGNED_TEAM, vec![Member::new("cy", -5)])
            .team(MANAGERS_TEAM, vec![Member::new("di", 0)]);
        let metrics = LayoutMetrics::default();
        let dashboard = Dashboard::build(&roster, &metrics).unwrap();

        let snapshot = DashboardSnapshot::from_dashboard(&dashboard, &metrics);

        assert_eq!(snapshot.teams.len(), 1);
        assert_eq!(snapshot.teams[0].anchor, "A-crabs-B");
        assert_eq!(snapshot.teams[0].members.len(), 1);
        assert_eq!(snapshot.solo[0].member.name, "bo");
        assert_eq!(
            snapshot.unassigned[0].style.as_deref(),
            Some("left: 28%; top: 30px;")
        );
        assert_eq!(snapshot.managers[0].member.name, "di");
    }

    #[test]
    fn test_widget_ids_unique() {
        let roster = Roster::new()
            .team("A", vec![Member::new("a", 0), Member::new("b", 0)])
            .team(UNASSIGNED_TEAM, vec![Member::new("c", 0), Member::new("d", 0)]);
        let metrics = LayoutMetrics::default();
        let dashboard = Dashboard::build(&roster, &metrics).unwrap();
        let snapshot = DashboardSnapshot::from_dashboard(&dashboard, &metrics);

        let mut ids: Vec<_> = snapshot.widgets().map(|w| w.dom_id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(total, 4);
        assert_eq!(ids.len(), total);
    }
}
