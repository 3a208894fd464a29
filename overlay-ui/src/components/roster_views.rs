//! Roster View Components
//!
//! The four dashboard views plus the stats bar.

use leptos::*;

use jamfeed::roster::RosterStats;

use super::member_card::MemberCard;
use crate::state::global::{MemberWidget, TeamWidget};

/// Summary counts
#[component]
pub fn StatsBar(stats: RosterStats) -> impl IntoView {
    view! {
        <div class="stats-bar">
            <Stat label="Participants" value=stats.total_count() />
            <Stat label="Team members" value=stats.team_member_count />
            <Stat label="Teams" value=stats.team_count />
            <Stat label="Looking for group" value=stats.lfg_count />
            <Stat label="Solo" value=stats.solo_count />
        </div>
    }
}

#[component]
fn Stat(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="stat">
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

/// Named teams, one box per team
#[component]
pub fn TeamGrid(teams: Vec<TeamWidget>) -> impl IntoView {
    view! {
        <section class="team-grid">
            {teams.into_iter().map(|team| view! {
                <div class="team" id=team.anchor>
                    <h3 class="team-name">{team.name}</h3>
                    <div class="team-members">
                        {team.members.into_iter()
                            .map(|widget| view! { <MemberCard widget=widget /> })
                            .collect_view()}
                    </div>
                </div>
            }).collect_view()}
        </section>
    }
}

/// Members looking for a group, positioned by timezone column
#[component]
pub fn TimezoneLayout(members: Vec<MemberWidget>, height: f64) -> impl IntoView {
    view! {
        <section class="timezone-layout" style=format!("height: {}px;", height)>
            {members.into_iter()
                .map(|widget| view! { <MemberCard widget=widget /> })
                .collect_view()}
        </section>
    }
}

/// Plain titled list (solo participants, managers)
#[component]
pub fn MemberList(title: &'static str, members: Vec<MemberWidget>) -> impl IntoView {
    view! {
        <section class="member-list">
            <h2>{title}</h2>
            <div class="member-list-items">
                {members.into_iter()
                    .map(|widget| view! { <MemberCard widget=widget /> })
                    .collect_view()}
            </div>
        </section>
    }
}
