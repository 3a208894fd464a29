//! Roster statistics
//!
//! Counted in one pass over the snapshot, independently of classification,
//! but bucketed by the same rules so the numbers always add up to the views.

use serde::Serialize;
use std::fmt;

use super::classify::is_all_solo;
use super::types::{Roster, TeamKind};

/// Summary counts shown above the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    /// Non-solo members on grid teams
    pub team_member_count: usize,
    /// Named teams that are not all-solo
    pub team_count: usize,
    /// Unassigned, non-solo members ("looking for group")
    pub lfg_count: usize,
    /// Solo members anywhere outside the managers list
    pub solo_count: usize,
    /// Staff; never part of the total
    pub manager_count: usize,
}

impl RosterStats {
    /// Count a snapshot
    pub fn collect(roster: &Roster) -> Self {
        let mut stats = RosterStats::default();

        for team in roster.teams() {
            match team.kind() {
                TeamKind::Managers => stats.manager_count += team.members.len(),
                TeamKind::Unassigned => {
                    for member in &team.members {
                        if member.solo {
                            stats.solo_count += 1;
                        } else {
                            stats.lfg_count += 1;
                        }
                    }
                }
                TeamKind::Named if is_all_solo(&team.members) => {
                    stats.solo_count += team.members.len();
                }
                TeamKind::Named => {
                    stats.team_count += 1;
                    for member in &team.members {
                        if member.solo {
                            stats.solo_count += 1;
                        } else {
                            stats.team_member_count += 1;
                        }
                    }
                }
            }
        }

        stats
    }

    /// Participants, excluding managers
    pub fn total_count(&self) -> usize {
        self.team_member_count + self.lfg_count + self.solo_count
    }
}

impl fmt::Display for RosterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} participants: {} in {} teams, {} looking for group, {} solo",
            self.total_count(),
            self.team_member_count,
            self.team_count,
            self.lfg_count,
            self.solo_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::classify::classify;
    use crate::roster::types::{Member, MANAGERS_TEAM, UNASSIGNED_TEAM};

    #[test]
    fn test_unassigned_and_manager_example() {
        let roster = Roster::parse(
            r#"{"None":[{"timezone":-5,"solo":false,"name":"A"}],
                "CodeJam Managers":[{"name":"B","solo":false,"timezone":0}]}"#,
        )
        .unwrap();
        let stats = RosterStats::collect(&roster);

        assert_eq!(stats.lfg_count, 1);
        assert_eq!(stats.team_member_count, 0);
        assert_eq!(stats.solo_count, 0);
        assert_eq!(stats.manager_count, 1);
        assert_eq!(stats.total_count(), 1);
    }

    #[test]
    fn test_all_solo_team_counts_as_solo() {
        let roster = Roster::new().team(
            "Alpha",
            vec![Member::new("a", 0).solo(true), Member::new("b", 0).solo(true)],
        );
        let stats = RosterStats::collect(&roster);

        assert_eq!(stats.solo_count, 2);
        assert_eq!(stats.team_count, 0);
        assert_eq!(stats.total_count(), 2);
    }

    #[test]
    fn test_empty_team_contributes_nothing() {
        let roster = Roster::new().team("Ghosts", vec![]);
        assert_eq!(RosterStats::collect(&roster), RosterStats::default());
    }

    #[test]
    fn test_mixed_team() {
        let roster = Roster::new().team(
            "Mixed",
            vec![
                Member::new("a", 0),
                Member::new("b", 0).solo(true),
                Member::new("c", 0),
            ],
        );
        let stats = RosterStats::collect(&roster);

        assert_eq!(stats.team_count, 1);
        assert_eq!(stats.team_member_count, 2);
        assert_eq!(stats.solo_count, 1);
        assert_eq!(stats.total_count(), 3);
    }

    #[test]
    fn test_stats_agree_with_views() {
        let roster = Roster::new()
            .team("T1", vec![Member::new("a", 0), Member::new("b", 0).solo(true)])
            .team("T2", vec![Member::new("c", 3).solo(true)])
            .team("T3", vec![])
            .team(
                UNASSIGNED_TEAM,
                vec![
                    Member::new("d", -4),
                    Member::new("e", 7).solo(true),
                    Member::new("f", 7),
                ],
            )
            .team(MANAGERS_TEAM, vec![Member::new("g", 0).solo(true)]);

        let stats = RosterStats::collect(&roster);
        let views = classify(&roster);

        assert_eq!(stats.team_count, views.teams.len());
        assert_eq!(
            stats.team_member_count,
            views.teams.iter().map(|t| t.members.len()).sum::<usize>()
        );
        assert_eq!(stats.lfg_count, views.unassigned.len());
        assert_eq!(stats.solo_count, views.solo.len());
        assert_eq!(stats.manager_count, views.managers.len());
        assert_eq!(
            stats.total_count() + stats.manager_count,
            roster.member_count()
        );
    }

    #[test]
    fn test_display() {
        let stats = RosterStats {
            team_member_count: 4,
            team_count: 2,
            lfg_count: 1,
            solo_count: 3,
            manager_count: 2,
        };
        assert_eq!(
            stats.to_string(),
            "8 participants: 4 in 2 teams, 1 looking for group, 3 solo"
        );
    }
}
