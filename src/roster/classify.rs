//! Roster classification
//!
//! Splits a snapshot into the four dashboard views. Every member ends up in
//! exactly one of them:
//!
//! | team key             | solo member  | non-solo member     |
//! |----------------------|--------------|---------------------|
//! | `CodeJam Managers`   | managers     | managers            |
//! | `None`               | solo         | timezone layout     |
//! | named, all solo      | solo         | (n/a)               |
//! | named, mixed         | solo         | team grid           |

use super::types::{team_anchor, Member, Roster, TeamKind};

/// Vacuously true for an empty team
pub fn is_all_solo(members: &[Member]) -> bool {
    members.iter().all(|m| m.solo)
}

pub fn is_managers(key: &str) -> bool {
    TeamKind::of(key) == TeamKind::Managers
}

pub fn is_unassigned(key: &str) -> bool {
    TeamKind::of(key) == TeamKind::Unassigned
}

/// Whether a team entry gets its own card in the team grid
pub fn is_grid_team(key: &str, members: &[Member]) -> bool {
    TeamKind::of(key) == TeamKind::Named && !is_all_solo(members)
}

/// The view a single member is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    TeamGrid,
    TimezoneLayout,
    Solo,
    Managers,
}

/// Route one member, given the key of the team it was listed under
pub fn route(key: &str, member: &Member) -> View {
    match TeamKind::of(key) {
        TeamKind::Managers => View::Managers,
        TeamKind::Unassigned if member.solo => View::Solo,
        TeamKind::Unassigned => View::TimezoneLayout,
        // An all-solo team only has solo members, so this covers both the
        // all-solo and the mixed case.
        TeamKind::Named if member.solo => View::Solo,
        TeamKind::Named => View::TeamGrid,
    }
}

/// A team rendered in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCard<'a> {
    pub name: &'a str,
    /// DOM id for the team container
    pub anchor: String,
    /// Non-solo members, in feed order
    pub members: Vec<&'a Member>,
}

/// All four views for one snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterViews<'a> {
    pub teams: Vec<TeamCard<'a>>,
    /// Unassigned, non-solo members awaiting the timezone layout
    pub unassigned: Vec<&'a Member>,
    pub solo: Vec<&'a Member>,
    pub managers: Vec<&'a Member>,
}

impl<'a> RosterViews<'a> {
    /// Number of members placed across all views
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum::<usize>()
            + self.unassigned.len()
            + self.solo.len()
            + self.managers.len()
    }

    /// Which view a member (by name) was placed in
    pub fn view_of(&self, name: &str) -> Option<View> {
        if self
            .teams
            .iter()
            .any(|t| t.members.iter().any(|m| m.name == name))
        {
            Some(View::TeamGrid)
        } else if self.unassigned.iter().any(|m| m.name == name) {
            Some(View::TimezoneLayout)
        } else if self.solo.iter().any(|m| m.name == name) {
            Some(View::Solo)
        } else if self.managers.iter().any(|m| m.name == name) {
            Some(View::Managers)
        } else {
            None
        }
    }
}

/// Build the four views for a snapshot
pub fn classify(roster: &Roster) -> RosterViews<'_> {
    let mut views = RosterViews::default();

    for team in roster.teams() {
        let mut card = is_grid_team(&team.name, &team.members).then(|| TeamCard {
            name: team.name.as_str(),
            anchor: team_anchor(&team.name),
            members: Vec::new(),
        });

        for member in &team.members {
            match route(&team.name, member) {
                View::TeamGrid => {
                    if let Some(card) = card.as_mut() {
                        card.members.push(member);
                    }
                }
                View::TimezoneLayout => views.unassigned.push(member),
                View::Solo => views.solo.push(member),
                View::Managers => views.managers.push(member),
            }
        }

        if let Some(card) = card {
            views.teams.push(card);
        }
    }

    tracing::trace!(
        teams = views.teams.len(),
        unassigned = views.unassigned.len(),
        solo = views.solo.len(),
        managers = views.managers.len(),
        "Classified roster"
    );

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::{MANAGERS_TEAM, UNASSIGNED_TEAM};

    fn sample_roster() -> Roster {
        Roster::new()
            .team(
                "Rustaceans",
                vec![
                    Member::new("ana", 1),
                    Member::new("ben", 2).solo(true),
                    Member::new("cat", 3),
                ],
            )
            .team(
                "Alpha",
                vec![Member::new("dan", 0).solo(true), Member::new("eve", 0).solo(true)],
            )
            .team("Empty", vec![])
            .team(
                UNASSIGNED_TEAM,
                vec![Member::new("fay", -5), Member::new("gus", 4).solo(true)],
            )
            .team(
                MANAGERS_TEAM,
                vec![Member::new("hal", 0), Member::new("ivy", 0).solo(true)],
            )
    }

    #[test]
    fn test_all_solo_predicate() {
        assert!(is_all_solo(&[]));
        assert!(is_all_solo(&[Member::new("a", 0).solo(true)]));
        assert!(!is_all_solo(&[
            Member::new("a", 0).solo(true),
            Member::new("b", 0)
        ]));
    }

    #[test]
    fn test_sentinel_predicates() {
        assert!(is_managers("CodeJam Managers"));
        assert!(!is_managers("None"));
        assert!(is_unassigned("None"));
        assert!(!is_unassigned("null"));
    }

    #[test]
    fn test_unassigned_and_managers_never_grid_teams() {
        let members = vec![Member::new("a", 0)];
        assert!(!is_grid_team(UNASSIGNED_TEAM, &members));
        assert!(!is_grid_team(MANAGERS_TEAM, &members));
        assert!(is_grid_team("Named", &members));
    }

    #[test]
    fn test_views_partition_members() {
        let roster = sample_roster();
        let views = classify(&roster);

        assert_eq!(views.member_count(), roster.member_count());

        let expected = [
            ("ana", View::TeamGrid),
            ("ben", View::Solo),
            ("cat", View::TeamGrid),
            ("dan", View::Solo),
            ("eve", View::Solo),
            ("fay", View::TimezoneLayout),
            ("gus", View::Solo),
            ("hal", View::Managers),
            ("ivy", View::Managers),
        ];
        for (name, view) in expected {
            assert_eq!(views.view_of(name), Some(view), "member {}", name);
        }
    }

    #[test]
    fn test_mixed_team_card_lists_non_solo_members() {
        let roster = sample_roster();
        let views = classify(&roster);

        assert_eq!(views.teams.len(), 1);
        let card = &views.teams[0];
        assert_eq!(card.name, "Rustaceans");
        assert_eq!(card.anchor, "A-rustaceans-B");
        let names: Vec<&str> = card.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["ana", "cat"]);
    }

    #[test]
    fn test_all_solo_team_absorbed_into_solo_view() {
        let roster = Roster::new().team(
            "Alpha",
            vec![Member::new("a", 0).solo(true), Member::new("b", 1).solo(true)],
        );
        let views = classify(&roster);

        assert!(views.teams.is_empty());
        assert_eq!(views.solo.len(), 2);
        assert!(views.teams.iter().all(|t| t.name != "Alpha"));
    }

    #[test]
    fn test_unassigned_and_manager_example() {
        let roster = Roster::parse(
            r#"{"None":[{"timezone":-5,"solo":false,"name":"A"}],
                "CodeJam Managers":[{"name":"B","solo":false,"timezone":0}]}"#,
        )
        .unwrap();
        let views = classify(&roster);

        assert!(views.teams.is_empty());
        assert!(views.solo.is_empty());
        assert_eq!(views.unassigned.len(), 1);
        assert_eq!(views.unassigned[0].name, "A");
        assert_eq!(views.managers.len(), 1);
        assert_eq!(views.managers[0].name, "B");
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new();
        let views = classify(&roster);
        assert_eq!(views, RosterViews::default());
    }
}
