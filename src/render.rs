//! Terminal rendering
//!
//! Plain-text versions of the two overlays, used by the command-line tools.
//! Output is rebuilt from scratch for every snapshot, like the browser
//! overlay.

use std::fmt::Write;

use crate::roster::layout::bucket_label;
use crate::roster::{Dashboard, Member};
use crate::ticker::CommitCard;

fn languages(member: &Member) -> String {
    if member.languages.is_empty() {
        return "-".to_string();
    }
    member
        .languages
        .iter()
        .map(|l| l.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn member_line(member: &Member) -> String {
    format!(
        "{} [{}] solo={} langs: {}",
        member.name,
        member.timezone_label(),
        member.solo_label(),
        languages(member)
    )
}

/// Full dashboard: stats, team grid, timezone layout, solo and managers
pub fn render_dashboard(dashboard: &Dashboard<'_>) -> String {
    let mut out = String::new();
    let stats = &dashboard.stats;

    // Writing to a String cannot fail
    let _ = writeln!(out, "== CodeJam Team Feed ==");
    let _ = writeln!(
        out,
        "Total {} | Team members {} | Teams {} | Looking for group {} | Solo {}",
        stats.total_count(),
        stats.team_member_count,
        stats.team_count,
        stats.lfg_count,
        stats.solo_count
    );

    let _ = writeln!(out, "\n-- Teams --");
    if dashboard.views.teams.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for team in &dashboard.views.teams {
        let _ = writeln!(out, "  {} #{}", team.name, team.anchor);
        for member in &team.members {
            let _ = writeln!(out, "    - {}", member_line(member));
        }
    }

    let _ = writeln!(out, "\n-- Looking for group --");
    if dashboard.layout.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for bucket in dashboard.layout.occupied() {
        let _ = writeln!(
            out,
            "  {:>6} (offset {})",
            bucket_label(bucket),
            dashboard.layout.offset(bucket)
        );
        for placed in dashboard
            .layout
            .placed()
            .iter()
            .filter(|p| p.bucket == bucket)
        {
            let _ = writeln!(
                out,
                "    - {} @ left {:.0}% top {:.0}px",
                member_line(placed.member),
                placed.left_percent,
                placed.top_px
            );
        }
    }

    let _ = writeln!(out, "\n-- Solo --");
    if dashboard.views.solo.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for member in &dashboard.views.solo {
        let _ = writeln!(out, "  - {}", member_line(member));
    }

    let _ = writeln!(out, "\n-- Managers --");
    if dashboard.views.managers.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for member in &dashboard.views.managers {
        let _ = writeln!(out, "  - {} [{}]", member.name, member.timezone_label());
    }

    out
}

/// One commit card
pub fn render_card(card: &CommitCard, max_commits: usize) -> String {
    let mut out = String::new();
    let event = &card.event;

    let _ = writeln!(out, "┌ {}", event.headline());
    for commit in event.visible_commits(max_commits) {
        let _ = writeln!(out, "│ {} - {}", commit.author, commit.message);
    }
    let _ = writeln!(out, "└ {}", event.footer());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Language, LayoutMetrics, Roster, MANAGERS_TEAM, UNASSIGNED_TEAM};
    use crate::ticker::{Commit, CommitEvent, Sender, TeamRef};

    #[test]
    fn test_render_dashboard_sections() {
        let roster = Roster::new()
            .team(
                "Rustaceans",
                vec![Member::new("ana", 2).language(Language::Rust)],
            )
            .team(UNASSIGNED_TEAM, vec![Member::new("ben", -5)])
            .team("Loners", vec![Member::new("cat", 0).solo(true)])
            .team(MANAGERS_TEAM, vec![Member::new("dan", 1)]);
        let dashboard = Dashboard::build(&roster, &LayoutMetrics::default()).unwrap();

        let text = render_dashboard(&dashboard);

        assert!(text.contains("Total 3 | Team members 1 | Teams 1 | Looking for group 1 | Solo 1"));
        assert!(text.contains("Rustaceans #A-rustaceans-B"));
        assert!(text.contains("ana [UTC+2] solo=False langs: Rust"));
        assert!(text.contains("UTC-5 (offset 0)"));
        assert!(text.contains("ben [UTC-5] solo=False langs: - @ left 28% top 30px"));
        assert!(text.contains("cat [UTC0] solo=True"));
        assert!(text.contains("dan [UTC+1]"));
        assert!(!text.contains("Loners"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let roster = Roster::new();
        let dashboard = Dashboard::build(&roster, &LayoutMetrics::default()).unwrap();
        let text = render_dashboard(&dashboard);
        assert_eq!(text.matches("(none)").count(), 4);
    }

    #[test]
    fn test_render_card() {
        let card = CommitCard {
            id: 0,
            event: CommitEvent {
                sender: Sender {
                    name: "ferris".to_string(),
                    avatar: String::new(),
                },
                team: TeamRef {
                    name: "Crabs".to_string(),
                    id: None,
                },
                commits: vec![
                    Commit {
                        author: "Ferris".to_string(),
                        message: "one".to_string(),
                    },
                    Commit {
                        author: "Ferris".to_string(),
                        message: "two".to_string(),
                    },
                ],
                commit_length: 9,
            },
            active: true,
        };

        let text = render_card(&card, 1);
        assert_eq!(text, "┌ ferris - (Crabs)\n│ Ferris - one\n└ 9 new commits...\n");
    }
}
