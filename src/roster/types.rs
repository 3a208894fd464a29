//! Roster data types
//!
//! The dashboard feed sends the whole roster on every message: a JSON object
//! mapping team names to member lists. Key order matters (it is the render
//! order), so [`Roster`] keeps entries in a `Vec` instead of a map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::error::{RosterError, RosterResult};

/// Team key used for participants without a team ("looking for group")
pub const UNASSIGNED_TEAM: &str = "None";

/// Team key used for event staff
pub const MANAGERS_TEAM: &str = "CodeJam Managers";

/// Westernmost supported timezone offset (hours)
pub const MIN_TIMEZONE: i32 = -12;

/// Easternmost supported timezone offset (hours)
pub const MAX_TIMEZONE: i32 = 12;

/// Preferred programming language, as sent by the signup bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Language {
    NoPreference,
    Python,
    JavaScript,
    TypeScript,
    Java,
    Kotlin,
    Cpp,
    C,
    CSharp,
    Rust,
    Go,
    Swift,
    Shell,
    Lua,
    VisualBasic,
    Haskell,
    Dart,
    Php,
    Other,
    /// A code outside the known table; kept so it round-trips
    Unknown(i64),
}

/// Code -> language table. Index equals wire code.
const LANGUAGES: [(Language, &str); 19] = [
    (Language::NoPreference, "No Preference"),
    (Language::Python, "Python"),
    (Language::JavaScript, "JavaScript"),
    (Language::TypeScript, "TypeScript"),
    (Language::Java, "Java"),
    (Language::Kotlin, "Kotlin"),
    (Language::Cpp, "C++"),
    (Language::C, "C"),
    (Language::CSharp, "C#"),
    (Language::Rust, "Rust"),
    (Language::Go, "Go"),
    (Language::Swift, "Swift"),
    (Language::Shell, "Bash/Shell"),
    (Language::Lua, "Lua"),
    (Language::VisualBasic, "VisualBasic"),
    (Language::Haskell, "Haskell"),
    (Language::Dart, "Dart"),
    (Language::Php, "PHP"),
    (Language::Other, "Other..."),
];

impl Language {
    /// Look up a wire code
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| LANGUAGES.get(idx))
            .map(|(lang, _)| *lang)
            .unwrap_or(Language::Unknown(code))
    }

    /// Wire code for this language
    pub fn code(&self) -> i64 {
        match self {
            Language::Unknown(code) => *code,
            known => LANGUAGES
                .iter()
                .position(|(lang, _)| lang == known)
                .map(|idx| idx as i64)
                .unwrap_or(-1),
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Language::Unknown(_) => "Unknown",
            known => LANGUAGES
                .iter()
                .find(|(lang, _)| lang == known)
                .map(|(_, label)| *label)
                .unwrap_or("Unknown"),
        }
    }
}

impl From<i64> for Language {
    fn from(code: i64) -> Self {
        Language::from_code(code)
    }
}

impl From<Language> for i64 {
    fn from(lang: Language) -> Self {
        lang.code()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    /// Whole-hour UTC offset
    pub timezone: i32,
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Opted out of teaming, even if listed under a team
    #[serde(default)]
    pub solo: bool,
}

impl Member {
    /// Create a non-solo member with no avatar or languages
    pub fn new(name: impl Into<String>, timezone: i32) -> Self {
        Self {
            name: name.into(),
            avatar: String::new(),
            timezone,
            languages: Vec::new(),
            solo: false,
        }
    }

    /// Builder: set the solo flag
    pub fn solo(mut self, solo: bool) -> Self {
        self.solo = solo;
        self
    }

    /// Builder: add a preferred language
    pub fn language(mut self, lang: Language) -> Self {
        self.languages.push(lang);
        self
    }

    /// `UTC+5`, `UTC-3`, `UTC0`
    pub fn timezone_label(&self) -> String {
        timezone_label(self.timezone)
    }

    /// `True` / `False`, as shown in the member popover
    pub fn solo_label(&self) -> &'static str {
        if self.solo {
            "True"
        } else {
            "False"
        }
    }
}

/// Format a UTC offset the way the overlays display it
pub fn timezone_label(timezone: i32) -> String {
    if timezone > 0 {
        format!("UTC+{}", timezone)
    } else {
        format!("UTC{}", timezone)
    }
}

/// Stable DOM id for a team container: `A-{slug}-B`
pub fn team_anchor(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;

    // Each whitespace run collapses to a single dash
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_space = false;
        }
    }

    format!("A-{}-B", slug)
}

/// Which dedicated view a team key routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamKind {
    Managers,
    Unassigned,
    Named,
}

impl TeamKind {
    pub fn of(key: &str) -> Self {
        match key {
            MANAGERS_TEAM => TeamKind::Managers,
            UNASSIGNED_TEAM => TeamKind::Unassigned,
            _ => TeamKind::Named,
        }
    }
}

/// One `team name -> members` entry of a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TeamEntry {
    pub name: String,
    pub members: Vec<Member>,
}

impl TeamEntry {
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn kind(&self) -> TeamKind {
        TeamKind::of(&self.name)
    }
}

/// A full roster snapshot, in feed order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    teams: Vec<TeamEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and validate a feed payload
    pub fn parse(payload: &str) -> RosterResult<Self> {
        let roster: Roster = serde_json::from_str(payload)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Insert a team. A repeated key replaces the earlier member list but
    /// keeps the earlier position.
    pub fn insert(&mut self, name: impl Into<String>, members: Vec<Member>) {
        let name = name.into();
        match self.teams.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.members = members,
            None => self.teams.push(TeamEntry { name, members }),
        }
    }

    /// Builder form of [`Roster::insert`]
    pub fn team(mut self, name: impl Into<String>, members: Vec<Member>) -> Self {
        self.insert(name, members);
        self
    }

    pub fn teams(&self) -> &[TeamEntry] {
        &self.teams
    }

    /// Total number of members across all teams
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum()
    }

    /// Check every member's timezone is renderable
    pub fn validate(&self) -> RosterResult<()> {
        for member in self.teams.iter().flat_map(|t| t.members.iter()) {
            if !(MIN_TIMEZONE..=MAX_TIMEZONE).contains(&member.timezone) {
                return Err(RosterError::TimezoneOutOfRange {
                    member: member.name.clone(),
                    timezone: member.timezone,
                });
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RosterVisitor;

        impl<'de> Visitor<'de> for RosterVisitor {
            type Value = Roster;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of team name to member list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Roster, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut roster = Roster {
                    teams: Vec::with_capacity(map.size_hint().unwrap_or(0)),
                };
                while let Some((name, members)) = map.next_entry::<String, Vec<Member>>()? {
                    roster.insert(name, members);
                }
                Ok(roster)
            }
        }

        deserializer.deserialize_map(RosterVisitor)
    }
}

impl Serialize for Roster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.teams.len()))?;
        for team in &self.teams {
            map.serialize_entry(&team.name, &team.members)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table() {
        assert_eq!(Language::from_code(0), Language::NoPreference);
        assert_eq!(Language::from_code(9), Language::Rust);
        assert_eq!(Language::from_code(18), Language::Other);
        assert_eq!(Language::Cpp.label(), "C++");
        assert_eq!(Language::Shell.label(), "Bash/Shell");
        assert_eq!(Language::Php.code(), 17);
    }

    #[test]
    fn test_unknown_language_code() {
        assert_eq!(Language::from_code(19), Language::Unknown(19));
        assert_eq!(Language::from_code(-1), Language::Unknown(-1));
        assert_eq!(Language::Unknown(42).label(), "Unknown");
        assert_eq!(Language::Unknown(42).code(), 42);
    }

    #[test]
    fn test_member_defaults() {
        let member: Member = serde_json::from_str(r#"{"name":"A","timezone":-5}"#).unwrap();
        assert_eq!(member.name, "A");
        assert_eq!(member.avatar, "");
        assert!(member.languages.is_empty());
        assert!(!member.solo);
    }

    #[test]
    fn test_member_languages_decode() {
        let member: Member =
            serde_json::from_str(r#"{"name":"A","timezone":1,"languages":[1,9,99]}"#).unwrap();
        assert_eq!(
            member.languages,
            vec![Language::Python, Language::Rust, Language::Unknown(99)]
        );
    }

    #[test]
    fn test_timezone_label() {
        assert_eq!(timezone_label(5), "UTC+5");
        assert_eq!(timezone_label(-3), "UTC-3");
        assert_eq!(timezone_label(0), "UTC0");
    }

    #[test]
    fn test_team_anchor() {
        assert_eq!(team_anchor("Kroden Warriors"), "A-kroden-warriors-B");
        assert_eq!(team_anchor("Big   Brain\tTeam"), "A-big-brain-team-B");
        assert_eq!(team_anchor("solo"), "A-solo-B");
        assert_eq!(team_anchor(" Edge "), "A--edge--B");
    }

    #[test]
    fn test_team_kind() {
        assert_eq!(TeamKind::of("None"), TeamKind::Unassigned);
        assert_eq!(TeamKind::of("CodeJam Managers"), TeamKind::Managers);
        assert_eq!(TeamKind::of("none"), TeamKind::Named);
    }

    #[test]
    fn test_roster_keeps_feed_order() {
        let roster = Roster::parse(
            r#"{"Zeta":[{"name":"z","timezone":0}],"Alpha":[{"name":"a","timezone":0}],"None":[]}"#,
        )
        .unwrap();

        let names: Vec<&str> = roster.teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "None"]);
        assert_eq!(roster.member_count(), 2);
    }

    #[test]
    fn test_duplicate_key_last_wins_first_position() {
        let roster = Roster::parse(
            r#"{"A":[{"name":"x","timezone":0}],"B":[],"A":[{"name":"y","timezone":1}]}"#,
        )
        .unwrap();

        assert_eq!(roster.teams().len(), 2);
        assert_eq!(roster.teams()[0].name, "A");
        assert_eq!(roster.teams()[0].members[0].name, "y");
    }

    #[test]
    fn test_timezone_out_of_range_rejected() {
        let err = Roster::parse(r#"{"None":[{"name":"far","timezone":13}]}"#).unwrap_err();
        assert!(matches!(
            err,
            RosterError::TimezoneOutOfRange { timezone: 13, .. }
        ));
    }

    #[test]
    fn test_malformed_payload_rejected() {
        assert!(matches!(
            Roster::parse(r#"["not","a","map"]"#),
            Err(RosterError::Malformed(_))
        ));
        assert!(matches!(
            Roster::parse(r#"{"None":[{"timezone":1}]}"#),
            Err(RosterError::Malformed(_))
        ));
    }

    #[test]
    fn test_roster_serializes_as_map() {
        let roster = Roster::new()
            .team("Beta", vec![Member::new("b", 2).solo(true)])
            .team("None", vec![]);
        let json = serde_json::to_string(&roster).unwrap();
        assert!(json.starts_with(r#"{"Beta":[{"name":"b""#));
        assert!(json.ends_with(r#""None":[]}"#));
        assert_eq!(Roster::parse(&json).unwrap(), roster);
    }
}
