use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical team identifier.
///
/// Identifiers reach the engine from several sources, sometimes as numbers and
/// sometimes as strings. They are normalized here, once, so `7` and `"7"` name
/// the same team everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawTeamId", into = "String")]
pub struct TeamId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTeamId {
    Number(i64),
    Text(String),
}

impl TeamId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RawTeamId> for TeamId {
    fn from(raw: RawTeamId) -> Self {
        match raw {
            RawTeamId::Number(n) => TeamId::from(n),
            RawTeamId::Text(s) => TeamId::new(s),
        }
    }
}

impl From<&str> for TeamId {
    fn from(value: &str) -> Self {
        TeamId::new(value)
    }
}

impl From<String> for TeamId {
    fn from(value: String) -> Self {
        TeamId::new(value)
    }
}

impl From<i64> for TeamId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for TeamId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "SF")]
    Semifinal,
    #[serde(rename = "FINAL")]
    Final,
    #[serde(rename = "THIRD")]
    ThirdPlace,
}

impl Phase {
    pub fn code(&self) -> &'static str {
        match self {
            Phase::RoundRobin => "RR",
            Phase::Semifinal => "SF",
            Phase::Final => "FINAL",
            Phase::ThirdPlace => "THIRD",
        }
    }

    pub fn is_playoff(&self) -> bool {
        !matches!(self, Phase::RoundRobin)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single game between two teams.
///
/// A match is unplayed (no scores, no winner), decided with a score (both
/// scores and a winner) or forfeited (a winner but no scores).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub phase: Phase,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
    pub winner: Option<TeamId>,
}

impl Match {
    pub fn unplayed(id: impl Into<String>, phase: Phase, team_a: TeamId, team_b: TeamId) -> Self {
        debug_assert_ne!(team_a, team_b, "a team cannot play itself");
        Self {
            id: id.into(),
            phase,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            winner: None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_forfeit(&self) -> bool {
        self.winner.is_some() && self.score_a.is_none() && self.score_b.is_none()
    }

    pub fn involves(&self, team: &TeamId) -> bool {
        &self.team_a == team || &self.team_b == team
    }

    /// The team that did not win, once the match is decided.
    pub fn loser(&self) -> Option<&TeamId> {
        let winner = self.winner.as_ref()?;
        if winner == &self.team_a {
            Some(&self.team_b)
        } else if winner == &self.team_b {
            Some(&self.team_a)
        } else {
            None
        }
    }
}

/// One team's aggregated round-robin record. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: TeamId,
    pub wins: u32,
    pub point_diff: i64,
    pub games_played: u32,
}

impl StandingsRow {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            wins: 0,
            point_diff: 0,
            games_played: 0,
        }
    }

    pub fn losses(&self) -> u32 {
        self.games_played.saturating_sub(self.wins)
    }
}

/// Final playoff order, available once FINAL and THIRD are decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub champion: TeamId,
    pub runner_up: TeamId,
    pub third: TeamId,
    pub fourth: TeamId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_normalize_to_same_team() {
        let from_number: TeamId = serde_json::from_str("7").unwrap();
        let from_string: TeamId = serde_json::from_str("\" 7 \"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, TeamId::from(7u32));
        assert_eq!(from_number.as_str(), "7");
    }

    #[test]
    fn team_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&TeamId::from(42i64)).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn phase_uses_short_codes_on_the_wire() {
        assert_eq!(serde_json::to_string(&Phase::RoundRobin).unwrap(), "\"RR\"");
        assert_eq!(serde_json::to_string(&Phase::ThirdPlace).unwrap(), "\"THIRD\"");
        let phase: Phase = serde_json::from_str("\"SF\"").unwrap();
        assert_eq!(phase, Phase::Semifinal);
    }

    #[test]
    fn loser_is_the_non_winning_team() {
        let mut m = Match::unplayed("SF1", Phase::Semifinal, "A".into(), "B".into());
        assert_eq!(m.loser(), None);

        m.winner = Some("B".into());
        assert_eq!(m.loser(), Some(&TeamId::from("A")));
        assert!(m.is_forfeit());
    }

    #[test]
    fn match_accepts_numeric_team_references() {
        let m: Match = serde_json::from_str(
            r#"{"id":"RR-1","phase":"RR","team_a":1,"team_b":"2","score_a":null,"score_b":null,"winner":null}"#,
        )
        .unwrap();
        assert_eq!(m.team_a, TeamId::from("1"));
        assert_eq!(m.team_b, TeamId::from("2"));
        assert!(!m.is_decided());
    }
}
