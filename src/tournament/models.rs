use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rules::ScoringRules;
use crate::engine::{Match, Phase, Team, TeamId};

/// Stored state of one tournament: its teams and every match generated so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentModel {
    pub id: String,
    pub name: String,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub rules: ScoringRules,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TournamentModel {
    /// Creates a new tournament with a generated ID and no matches
    pub fn new(name: impl Into<String>, teams: Vec<Team>, rules: ScoringRules) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            teams,
            matches: Vec::new(),
            rules,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id.clone()).collect()
    }

    pub fn round_robin_matches(&self) -> Vec<Match> {
        self.matches_in(&[Phase::RoundRobin])
    }

    pub fn playoff_matches(&self) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| m.phase.is_playoff())
            .cloned()
            .collect()
    }

    pub fn matches_in(&self, phases: &[Phase]) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| phases.contains(&m.phase))
            .cloned()
            .collect()
    }

    /// Count of round-robin matches that have no winner yet
    pub fn undecided_round_robin(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| m.phase == Phase::RoundRobin && !m.is_decided())
            .count()
    }

    /// Replaces every match in `phases` with `replacement`
    pub fn replace_matches(&mut self, phases: &[Phase], replacement: impl IntoIterator<Item = Match>) {
        self.matches.retain(|m| !phases.contains(&m.phase));
        self.matches.extend(replacement);
    }
}
