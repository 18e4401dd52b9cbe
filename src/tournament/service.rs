use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::engine::{
    self, EngineError, Match, Phase, Placement, ScheduleOptions, StandingsRow, Team, TeamId,
};

use super::{
    models::TournamentModel, repository::TournamentRepository, rules::ScoringRules,
    TournamentError,
};

/// Score submission as it arrives from a request body; scores are untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSubmission {
    pub match_id: String,
    pub score_a: Value,
    pub score_b: Value,
}

/// Runs tournament operations against stored state.
///
/// Every mutating call holds a per-tournament lock for its whole
/// load, compute, store sequence.
pub struct TournamentService {
    repository: Arc<dyn TournamentRepository>,
    schedule_options: ScheduleOptions,
    default_rules: ScoringRules,
    tournament_locks: Arc<RwLock<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl TournamentService {
    pub fn builder(repository: Arc<dyn TournamentRepository>) -> TournamentServiceBuilder {
        TournamentServiceBuilder::new(repository)
    }

    #[instrument(skip(self, teams), fields(team_count = teams.len()))]
    pub async fn create_tournament(
        &self,
        name: &str,
        teams: Vec<Team>,
    ) -> Result<TournamentModel, TournamentError> {
        if name.trim().is_empty() {
            return Err(TournamentError::InvalidTeams(
                "tournament name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for team in &teams {
            if team.id.as_str().is_empty() {
                return Err(TournamentError::InvalidTeams("team id cannot be empty".to_string()));
            }
            if team.name.trim().is_empty() {
                return Err(TournamentError::InvalidTeams(format!(
                    "team {} has no name",
                    team.id
                )));
            }
            if !seen.insert(team.id.clone()) {
                return Err(TournamentError::InvalidTeams(format!(
                    "team {} is listed twice",
                    team.id
                )));
            }
        }

        let tournament = TournamentModel::new(name.trim(), teams, self.default_rules);
        self.repository.create_tournament(&tournament).await?;

        info!(tournament_id = %tournament.id, "Tournament created");
        Ok(tournament)
    }

    pub async fn get_tournament(&self, id: &str) -> Result<TournamentModel, TournamentError> {
        self.repository
            .get_tournament(id)
            .await?
            .ok_or_else(|| TournamentError::NotFound(id.to_string()))
    }

    pub async fn list_tournaments(&self) -> Result<Vec<TournamentModel>, TournamentError> {
        self.repository.list_tournaments().await
    }

    #[instrument(skip(self))]
    pub async fn delete_tournament(&self, id: &str) -> Result<(), TournamentError> {
        let lock = self.tournament_lock(id).await;
        let removed = {
            let _guard = lock.lock().await;
            self.repository.delete_tournament(id).await?
        };
        self.clear_tournament_lock(id).await;

        if removed {
            info!("Tournament deleted");
            Ok(())
        } else {
            Err(TournamentError::NotFound(id.to_string()))
        }
    }

    /// Replaces the whole schedule, playoffs included, with a fresh round robin.
    #[instrument(skip(self))]
    pub async fn generate_round_robin(
        &self,
        id: &str,
        games_per_team: u32,
    ) -> Result<Vec<Match>, TournamentError> {
        let options = self.schedule_options.clone();
        self.mutate(id, move |tournament| {
            let matches = engine::generate_round_robin_with(
                &tournament.teams,
                games_per_team,
                &options,
                &mut rand::rng(),
            )?;

            if !tournament.matches.is_empty() {
                info!(
                    discarded = tournament.matches.len(),
                    "Discarding previous schedule"
                );
            }
            tournament.matches = matches.clone();
            Ok(matches)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn record_score(
        &self,
        id: &str,
        match_id: &str,
        score_a: i32,
        score_b: i32,
    ) -> Result<Match, TournamentError> {
        self.mutate(id, |tournament| {
            if !tournament.matches.iter().any(|m| m.id == match_id) {
                return Err(EngineError::MatchNotFound(match_id.to_string()).into());
            }
            Self::score(tournament, match_id, score_a, score_b)
        })
        .await
    }

    /// Records a score whose values still need integer validation.
    #[instrument(skip(self, submission), fields(match_id = %submission.match_id))]
    pub async fn record_score_submission(
        &self,
        id: &str,
        submission: &ScoreSubmission,
    ) -> Result<Match, TournamentError> {
        self.mutate(id, |tournament| {
            if !tournament.matches.iter().any(|m| m.id == submission.match_id) {
                return Err(EngineError::MatchNotFound(submission.match_id.clone()).into());
            }
            let score_a = engine::parse_score(&submission.score_a)?;
            let score_b = engine::parse_score(&submission.score_b)?;
            Self::score(tournament, &submission.match_id, score_a, score_b)
        })
        .await
    }

    /// Awards a match without a score. Scores are cleared and point differential is unaffected.
    #[instrument(skip(self))]
    pub async fn record_forfeit(
        &self,
        id: &str,
        match_id: &str,
        winner: TeamId,
    ) -> Result<Match, TournamentError> {
        self.mutate(id, |tournament| {
            let m = tournament
                .matches
                .iter_mut()
                .find(|m| m.id == match_id)
                .ok_or_else(|| EngineError::MatchNotFound(match_id.to_string()))?;

            if !m.involves(&winner) {
                return Err(TournamentError::InvalidForfeit(format!(
                    "team {} does not play in {}",
                    winner, match_id
                )));
            }

            m.score_a = None;
            m.score_b = None;
            m.winner = Some(winner);
            info!(winner = ?m.winner, "Forfeit recorded");
            Ok(m.clone())
        })
        .await
    }

    pub async fn standings(&self, id: &str) -> Result<Vec<StandingsRow>, TournamentError> {
        let tournament = self.get_tournament(id).await?;
        Ok(engine::compute_standings(
            &tournament.team_ids(),
            &tournament.round_robin_matches(),
        ))
    }

    /// Seeds semifinals from standings once every round-robin match is decided.
    #[instrument(skip(self))]
    pub async fn generate_semifinals(&self, id: &str) -> Result<Vec<Match>, TournamentError> {
        self.mutate(id, |tournament| {
            let round_robin = tournament.round_robin_matches();
            if round_robin.is_empty() {
                return Err(TournamentError::ScheduleMissing);
            }
            let remaining = tournament.undecided_round_robin();
            if remaining > 0 {
                return Err(TournamentError::RoundRobinIncomplete { remaining });
            }

            let standings = engine::compute_standings(&tournament.team_ids(), &round_robin);
            let semis = engine::generate_semifinals(&standings)?.to_vec();

            tournament.replace_matches(
                &[Phase::Semifinal, Phase::Final, Phase::ThirdPlace],
                semis.clone(),
            );
            Ok(semis)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn generate_finals(&self, id: &str) -> Result<Vec<Match>, TournamentError> {
        self.mutate(id, |tournament| {
            let semis = tournament.matches_in(&[Phase::Semifinal]);
            let finals = engine::generate_finals(&semis)?.to_vec();

            tournament.replace_matches(&[Phase::Final, Phase::ThirdPlace], finals.clone());
            Ok(finals)
        })
        .await
    }

    pub async fn placements(&self, id: &str) -> Result<Placement, TournamentError> {
        let tournament = self.get_tournament(id).await?;
        Ok(engine::compute_placements(&tournament.playoff_matches())?)
    }

    fn score(
        tournament: &mut TournamentModel,
        match_id: &str,
        score_a: i32,
        score_b: i32,
    ) -> Result<Match, TournamentError> {
        tournament
            .rules
            .check(score_a, score_b)
            .map_err(TournamentError::ScoreRule)?;

        let was_decided = tournament
            .matches
            .iter()
            .any(|m| m.id == match_id && m.is_decided());
        let updated = engine::score_match(&mut tournament.matches, match_id, score_a, score_b)?;

        if was_decided
            && updated.phase == Phase::RoundRobin
            && tournament.matches.iter().any(|m| m.phase.is_playoff())
        {
            warn!(
                match_id,
                "Round-robin result changed after playoffs were seeded; bracket is not rebuilt"
            );
        }

        Ok(updated)
    }

    /// Loads the tournament under its lock, applies `op` and stores the result.
    /// Nothing is stored when `op` fails.
    async fn mutate<T, F>(&self, id: &str, op: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut TournamentModel) -> Result<T, TournamentError> + Send,
    {
        let lock = self.tournament_lock(id).await;
        let guard = lock.lock().await;

        let mut tournament = match self.get_tournament(id).await {
            Ok(tournament) => tournament,
            Err(err) => {
                drop(guard);
                // Unknown ids must not leave a lock behind
                if matches!(err, TournamentError::NotFound(_)) {
                    self.clear_tournament_lock(id).await;
                }
                return Err(err);
            }
        };
        let result = op(&mut tournament)?;

        tournament.updated_at = chrono::Utc::now();
        self.repository.update_tournament(&tournament).await?;
        Ok(result)
    }

    async fn tournament_lock(&self, id: &str) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.tournament_locks.read().await;
            if let Some(lock) = guard.get(id) {
                return lock.clone();
            }
        }

        let mut guard = self.tournament_locks.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    async fn clear_tournament_lock(&self, id: &str) {
        let mut guard = self.tournament_locks.write().await;
        guard.remove(id);
    }
}

pub struct TournamentServiceBuilder {
    repository: Arc<dyn TournamentRepository>,
    schedule_options: ScheduleOptions,
    default_rules: ScoringRules,
}

impl TournamentServiceBuilder {
    fn new(repository: Arc<dyn TournamentRepository>) -> Self {
        Self {
            repository,
            schedule_options: ScheduleOptions::default(),
            default_rules: ScoringRules::default(),
        }
    }

    pub fn with_config(self, config: &Config) -> Self {
        self.with_schedule_attempts(config.schedule_attempts)
            .with_scoring_rules(config.scoring)
    }

    pub fn with_schedule_attempts(mut self, max_attempts: u32) -> Self {
        self.schedule_options.max_attempts = max_attempts;
        self
    }

    pub fn with_scoring_rules(mut self, rules: ScoringRules) -> Self {
        self.default_rules = rules;
        self
    }

    pub fn build(self) -> TournamentService {
        TournamentService {
            repository: self.repository,
            schedule_options: self.schedule_options,
            default_rules: self.default_rules,
            tournament_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
