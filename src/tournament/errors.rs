use thiserror::Error;

use crate::engine::EngineError;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid teams: {0}")]
    InvalidTeams(String),

    #[error("Score rejected: {0}")]
    ScoreRule(String),

    #[error("Round robin has not been generated yet")]
    ScheduleMissing,

    #[error("{remaining} round-robin matches are still undecided")]
    RoundRobinIncomplete { remaining: usize },

    #[error("Invalid forfeit: {0}")]
    InvalidForfeit(String),

    #[error("Repository error: {0}")]
    Repository(String),
}
