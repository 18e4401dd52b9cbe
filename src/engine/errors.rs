use thiserror::Error;

use super::models::TeamId;

/// Broad failure categories callers map to user-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InfeasibleParameters,
    SchedulingExhausted,
    NotFound,
    InvalidScore,
    PreconditionUnmet,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("At least {required} teams are required, got {actual}")]
    NotEnoughTeams { required: usize, actual: usize },

    #[error("Games per team must be at least 1")]
    InvalidGamesPerTeam,

    #[error("Games per team ({games_per_team}) cannot exceed the number of opponents ({max})")]
    TooManyGamesPerTeam { games_per_team: u32, max: u32 },

    #[error("Team {0} appears more than once")]
    DuplicateTeam(TeamId),

    #[error(
        "Could not build a balanced schedule with {games_per_team} games per team for {team_count} teams; reduce games per team or add teams"
    )]
    ScheduleExhausted {
        games_per_team: u32,
        team_count: usize,
    },

    #[error("Match not found: {0}")]
    MatchNotFound(String),

    #[error("Scores must be integers, got {0}")]
    NonIntegerScore(String),

    #[error("Scores cannot be tied ({0}-{0})")]
    TiedScore(i32),

    #[error("Playoffs need at least 4 teams in the standings, got {0}")]
    NotEnoughTeamsForPlayoffs(usize),

    #[error("Semifinals incomplete: {0}")]
    SemifinalsIncomplete(String),

    #[error("Playoffs incomplete: {0}")]
    PlayoffsIncomplete(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotEnoughTeams { .. }
            | EngineError::InvalidGamesPerTeam
            | EngineError::TooManyGamesPerTeam { .. }
            | EngineError::DuplicateTeam(_) => ErrorKind::InfeasibleParameters,
            EngineError::ScheduleExhausted { .. } => ErrorKind::SchedulingExhausted,
            EngineError::MatchNotFound(_) => ErrorKind::NotFound,
            EngineError::NonIntegerScore(_) | EngineError::TiedScore(_) => ErrorKind::InvalidScore,
            EngineError::NotEnoughTeamsForPlayoffs(_)
            | EngineError::SemifinalsIncomplete(_)
            | EngineError::PlayoffsIncomplete(_) => ErrorKind::PreconditionUnmet,
        }
    }
}
