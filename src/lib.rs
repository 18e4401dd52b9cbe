// Library crate for the pickleball tournament engine
// This file exposes the public API for the demo binary and integration tests

pub mod config;
pub mod engine;
pub mod tournament;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigError};
pub use engine::{EngineError, ErrorKind, Match, Phase, Placement, StandingsRow, Team, TeamId};
pub use tournament::{
    InMemoryTournamentRepository, ScoringRules, TournamentError, TournamentRepository,
    TournamentService,
};
