// Tournament engine: pure, synchronous computations over teams and matches.
// Callers pass collections in explicitly; nothing here holds state between calls.

// Public API
pub use bracket::{compute_placements, generate_finals, generate_semifinals};
pub use errors::{EngineError, ErrorKind};
pub use models::{Match, Phase, Placement, StandingsRow, Team, TeamId};
pub use schedule::{
    generate_round_robin, generate_round_robin_with, ScheduleOptions, DEFAULT_MAX_ATTEMPTS,
};
pub use scoring::{parse_score, score_match, score_match_json};
pub use standings::compute_standings;

// Internal modules
pub mod bracket;
mod errors;
pub mod models;
mod schedule;
mod scoring;
mod standings;
