// Public API - what embedding applications use
pub use errors::TournamentError;
pub use models::TournamentModel;
pub use repository::{InMemoryTournamentRepository, TournamentRepository};
pub use rules::ScoringRules;
pub use service::{ScoreSubmission, TournamentService, TournamentServiceBuilder};

// Internal modules
mod errors;
pub mod models;
pub mod repository;
pub mod rules;
mod service;
