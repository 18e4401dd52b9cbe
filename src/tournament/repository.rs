use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{models::TournamentModel, TournamentError};

/// Storage seam for tournaments. The service only talks to this trait.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    async fn create_tournament(&self, tournament: &TournamentModel) -> Result<(), TournamentError>;
    async fn get_tournament(&self, id: &str) -> Result<Option<TournamentModel>, TournamentError>;
    async fn update_tournament(&self, tournament: &TournamentModel) -> Result<(), TournamentError>;
    async fn list_tournaments(&self) -> Result<Vec<TournamentModel>, TournamentError>;
    /// Returns whether a tournament was removed
    async fn delete_tournament(&self, id: &str) -> Result<bool, TournamentError>;
}

/// In-memory implementation of TournamentRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryTournamentRepository {
    tournaments: Arc<RwLock<HashMap<String, TournamentModel>>>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self {
            tournaments: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    #[instrument(skip(self, tournament), fields(tournament_id = %tournament.id))]
    async fn create_tournament(&self, tournament: &TournamentModel) -> Result<(), TournamentError> {
        let mut tournaments = self.tournaments.write().await;
        if tournaments.contains_key(&tournament.id) {
            return Err(TournamentError::Repository(format!(
                "tournament {} already exists",
                tournament.id
            )));
        }
        tournaments.insert(tournament.id.clone(), tournament.clone());
        debug!(total = tournaments.len(), "Stored tournament in memory");
        Ok(())
    }

    async fn get_tournament(&self, id: &str) -> Result<Option<TournamentModel>, TournamentError> {
        let tournaments = self.tournaments.read().await;
        Ok(tournaments.get(id).cloned())
    }

    #[instrument(skip(self, tournament), fields(tournament_id = %tournament.id))]
    async fn update_tournament(&self, tournament: &TournamentModel) -> Result<(), TournamentError> {
        let mut tournaments = self.tournaments.write().await;
        match tournaments.get_mut(&tournament.id) {
            Some(existing) => {
                *existing = tournament.clone();
                Ok(())
            }
            None => Err(TournamentError::NotFound(tournament.id.clone())),
        }
    }

    async fn list_tournaments(&self) -> Result<Vec<TournamentModel>, TournamentError> {
        let tournaments = self.tournaments.read().await;
        let mut all: Vec<TournamentModel> = tournaments.values().cloned().collect();
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }

    async fn delete_tournament(&self, id: &str) -> Result<bool, TournamentError> {
        let mut tournaments = self.tournaments.write().await;
        Ok(tournaments.remove(id).is_some())
    }
}
