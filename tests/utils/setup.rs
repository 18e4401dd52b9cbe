use std::sync::Arc;

use pickleball::{
    InMemoryTournamentRepository, ScoringRules, Team, TeamId, TournamentRepository,
    TournamentService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub service: TournamentService,
    pub repository: Arc<InMemoryTournamentRepository>,
    pub tournament_id: String,
    pub teams: Vec<Team>,
}

impl TestSetup {
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id.clone()).collect()
    }
}

pub struct TestSetupBuilder {
    teams: Vec<Team>,
    rules: ScoringRules,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            teams: vec![],
            rules: ScoringRules::default(),
        }
    }

    pub fn with_teams(mut self, count: usize) -> Self {
        self.teams = (1..=count)
            .map(|i| Team::new(format!("T{}", i), format!("Team {}", i)))
            .collect();
        self
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryTournamentRepository::new());
        let service = TournamentService::builder(repository.clone())
            .with_scoring_rules(self.rules)
            .build();

        let tournament = service
            .create_tournament("Integration Open", self.teams.clone())
            .await
            .expect("tournament creation should succeed");

        // The repository is shared with the service
        assert!(repository
            .get_tournament(&tournament.id)
            .await
            .unwrap()
            .is_some());

        TestSetup {
            service,
            repository,
            tournament_id: tournament.id,
            teams: self.teams,
        }
    }
}
