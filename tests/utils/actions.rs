use pickleball::{Match, TeamId};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    pub async fn schedule(&self, games_per_team: u32) -> Vec<Match> {
        self.service
            .generate_round_robin(&self.tournament_id, games_per_team)
            .await
            .expect("schedule generation should succeed")
    }

    /// Records an 11-`loser_points` result for `winner`
    pub async fn win(&self, m: &Match, winner: &TeamId, loser_points: i32) -> Match {
        let (score_a, score_b) = if &m.team_a == winner {
            (11, loser_points)
        } else {
            (loser_points, 11)
        };
        self.service
            .record_score(&self.tournament_id, &m.id, score_a, score_b)
            .await
            .expect("score should be accepted")
    }

    /// Decides every match so the team listed first in `ranking` always wins
    pub async fn play_by_ranking(&self, matches: &[Match], ranking: &[TeamId]) {
        for m in matches {
            let rank_a = ranking.iter().position(|t| t == &m.team_a).unwrap();
            let rank_b = ranking.iter().position(|t| t == &m.team_b).unwrap();
            let winner = if rank_a < rank_b { &m.team_a } else { &m.team_b };
            let gap = (rank_a as i32 - rank_b as i32).abs();
            self.win(m, winner, (9 - gap).max(0)).await;
        }
    }
}
