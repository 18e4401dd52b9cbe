use std::collections::HashMap;
use tracing::warn;

use super::models::{Match, Phase, StandingsRow, TeamId};

/// Aggregates decided round-robin matches into ranked rows.
///
/// Rows are ordered by wins, then point differential, both descending. Teams
/// still level on both keep the order in which they were passed in.
pub fn compute_standings(team_ids: &[TeamId], matches: &[Match]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::with_capacity(team_ids.len());
    let mut index: HashMap<&TeamId, usize> = HashMap::with_capacity(team_ids.len());

    for team in team_ids {
        if !index.contains_key(team) {
            index.insert(team, rows.len());
            rows.push(StandingsRow::new(team.clone()));
        }
    }

    for m in matches.iter().filter(|m| m.phase == Phase::RoundRobin) {
        let Some(winner) = &m.winner else {
            continue;
        };
        let (Some(&a), Some(&b)) = (index.get(&m.team_a), index.get(&m.team_b)) else {
            continue;
        };

        match (m.score_a, m.score_b) {
            (None, None) => {
                let (winner_row, loser_row) = if winner == &m.team_a {
                    (a, b)
                } else if winner == &m.team_b {
                    (b, a)
                } else {
                    warn!(match_id = %m.id, winner = %winner, "Skipping forfeit won by a team not in the match");
                    continue;
                };
                rows[winner_row].wins += 1;
                rows[winner_row].games_played += 1;
                rows[loser_row].games_played += 1;
            }
            (Some(score_a), Some(score_b)) => {
                rows[a].games_played += 1;
                rows[b].games_played += 1;
                if score_a > score_b {
                    rows[a].wins += 1;
                } else if score_b > score_a {
                    rows[b].wins += 1;
                }
                let margin = i64::from(score_a) - i64::from(score_b);
                rows[a].point_diff += margin;
                rows[b].point_diff -= margin;
            }
            _ => {
                warn!(match_id = %m.id, "Skipping match with only one score recorded");
            }
        }
    }

    rows.sort_by(|x, y| {
        y.wins
            .cmp(&x.wins)
            .then_with(|| y.point_diff.cmp(&x.point_diff))
    });
    rows
}
