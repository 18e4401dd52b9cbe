// Round-robin schedule generation.
//
// A full round robin (every team meets every other team once) uses the circle
// method and is deterministic. A partial round robin (fewer games than
// opponents) has no closed-form construction here: it is built by randomized
// greedy selection over shuffled pairs, retried a bounded number of times.
// That path is probabilistic. It converges quickly for league-sized inputs but
// can report exhaustion for parameter combinations that are feasible in
// principle.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use super::errors::EngineError;
use super::models::{Match, Phase, Team, TeamId};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 200;

#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    /// Reshuffle budget for partial round robins.
    pub max_attempts: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Generates round-robin matches so every team plays exactly `games_per_team` games.
pub fn generate_round_robin(teams: &[Team], games_per_team: u32) -> Result<Vec<Match>, EngineError> {
    generate_round_robin_with(teams, games_per_team, &ScheduleOptions::default(), &mut rand::rng())
}

/// Same as [`generate_round_robin`] with explicit options and randomness source.
pub fn generate_round_robin_with<R: Rng + ?Sized>(
    teams: &[Team],
    games_per_team: u32,
    options: &ScheduleOptions,
    rng: &mut R,
) -> Result<Vec<Match>, EngineError> {
    let ids = validate(teams, games_per_team)?;
    let opponents = (ids.len() - 1) as u32;

    let pairings = if games_per_team == opponents {
        circle_pairings(&ids)
    } else {
        greedy_pairings(&ids, games_per_team, options.max_attempts, rng)?
    };

    let matches: Vec<Match> = pairings
        .into_iter()
        .enumerate()
        .map(|(index, (a, b))| {
            Match::unplayed(
                format!("RR-{}", index + 1),
                Phase::RoundRobin,
                ids[a].clone(),
                ids[b].clone(),
            )
        })
        .collect();

    info!(
        teams = ids.len(),
        games_per_team,
        matches = matches.len(),
        "Generated round-robin schedule"
    );

    Ok(matches)
}

fn validate(teams: &[Team], games_per_team: u32) -> Result<Vec<TeamId>, EngineError> {
    if teams.len() < 2 {
        return Err(EngineError::NotEnoughTeams {
            required: 2,
            actual: teams.len(),
        });
    }
    if games_per_team < 1 {
        return Err(EngineError::InvalidGamesPerTeam);
    }

    let max = (teams.len() - 1) as u32;
    if games_per_team > max {
        return Err(EngineError::TooManyGamesPerTeam {
            games_per_team,
            max,
        });
    }

    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(&team.id) {
            return Err(EngineError::DuplicateTeam(team.id.clone()));
        }
    }

    Ok(teams.iter().map(|t| t.id.clone()).collect())
}

/// Circle method over team indices, returned round by round.
///
/// Slot 0 stays fixed while the rest rotate one position per round; slot `i`
/// meets slot `n - 1 - i`. An odd field gets a bye slot whose pairings are
/// dropped.
fn circle_pairings(ids: &[TeamId]) -> Vec<(usize, usize)> {
    let mut slots: Vec<Option<usize>> = (0..ids.len()).map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let mut pairings = Vec::with_capacity(ids.len() * (ids.len() - 1) / 2);

    for round in 0..n - 1 {
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[n - 1 - i]) {
                pairings.push((a, b));
            }
        }
        slots[1..].rotate_right(1);
        debug!(round = round + 1, "Circle method round paired");
    }

    pairings
}

fn greedy_pairings<R: Rng + ?Sized>(
    ids: &[TeamId],
    games_per_team: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Vec<(usize, usize)>, EngineError> {
    let n = ids.len();
    let exhausted = || EngineError::ScheduleExhausted {
        games_per_team,
        team_count: n,
    };

    // Every team needs exactly `games_per_team` slots and each match fills two.
    if (n as u32 * games_per_team) % 2 == 1 {
        warn!(teams = n, games_per_team, "Odd number of game slots, no balanced schedule exists");
        return Err(exhausted());
    }

    let mut pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|a| (a + 1..n).map(move |b| (a, b)))
        .collect();
    let target = games_per_team as usize;
    let needed = n * target / 2;

    for attempt in 1..=max_attempts {
        pairs.shuffle(rng);

        let mut counts: HashMap<usize, usize> = HashMap::with_capacity(n);
        let mut used: HashSet<(usize, usize)> = HashSet::with_capacity(needed);
        let mut selected = Vec::with_capacity(needed);

        for &(a, b) in &pairs {
            let count_a = counts.get(&a).copied().unwrap_or_default();
            let count_b = counts.get(&b).copied().unwrap_or_default();
            if count_a >= target || count_b >= target || used.contains(&(a, b)) {
                continue;
            }

            used.insert((a, b));
            selected.push((a, b));
            *counts.entry(a).or_default() += 1;
            *counts.entry(b).or_default() += 1;

            if selected.len() == needed {
                break;
            }
        }

        let balanced = (0..n).all(|team| counts.get(&team).copied().unwrap_or_default() == target);
        if balanced {
            debug!(attempt, "Partial round robin converged");
            return Ok(selected);
        }
    }

    warn!(
        teams = n,
        games_per_team,
        attempts = max_attempts,
        "Partial round robin exhausted its attempt budget"
    );
    Err(exhausted())
}
