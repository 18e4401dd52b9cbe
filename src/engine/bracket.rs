use tracing::info;

use super::errors::EngineError;
use super::models::{Match, Phase, Placement, StandingsRow, TeamId};

pub const SEMIFINAL_ONE: &str = "SF1";
pub const SEMIFINAL_TWO: &str = "SF2";
pub const FINAL: &str = "FINAL";
pub const THIRD_PLACE: &str = "THIRD";

/// Seeds the top four rows into `SF1` (1 v 4) and `SF2` (2 v 3).
pub fn generate_semifinals(standings: &[StandingsRow]) -> Result<[Match; 2], EngineError> {
    if standings.len() < 4 {
        return Err(EngineError::NotEnoughTeamsForPlayoffs(standings.len()));
    }

    let seeds: Vec<TeamId> = standings[..4].iter().map(|r| r.team.clone()).collect();
    for (i, seed) in seeds.iter().enumerate() {
        if seeds[..i].contains(seed) {
            return Err(EngineError::DuplicateTeam(seed.clone()));
        }
    }

    info!(
        seed1 = %seeds[0],
        seed2 = %seeds[1],
        seed3 = %seeds[2],
        seed4 = %seeds[3],
        "Seeded semifinals"
    );

    Ok([
        Match::unplayed(SEMIFINAL_ONE, Phase::Semifinal, seeds[0].clone(), seeds[3].clone()),
        Match::unplayed(SEMIFINAL_TWO, Phase::Semifinal, seeds[1].clone(), seeds[2].clone()),
    ])
}

/// Pairs semifinal winners into `FINAL` and semifinal losers into `THIRD`.
pub fn generate_finals(semis: &[Match]) -> Result<[Match; 2], EngineError> {
    let (winner_one, loser_one) = decided(semis, SEMIFINAL_ONE, EngineError::SemifinalsIncomplete)?;
    let (winner_two, loser_two) = decided(semis, SEMIFINAL_TWO, EngineError::SemifinalsIncomplete)?;

    // A team shared by both semifinals would meet itself in FINAL or THIRD.
    for team in [&winner_two, &loser_two] {
        if team == &winner_one || team == &loser_one {
            return Err(EngineError::DuplicateTeam(team.clone()));
        }
    }

    Ok([
        Match::unplayed(FINAL, Phase::Final, winner_one, winner_two),
        Match::unplayed(THIRD_PLACE, Phase::ThirdPlace, loser_one, loser_two),
    ])
}

/// Reads the final order off decided `FINAL` and `THIRD` matches.
pub fn compute_placements(matches: &[Match]) -> Result<Placement, EngineError> {
    let (champion, runner_up) = decided(matches, FINAL, EngineError::PlayoffsIncomplete)?;
    let (third, fourth) = decided(matches, THIRD_PLACE, EngineError::PlayoffsIncomplete)?;

    Ok(Placement {
        champion,
        runner_up,
        third,
        fourth,
    })
}

fn decided(
    matches: &[Match],
    code: &str,
    incomplete: fn(String) -> EngineError,
) -> Result<(TeamId, TeamId), EngineError> {
    let m = matches
        .iter()
        .find(|m| m.id == code)
        .ok_or_else(|| incomplete(format!("{} has not been generated", code)))?;
    let winner = m
        .winner
        .clone()
        .ok_or_else(|| incomplete(format!("{} has no winner yet", code)))?;
    let loser = m
        .loser()
        .cloned()
        .ok_or_else(|| incomplete(format!("{} winner is not one of its teams", code)))?;
    Ok((winner, loser))
}
