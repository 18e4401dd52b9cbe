use pickleball::{
    Config, InMemoryTournamentRepository, Match, ScoringRules, Team, TournamentService,
};
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickleball=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(?config, "Starting pickleball tournament demo");

    let service = TournamentService::builder(Arc::new(InMemoryTournamentRepository::new()))
        .with_config(&config)
        .build();

    let teams: Vec<Team> = (1..=config.demo_teams)
        .map(|i| Team::new(format!("T{}", i), format!("Team {}", i)))
        .collect();
    let tournament = service.create_tournament("Demo Open", teams).await?;
    let id = tournament.id.as_str();

    let schedule = service
        .generate_round_robin(id, config.demo_games_per_team)
        .await?;
    play_all(&service, id, &schedule, &config.scoring).await?;

    let standings = service.standings(id).await?;
    for (seed, row) in standings.iter().enumerate() {
        info!(
            seed = seed + 1,
            team = %row.team,
            wins = row.wins,
            losses = row.losses(),
            point_diff = row.point_diff,
            "Standings"
        );
    }

    if standings.len() < 4 {
        warn!(teams = standings.len(), "Not enough teams for playoffs");
        return Ok(());
    }

    let semis = service.generate_semifinals(id).await?;
    play_all(&service, id, &semis, &config.scoring).await?;

    let finals = service.generate_finals(id).await?;
    play_all(&service, id, &finals, &config.scoring).await?;

    let placement = service.placements(id).await?;
    info!(
        champion = %placement.champion,
        runner_up = %placement.runner_up,
        third = %placement.third,
        fourth = %placement.fourth,
        "Tournament complete"
    );

    Ok(())
}

async fn play_all(
    service: &TournamentService,
    tournament_id: &str,
    matches: &[Match],
    rules: &ScoringRules,
) -> Result<(), Box<dyn std::error::Error>> {
    for m in matches {
        let (score_a, score_b) = random_game(rules);
        let result = service
            .record_score(tournament_id, &m.id, score_a, score_b)
            .await?;
        info!(
            match_id = %result.id,
            team_a = %result.team_a,
            team_b = %result.team_b,
            score_a,
            score_b,
            "Match played"
        );
    }
    Ok(())
}

/// A decisive game that satisfies `rules`, occasionally going to extra points.
fn random_game(rules: &ScoringRules) -> (i32, i32) {
    let mut rng = rand::rng();
    let (winner, loser) = if rules.points_to_win >= rules.win_by && rng.random_bool(0.2) {
        let extra = rng.random_range(1..=4);
        let winner = rules.points_to_win + extra;
        (winner, winner - rules.win_by)
    } else {
        let loser = rng.random_range(0..=(rules.points_to_win - rules.win_by).max(0));
        (rules.points_to_win.max(loser + rules.win_by), loser)
    };

    if rng.random_bool(0.5) {
        (winner, loser)
    } else {
        (loser, winner)
    }
}
