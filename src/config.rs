use std::str::FromStr;
use thiserror::Error;

use crate::engine::DEFAULT_MAX_ATTEMPTS;
use crate::tournament::ScoringRules;

pub const SCHEDULE_ATTEMPTS_VAR: &str = "PICKLEBALL_SCHEDULE_ATTEMPTS";
pub const POINTS_TO_WIN_VAR: &str = "PICKLEBALL_POINTS_TO_WIN";
pub const WIN_BY_VAR: &str = "PICKLEBALL_WIN_BY";
pub const DEMO_TEAMS_VAR: &str = "PICKLEBALL_DEMO_TEAMS";
pub const DEMO_GAMES_PER_TEAM_VAR: &str = "PICKLEBALL_DEMO_GAMES_PER_TEAM";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{name} must be at least 1")]
    NotPositive { name: &'static str },
}

/// Runtime settings, read from environment variables with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub schedule_attempts: u32,
    pub scoring: ScoringRules,
    pub demo_teams: usize,
    pub demo_games_per_team: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule_attempts: DEFAULT_MAX_ATTEMPTS,
            scoring: ScoringRules::default(),
            demo_teams: 6,
            demo_games_per_team: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let points_to_win = read(&lookup, POINTS_TO_WIN_VAR, defaults.scoring.points_to_win)?;
        let win_by = read(&lookup, WIN_BY_VAR, defaults.scoring.win_by)?;
        if points_to_win < 1 {
            return Err(ConfigError::NotPositive {
                name: POINTS_TO_WIN_VAR,
            });
        }
        if win_by < 1 {
            return Err(ConfigError::NotPositive { name: WIN_BY_VAR });
        }

        Ok(Self {
            schedule_attempts: read(&lookup, SCHEDULE_ATTEMPTS_VAR, defaults.schedule_attempts)?,
            scoring: ScoringRules {
                points_to_win,
                win_by,
            },
            demo_teams: read(&lookup, DEMO_TEAMS_VAR, defaults.demo_teams)?,
            demo_games_per_team: read(
                &lookup,
                DEMO_GAMES_PER_TEAM_VAR,
                defaults.demo_games_per_team,
            )?,
        })
    }
}

fn read<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}
