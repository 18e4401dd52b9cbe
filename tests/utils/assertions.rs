use std::collections::HashSet;

use pickleball::{Match, TeamId};

// ============================================================================
// Schedule Assertions
// ============================================================================

pub fn assert_each_team_plays(matches: &[Match], teams: &[TeamId], games: usize) {
    for team in teams {
        let played = matches.iter().filter(|m| m.involves(team)).count();
        assert_eq!(played, games, "team {} should play {} games", team, games);
    }
}

pub fn assert_no_repeated_pairs(matches: &[Match]) {
    let mut seen = HashSet::new();
    for m in matches {
        assert_ne!(m.team_a, m.team_b, "{} pairs a team with itself", m.id);
        let key = if m.team_a < m.team_b {
            (m.team_a.clone(), m.team_b.clone())
        } else {
            (m.team_b.clone(), m.team_a.clone())
        };
        assert!(seen.insert(key), "{} repeats an earlier pairing", m.id);
    }
}
