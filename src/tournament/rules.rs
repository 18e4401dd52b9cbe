use serde::{Deserialize, Serialize};

pub const DEFAULT_POINTS_TO_WIN: i32 = 11;
pub const DEFAULT_WIN_BY: i32 = 2;

/// Per-tournament game rules, e.g. "play to 11, win by 2".
///
/// These are checked before a score reaches the engine, which only knows that
/// scores are integers and never tied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub points_to_win: i32,
    pub win_by: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            points_to_win: DEFAULT_POINTS_TO_WIN,
            win_by: DEFAULT_WIN_BY,
        }
    }
}

impl ScoringRules {
    /// Returns a description of the broken rule, if any.
    ///
    /// Tied scores pass through so the engine reports them.
    pub fn check(&self, score_a: i32, score_b: i32) -> Result<(), String> {
        if score_a < 0 || score_b < 0 {
            return Err(format!("scores cannot be negative ({}-{})", score_a, score_b));
        }
        if score_a == score_b {
            return Ok(());
        }

        let high = score_a.max(score_b);
        let margin = (score_a - score_b).abs();

        if high < self.points_to_win {
            return Err(format!(
                "winning score must reach {} (got {}-{})",
                self.points_to_win, score_a, score_b
            ));
        }
        if margin < self.win_by {
            return Err(format!(
                "must win by at least {} (got {}-{})",
                self.win_by, score_a, score_b
            ));
        }
        // Past the target the game ends as soon as the lead reaches `win_by`.
        if high > self.points_to_win && margin != self.win_by {
            return Err(format!(
                "extended game must end on a {}-point lead (got {}-{})",
                self.win_by, score_a, score_b
            ));
        }

        Ok(())
    }
}
