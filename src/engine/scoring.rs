use serde_json::Value;
use tracing::debug;

use super::errors::EngineError;
use super::models::Match;

/// Records a decisive score on the match with `match_id`.
///
/// Point targets and win-by margins are tournament policy and are checked by
/// the caller; this only rejects ties. Nothing is modified when validation
/// fails.
pub fn score_match(
    matches: &mut [Match],
    match_id: &str,
    score_a: i32,
    score_b: i32,
) -> Result<Match, EngineError> {
    let m = find_match(matches, match_id)?;
    apply_score(m, score_a, score_b)
}

/// Like [`score_match`] for scores that arrive as untyped JSON.
pub fn score_match_json(
    matches: &mut [Match],
    match_id: &str,
    score_a: &Value,
    score_b: &Value,
) -> Result<Match, EngineError> {
    let m = find_match(matches, match_id)?;
    let score_a = parse_score(score_a)?;
    let score_b = parse_score(score_b)?;
    apply_score(m, score_a, score_b)
}

/// Accepts JSON numbers with no fractional part that fit in an `i32`.
pub fn parse_score(value: &Value) -> Result<i32, EngineError> {
    let not_integer = || EngineError::NonIntegerScore(value.to_string());

    let Value::Number(number) = value else {
        return Err(not_integer());
    };

    if let Some(n) = number.as_i64() {
        return i32::try_from(n).map_err(|_| not_integer());
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => Ok(f as i32),
        _ => Err(not_integer()),
    }
}

fn find_match<'a>(matches: &'a mut [Match], match_id: &str) -> Result<&'a mut Match, EngineError> {
    matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or_else(|| EngineError::MatchNotFound(match_id.to_string()))
}

fn apply_score(m: &mut Match, score_a: i32, score_b: i32) -> Result<Match, EngineError> {
    if score_a == score_b {
        return Err(EngineError::TiedScore(score_a));
    }

    let winner = if score_a > score_b {
        m.team_a.clone()
    } else {
        m.team_b.clone()
    };

    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    m.winner = Some(winner);

    debug!(match_id = %m.id, score_a, score_b, winner = ?m.winner, "Recorded match score");
    Ok(m.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::ErrorKind;
    use crate::engine::models::{Phase, TeamId};
    use rstest::rstest;
    use serde_json::json;

    fn schedule() -> Vec<Match> {
        vec![
            Match::unplayed("RR-1", Phase::RoundRobin, "A".into(), "B".into()),
            Match::unplayed("RR-2", Phase::RoundRobin, "C".into(), "D".into()),
        ]
    }

    #[rstest]
    #[case(11, 7, "A")]
    #[case(9, 11, "B")]
    #[case(15, 13, "A")]
    #[case(0, 11, "B")]
    fn winner_is_higher_score(#[case] score_a: i32, #[case] score_b: i32, #[case] expected: &str) {
        let mut matches = schedule();
        let updated = score_match(&mut matches, "RR-1", score_a, score_b).unwrap();

        assert_eq!(updated.winner, Some(TeamId::from(expected)));
        assert_eq!(updated.score_a, Some(score_a));
        assert_eq!(updated.score_b, Some(score_b));
        assert_eq!(matches[0], updated);
        assert!(!matches[1].is_decided());
    }

    #[test]
    fn tie_is_rejected_without_mutation() {
        let mut matches = schedule();
        let err = score_match(&mut matches, "RR-1", 10, 10).unwrap_err();

        assert_eq!(err, EngineError::TiedScore(10));
        assert_eq!(err.kind(), ErrorKind::InvalidScore);
        assert_eq!(matches, schedule());
    }

    #[test]
    fn unknown_match_is_not_found() {
        let mut matches = schedule();
        let err = score_match(&mut matches, "RR-9", 11, 3).unwrap_err();
        assert_eq!(err, EngineError::MatchNotFound("RR-9".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn rescoring_overwrites_previous_result() {
        let mut matches = schedule();
        score_match(&mut matches, "RR-1", 11, 2).unwrap();
        let updated = score_match(&mut matches, "RR-1", 4, 11).unwrap();
        assert_eq!(updated.winner, Some(TeamId::from("B")));
        assert_eq!(matches[0].score_a, Some(4));
    }

    #[rstest]
    #[case(json!(11), Ok(11))]
    #[case(json!(11.0), Ok(11))]
    #[case(json!(-3), Ok(-3))]
    #[case(json!(11.5), Err(()))]
    #[case(json!("11"), Err(()))]
    #[case(json!(null), Err(()))]
    #[case(json!(5_000_000_000i64), Err(()))]
    fn parses_integer_scores_only(#[case] value: Value, #[case] expected: Result<i32, ()>) {
        assert_eq!(parse_score(&value).map_err(|_| ()), expected);
    }

    #[test]
    fn json_scoring_checks_existence_before_type() {
        let mut matches = schedule();
        let err = score_match_json(&mut matches, "RR-9", &json!("x"), &json!(3)).unwrap_err();
        assert!(matches!(err, EngineError::MatchNotFound(_)));

        let err = score_match_json(&mut matches, "RR-1", &json!("x"), &json!(3)).unwrap_err();
        assert!(matches!(err, EngineError::NonIntegerScore(_)));

        let err = score_match_json(&mut matches, "RR-1", &json!(6), &json!(6.0)).unwrap_err();
        assert_eq!(err, EngineError::TiedScore(6));
        assert_eq!(matches, schedule());

        let updated = score_match_json(&mut matches, "RR-2", &json!(11), &json!(13)).unwrap();
        assert_eq!(updated.winner, Some(TeamId::from("D")));
    }
}
