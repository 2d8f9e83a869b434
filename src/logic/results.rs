//! Scoreboard mutation entry points. These do not recompute; call
//! [`recompute`](crate::logic::recompute) afterwards.

use crate::models::{MatchId, Score, Tournament, TournamentError};

/// Append one period to a match's scoreboard.
pub fn add_score_period(
    tournament: &mut Tournament,
    match_id: &str,
    score: Score,
) -> Result<(), TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or_else(|| TournamentError::UnknownMatch(match_id.to_string()))?;
    m.scoreboard.periods.push(score);
    log::debug!("match {}: recorded period {}-{}", m.id, score.home, score.away);
    Ok(())
}

/// Replace all periods of a match's scoreboard.
pub fn set_score_periods(
    tournament: &mut Tournament,
    match_id: &str,
    periods: Vec<Score>,
) -> Result<(), TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or_else(|| TournamentError::UnknownMatch(match_id.to_string()))?;
    m.scoreboard.periods = periods;
    Ok(())
}

/// Remove every period, making the match unplayed again.
pub fn clear_scoreboard(tournament: &mut Tournament, match_id: &str) -> Result<MatchId, TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or_else(|| TournamentError::UnknownMatch(match_id.to_string()))?;
    m.scoreboard.periods.clear();
    Ok(m.id.clone())
}
