//! Team references: parsing and resolution to a concrete team.
//!
//! Grammar:
//! - `"<match id>"`: winner of that match.
//! - `"<group>:<n>"`: team ranked n-th (1-based) in a complete group.
//! - `"T:<group>/<group>/..."`: best third-placed team among the listed (complete) groups that no
//!   other fixture of the same round already holds.
//!
//! Resolution returns `Ok(None)` while prerequisite results are missing. Malformed strings and
//! references to unknown groups or matches are errors.

use crate::logic::classifier::group_complete;
use crate::logic::standings::build_table;
use crate::logic::third_place::THIRD_PLACE;
use crate::logic::tiebreak::{rank, RankMode};
use crate::models::{
    GameMatch, Group, GroupId, MatchId, Outcome, Side, TeamId, Tournament, TournamentError,
    THIRD_PLACED_GROUP_ID,
};
use std::str::FromStr;

const GROUP_SEPARATOR: char = ':';
const THIRD_PLACE_GROUP_SEPARATOR: char = '/';

/// Parsed team reference of a knockout slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reference {
    MatchWinner(MatchId),
    GroupPosition { group: GroupId, position: usize },
    ThirdPlaced(Vec<GroupId>),
}

impl FromStr for Reference {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TournamentError::MalformedReference(s.to_string());
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(malformed());
        }

        let Some((left, right)) = s.split_once(GROUP_SEPARATOR) else {
            if s.contains(THIRD_PLACE_GROUP_SEPARATOR) {
                return Err(malformed());
            }
            return Ok(Reference::MatchWinner(s.to_string()));
        };
        if left.is_empty() || right.is_empty() || left.contains(THIRD_PLACE_GROUP_SEPARATOR) {
            return Err(malformed());
        }

        if left == THIRD_PLACED_GROUP_ID {
            let groups: Vec<GroupId> = right
                .split(THIRD_PLACE_GROUP_SEPARATOR)
                .map(str::to_string)
                .collect();
            if groups
                .iter()
                .any(|g| g.is_empty() || g.contains(GROUP_SEPARATOR))
            {
                return Err(malformed());
            }
            return Ok(Reference::ThirdPlaced(groups));
        }

        match right.parse::<usize>() {
            Ok(position) if position > 0 => Ok(Reference::GroupPosition {
                group: left.to_string(),
                position,
            }),
            _ => Err(malformed()),
        }
    }
}

/// The knockout slot a reference is being resolved for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slot<'a> {
    pub match_id: &'a str,
    pub side: Side,
}

/// Resolve `reference` for `slot` against the current tournament state.
///
/// A winner reference reads the slots the referenced match holds now, so that match must be
/// resolved first. [`recompute`](crate::logic::recompute) orders knockout matches accordingly.
pub fn resolve(
    tournament: &Tournament,
    reference: &str,
    slot: Slot<'_>,
) -> Result<Option<TeamId>, TournamentError> {
    match reference.parse::<Reference>()? {
        Reference::MatchWinner(id) => match_winner(tournament, &id),
        Reference::GroupPosition { group, position } => {
            group_position(tournament, &group, position)
        }
        Reference::ThirdPlaced(groups) => third_placed(tournament, &groups, slot),
    }
}

fn match_winner(tournament: &Tournament, id: &str) -> Result<Option<TeamId>, TournamentError> {
    let m = tournament
        .get_match(id)
        .ok_or_else(|| TournamentError::UnknownMatch(id.to_string()))?;
    let Some(outcome) = m.scoreboard.outcome() else {
        return Ok(None);
    };
    let (Some(home), Some(away)) = (slot_team(m, Side::Home), slot_team(m, Side::Away)) else {
        return Ok(None);
    };

    Ok(match outcome {
        Outcome::Home => Some(home),
        Outcome::Away => Some(away),
        Outcome::Draw => {
            log::debug!("match {} ended level, no winner", id);
            None
        }
    })
}

/// Team on one side of `m`: the fixed team of a group match, or the current slot of a knockout
/// match.
fn slot_team(m: &GameMatch, side: Side) -> Option<TeamId> {
    if m.is_group_match() {
        return Some(m.team_references.get(side).clone());
    }
    m.teams.get(side).clone()
}

fn group_position(
    tournament: &Tournament,
    group_id: &str,
    position: usize,
) -> Result<Option<TeamId>, TournamentError> {
    let group = tournament
        .group(group_id)
        .ok_or_else(|| TournamentError::UnknownGroup(group_id.to_string()))?;
    if position > group.teams.len() {
        return Err(TournamentError::TablePositionOutOfRange {
            group: group.id.clone(),
            position,
        });
    }
    if !group_complete(&tournament.matches, group_id) {
        return Ok(None);
    }
    let table = build_table(group, &tournament.matches);
    Ok(table.get(position - 1).map(|line| line.team.clone()))
}

fn third_placed(
    tournament: &Tournament,
    group_ids: &[GroupId],
    slot: Slot<'_>,
) -> Result<Option<TeamId>, TournamentError> {
    let mut groups = group_ids
        .iter()
        .map(|id| {
            tournament
                .groups
                .iter()
                .enumerate()
                .find(|(_, g)| &g.id == id)
                .ok_or_else(|| TournamentError::UnknownGroup(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    // Level thirds fall back to tournament group order, not the order listed in the reference.
    groups.sort_by_key(|&(index, _)| index);
    let groups: Vec<&Group> = groups.into_iter().map(|(_, g)| g).collect();
    if let Some(short) = groups.iter().find(|g| g.teams.len() < THIRD_PLACE) {
        return Err(TournamentError::TablePositionOutOfRange {
            group: short.id.clone(),
            position: THIRD_PLACE,
        });
    }
    if !groups
        .iter()
        .all(|g| group_complete(&tournament.matches, &g.id))
    {
        return Ok(None);
    }

    let pool = groups
        .iter()
        .filter_map(|g| {
            build_table(g, &tournament.matches)
                .into_iter()
                .nth(THIRD_PLACE - 1)
        })
        .collect();
    let pool = rank(pool, RankMode::CrossGroup, &tournament.matches);

    let claimed = claimed_in_round(tournament, slot)?;
    let pick = pool
        .into_iter()
        .map(|line| line.team)
        .find(|team| !claimed.contains(team));
    if pick.is_none() {
        log::debug!(
            "no unclaimed third-placed team among {:?} for {} {}",
            group_ids,
            slot.match_id,
            slot.side
        );
    }
    Ok(pick)
}

/// Teams currently held by every other slot of the same round as `slot`.
fn claimed_in_round(
    tournament: &Tournament,
    slot: Slot<'_>,
) -> Result<Vec<TeamId>, TournamentError> {
    let own = tournament
        .get_match(slot.match_id)
        .ok_or_else(|| TournamentError::UnknownMatch(slot.match_id.to_string()))?;
    let claimed = tournament
        .matches
        .iter()
        .filter(|m| m.category == own.category)
        .flat_map(|m| Side::BOTH.into_iter().map(move |side| (m, side)))
        .filter(|(m, side)| !(m.id == slot.match_id && *side == slot.side))
        .filter_map(|(m, side)| m.teams.get(side).clone())
        .collect();
    Ok(claimed)
}
