//! Recompute pass: group match teams, group tables and the third-place pool, knockout slots.

use crate::logic::resolver::{resolve, Reference, Slot};
use crate::logic::standings::build_table;
use crate::logic::third_place::aggregate_thirds;
use crate::models::{
    GameMatch, MatchId, Side, TeamId, Tournament, TournamentError, KNOCKOUT_CATEGORY_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Which phases a recompute runs. Selected phases always run in dependency order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Phases {
    #[serde(default)]
    pub assign_group_teams: bool,
    #[serde(default)]
    pub build_tables: bool,
    #[serde(default)]
    pub resolve_knockout: bool,
}

impl Phases {
    pub const ALL: Phases = Phases {
        assign_group_teams: true,
        build_tables: true,
        resolve_knockout: true,
    };
}

/// A slot that could not be filled because its reference or data is broken.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotError {
    pub match_id: MatchId,
    pub side: Side,
    pub error: TournamentError,
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match {} ({}): {}", self.match_id, self.side, self.error)
    }
}

/// Outcome of one recompute.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecomputeReport {
    pub errors: Vec<SlotError>,
    /// Knockout slots holding a team after the pass.
    pub resolved: usize,
    /// Knockout slots left empty: waiting for results, or broken (see `errors`).
    pub unresolved: usize,
}

impl RecomputeReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run the selected phases over `tournament`.
///
/// Every slot and table touched is overwritten from current inputs, so running this again without
/// changes gives the same state. A broken slot is nulled and reported; the others still resolve.
pub fn recompute(tournament: &mut Tournament, phases: Phases) -> RecomputeReport {
    let mut report = RecomputeReport::default();
    if phases.assign_group_teams {
        assign_group_teams(tournament, &mut report);
    }
    if phases.build_tables {
        build_tables(tournament);
    }
    if phases.resolve_knockout {
        resolve_knockout(tournament, &mut report);
    }
    for e in &report.errors {
        log::warn!("{}", e);
    }
    log::info!(
        "recompute {:?}: {} knockout slot(s) resolved, {} open, {} error(s)",
        phases,
        report.resolved,
        report.unresolved,
        report.errors.len()
    );
    report
}

/// Group matches take their teams straight from their references.
fn assign_group_teams(tournament: &mut Tournament, report: &mut RecomputeReport) {
    for i in 0..tournament.matches.len() {
        if !tournament.matches[i].is_group_match() {
            continue;
        }
        for side in Side::BOTH {
            let reference = tournament.matches[i].team_references.get(side).clone();
            let team = if tournament.team(&reference).is_some() {
                Some(reference)
            } else {
                report.errors.push(SlotError {
                    match_id: tournament.matches[i].id.clone(),
                    side,
                    error: TournamentError::UnknownTeam(reference),
                });
                None
            };
            *tournament.matches[i].teams.get_mut(side) = team;
        }
    }
}

fn build_tables(tournament: &mut Tournament) {
    let tables: Vec<_> = tournament
        .groups
        .iter()
        .map(|g| build_table(g, &tournament.matches))
        .collect();
    for (group, table) in tournament.groups.iter_mut().zip(tables) {
        group.table = table;
    }
    tournament.third_placed.table = aggregate_thirds(&tournament.groups, &tournament.matches);
}

/// Knockout slots are resolved one at a time in [`knockout_order`], so a winner reference reads
/// slots already filled in this pass and a third-place pick sees the picks made before it.
fn resolve_knockout(tournament: &mut Tournament, report: &mut RecomputeReport) {
    let (order, circular) = knockout_order(tournament);
    for i in order {
        for side in Side::BOTH {
            let match_id = tournament.matches[i].id.clone();
            let reference = tournament.matches[i].team_references.get(side).clone();
            let slot = Slot {
                match_id: &match_id,
                side,
            };
            let resolved = if circular.contains(&(i, side)) {
                Err(TournamentError::CircularReference(reference.clone()))
            } else {
                resolve(tournament, &reference, slot)
            };
            let team: Option<TeamId> = match resolved {
                Ok(team) => team,
                Err(error) => {
                    report.errors.push(SlotError {
                        match_id: match_id.clone(),
                        side,
                        error,
                    });
                    None
                }
            };

            let current = tournament.matches[i].teams.get_mut(side);
            if *current != team {
                log::debug!("match {} {}: {:?} -> {:?}", match_id, side, current, team);
            }
            match team {
                Some(_) => report.resolved += 1,
                None => report.unresolved += 1,
            }
            *current = team;
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Indexes of the knockout matches, earliest round first (most fixtures), snapshot order within a
/// round, and every match after the knockout matches its winner references name. Also returns
/// the slots whose winner reference closes a cycle.
fn knockout_order(tournament: &Tournament) -> (Vec<usize>, Vec<(usize, Side)>) {
    let matches = &tournament.matches;
    let mut roots: Vec<usize> = (0..matches.len())
        .filter(|&i| matches[i].is_knockout())
        .collect();
    roots.sort_by_key(|&i| Reverse(round_size(&matches[i])));

    let mut state = vec![Visit::New; matches.len()];
    let mut order = Vec::with_capacity(roots.len());
    let mut circular = Vec::new();
    for root in roots {
        visit(matches, root, &mut state, &mut order, &mut circular);
    }
    (order, circular)
}

fn visit(
    matches: &[GameMatch],
    i: usize,
    state: &mut [Visit],
    order: &mut Vec<usize>,
    circular: &mut Vec<(usize, Side)>,
) {
    if state[i] != Visit::New {
        return;
    }
    state[i] = Visit::Active;
    for side in Side::BOTH {
        let Ok(Reference::MatchWinner(id)) = matches[i].team_references.get(side).parse::<Reference>()
        else {
            continue;
        };
        // Unknown ids are reported by the resolver; group matches need no ordering.
        let Some(dep) = matches.iter().position(|m| m.id == id && m.is_knockout()) else {
            continue;
        };
        match state[dep] {
            Visit::New => visit(matches, dep, state, order, circular),
            Visit::Active => circular.push((i, side)),
            Visit::Done => {}
        }
    }
    state[i] = Visit::Done;
    order.push(i);
}

/// Fixtures in the round, from a "KO:<n>" category. Zero when the count is missing.
fn round_size(m: &GameMatch) -> u32 {
    m.category
        .strip_prefix(KNOCKOUT_CATEGORY_PREFIX)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}
