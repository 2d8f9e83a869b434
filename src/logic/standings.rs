//! Group tables: fold match results into lines, then rank.

use crate::logic::classifier::{select, Criterion};
use crate::logic::tiebreak::{rank, RankMode};
use crate::models::{GameMatch, Group, TableLine};

/// Build the ranked table of `group` from scratch.
///
/// Starts with one empty line per team in configured order, folds every result of the group's
/// matches into both teams' lines (unplayed matches add nothing), then ranks.
pub fn build_table(group: &Group, matches: &[GameMatch]) -> Vec<TableLine> {
    let group_matches = select(matches, Criterion::Group(&group.id));
    let lines = group
        .teams
        .iter()
        .map(|team| {
            let mut line = TableLine::new(team.as_str(), group.id.as_str());
            for m in &group_matches {
                line.add_match_result(m);
            }
            line
        })
        .collect();
    rank(lines, RankMode::Group, matches)
}
