//! Cross-group pool of third-placed teams.

use crate::logic::tiebreak::{rank, RankMode};
use crate::models::{GameMatch, Group, TableLine};

/// Table position whose teams enter the pool.
pub const THIRD_PLACE: usize = 3;

/// The third-ranked line of each group (post table build), ranked across groups. Groups with
/// fewer than three teams are skipped.
pub fn aggregate_thirds<'a>(
    groups: impl IntoIterator<Item = &'a Group>,
    matches: &[GameMatch],
) -> Vec<TableLine> {
    let pool = groups
        .into_iter()
        .filter(|g| !g.is_third_placed())
        .filter_map(|g| g.line_at(THIRD_PLACE).cloned())
        .collect();
    rank(pool, RankMode::CrossGroup, matches)
}
