//! Ranking of table lines.
//!
//! Order, highest first: points, goal difference, goals scored, then (inside a real group only)
//! the results among the teams still level, then the order the lines came in.

use crate::logic::classifier::Criterion;
use crate::models::{GameMatch, Side, TableLine};
use std::cmp::Reverse;

/// Whether the lines come from one group (teams played each other) or from several.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RankMode {
    Group,
    CrossGroup,
}

fn primary_key(line: &TableLine) -> (Reverse<u32>, Reverse<i64>, Reverse<u32>) {
    (
        Reverse(line.points()),
        Reverse(line.goal_difference()),
        Reverse(line.goals_for),
    )
}

/// Rank `lines` best first. `matches` is only read in [`RankMode::Group`], for results between
/// teams still level on the primary criteria.
pub fn rank(mut lines: Vec<TableLine>, mode: RankMode, matches: &[GameMatch]) -> Vec<TableLine> {
    // Stable: fully level lines keep their input order.
    lines.sort_by_key(primary_key);
    if mode == RankMode::CrossGroup {
        return lines;
    }

    let mut start = 0;
    while start < lines.len() {
        let key = primary_key(&lines[start]);
        let end = start
            + lines[start..]
                .iter()
                .take_while(|l| primary_key(l) == key)
                .count();
        if end - start > 1 {
            break_tie(&mut lines[start..end], matches);
        }
        start = end;
    }
    lines
}

/// Re-order a cluster of level lines by points earned in matches among the cluster only. For two
/// teams this is exactly their head-to-head result.
fn break_tie(cluster: &mut [TableLine], matches: &[GameMatch]) {
    let group = cluster[0].group.clone();
    let members: Vec<String> = cluster.iter().map(|l| l.team.clone()).collect();
    let mutual: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| Criterion::Group(&group).matches(m) && m.scoreboard.played())
        .filter(|m| {
            Side::BOTH
                .iter()
                .all(|&s| members.contains(m.team_references.get(s)))
        })
        .collect();
    if mutual.is_empty() {
        return;
    }
    cluster.sort_by_cached_key(|line| Reverse(head_to_head_points(&line.team, &mutual)));
}

fn head_to_head_points(team: &str, mutual: &[&GameMatch]) -> u32 {
    let mut line = TableLine::new(team, "");
    for m in mutual {
        line.add_match_result(m);
    }
    line.points()
}
