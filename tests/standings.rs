//! Integration tests for group tables, tie-breaks and the third-place pool.

mod common;

use common::{group_match_id, play, play_group_in_order, team_ids, tournament};
use football_tournament_web::{
    aggregate_thirds, build_table, rank, recompute, select, Criterion, GameMatch, Group, Phases,
    RankMode, Score, TableLine, Team, Tournament,
};

fn order(lines: &[TableLine]) -> Vec<&str> {
    lines.iter().map(|l| l.team.as_str()).collect()
}

#[test]
fn distinct_points_rank_by_points() {
    let mut t = tournament();
    play_group_in_order(&mut t, "A", 3);
    let group = t.group("A").unwrap();
    let table = build_table(group, &t.matches);

    assert_eq!(order(&table), vec!["A1", "A2", "A3", "A4"]);
    let points: Vec<u32> = table.iter().map(|l| l.points()).collect();
    assert_eq!(points, vec![9, 6, 3, 0]);
    assert!(table.iter().all(|l| l.played() == 3));
}

#[test]
fn unplayed_group_keeps_configured_order() {
    let t = tournament();
    let table = build_table(t.group("B").unwrap(), &t.matches);
    assert_eq!(order(&table), vec!["B1", "B2", "B3", "B4"]);
    assert!(table.iter().all(|l| l.played() == 0 && l.points() == 0));
}

/// One group "E" with `ids` in configured order and every fixture played with one period.
fn single_group(ids: &[&str], fixtures: &[(&str, &str, &str, u32, u32)]) -> Tournament {
    let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    let teams = ids.iter().map(|id| Team::new(id.clone(), id.clone())).collect();
    let group = Group::new("E", "Group E", ids);
    let matches = fixtures
        .iter()
        .map(|&(id, home, away, hg, ag)| {
            let mut m = GameMatch::new(id, "v", common::kickoff(11), "G:E", home, away);
            m.scoreboard.periods.push(Score::new(hg, ag));
            m
        })
        .collect();
    Tournament::new(teams, vec![group], matches)
}

/// W and X finish level on points (4), goal difference (0) and goals (3); W won their meeting 2-1.
fn head_to_head_group() -> Tournament {
    single_group(
        &["X", "Y", "Z", "W"],
        &[
            ("E-1", "W", "X", 2, 1),
            ("E-2", "Y", "W", 1, 0),
            ("E-3", "W", "Z", 1, 1),
            ("E-4", "X", "Y", 1, 0),
            ("E-5", "Z", "X", 1, 1),
            ("E-6", "Y", "Z", 3, 0),
        ],
    )
}

#[test]
fn head_to_head_breaks_full_tie() {
    let t = head_to_head_group();
    let table = build_table(&t.groups[0], &t.matches);

    assert_eq!(order(&table), vec!["Y", "W", "X", "Z"]);
    let (w, x) = (&table[1], &table[2]);
    assert_eq!((w.points(), w.goal_difference(), w.goals_for), (4, 0, 3));
    assert_eq!((x.points(), x.goal_difference(), x.goals_for), (4, 0, 3));
}

#[test]
fn three_way_tie_ranked_by_results_among_them() {
    // P, Q and R: 4 points, goal difference 0, 2 goals each. S has 4 goals and ranks first.
    // Among the three: R 4 points, Q 3, P 1.
    let t = single_group(
        &["P", "Q", "R", "S"],
        &[
            ("E-1", "P", "Q", 0, 1),
            ("E-2", "Q", "R", 0, 1),
            ("E-3", "P", "R", 0, 0),
            ("E-4", "S", "P", 1, 2),
            ("E-5", "Q", "S", 1, 1),
            ("E-6", "R", "S", 1, 2),
        ],
    );
    let table = build_table(&t.groups[0], &t.matches);

    assert_eq!(order(&table), vec!["S", "R", "Q", "P"]);
    for line in &table[1..] {
        assert_eq!((line.points(), line.goal_difference(), line.goals_for), (4, 0, 2));
    }
}

#[test]
fn three_way_circle_keeps_configured_order() {
    // Q beat P, R beat Q, P beat R, all 1-0; each drew S 0-0.
    let t = single_group(
        &["R", "P", "Q", "S"],
        &[
            ("E-1", "P", "Q", 0, 1),
            ("E-2", "Q", "R", 0, 1),
            ("E-3", "P", "R", 1, 0),
            ("E-4", "S", "P", 0, 0),
            ("E-5", "Q", "S", 0, 0),
            ("E-6", "R", "S", 0, 0),
        ],
    );
    let table = build_table(&t.groups[0], &t.matches);

    assert_eq!(order(&table), vec!["R", "P", "Q", "S"]);
    assert_eq!(table[3].points(), 3);
}

#[test]
fn head_to_head_ignored_across_groups() {
    let t = head_to_head_group();
    let table = build_table(&t.groups[0], &t.matches);
    // X before W in input: without head-to-head the input order stands.
    let pool = vec![table[2].clone(), table[1].clone()];
    let ranked = rank(pool, RankMode::CrossGroup, &t.matches);
    assert_eq!(order(&ranked), vec!["X", "W"]);
}

#[test]
fn ranking_ignores_match_order() {
    let mut t = tournament();
    play_group_in_order(&mut t, "A", 3);
    play(&mut t, &group_match_id("A", 0), 0, 0);
    let expected = build_table(t.group("A").unwrap(), &t.matches);

    let mut reversed = t.matches.clone();
    reversed.reverse();
    for _ in 0..3 {
        assert_eq!(build_table(t.group("A").unwrap(), &reversed), expected);
    }
}

#[test]
fn third_place_pool_ranks_across_groups() {
    let mut t = tournament();
    for (g, margin) in [("A", 2), ("B", 1), ("C", 5), ("D", 4)] {
        play_group_in_order(&mut t, g, margin);
    }
    recompute(&mut t, Phases::ALL);

    assert_eq!(order(&t.third_placed.table), vec!["C3", "D3", "A3", "B3"]);
    assert_eq!(aggregate_thirds(&t.groups, &t.matches), t.third_placed.table);
    assert!(t.third_placed.table.iter().all(|l| l.team.ends_with('3')));
}

#[test]
fn tables_are_rebuilt_not_patched() {
    let mut t = tournament();
    play_group_in_order(&mut t, "C", 2);
    recompute(&mut t, Phases::ALL);
    recompute(&mut t, Phases::ALL);

    let group = t.group("C").unwrap();
    assert_eq!(group.table[0].wins, 3);
    assert_eq!(group.table.iter().map(|l| l.played()).sum::<u32>(), 12);
}

#[test]
fn classifier_selects_by_each_criterion() {
    let mut t = tournament();
    play_group_in_order(&mut t, "A", 3);
    recompute(&mut t, Phases::ALL);
    let ids = team_ids("A");
    let a1 = &ids[0];

    assert_eq!(select(&t.matches, Criterion::Group("A")).len(), 6);
    // Three group fixtures plus KO1, where "A:1" has resolved.
    assert_eq!(select(&t.matches, Criterion::Team(a1)).len(), 4);
    assert_eq!(select(&t.matches, Criterion::Category("KO")).len(), 7);
    assert_eq!(select(&t.matches, Criterion::Category("KO:8")).len(), 4);
    assert_eq!(select(&t.matches, Criterion::Played(true)).len(), 6);
    assert_eq!(select(&t.matches, Criterion::Played(false)).len(), 25);
    assert_eq!(select(&t.matches, Criterion::Venue("venue-ko")).len(), 7);
    assert_eq!(
        select(&t.matches, Criterion::Date(common::kickoff(25).date())).len(),
        2
    );

    let ids: Vec<&str> = select(&t.matches, Criterion::Group("B"))
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["B-1", "B-2", "B-3", "B-4", "B-5", "B-6"]);
}
