//! Shared fixture: four groups of four feeding a seven-match bracket.
//!
//! Knockout:
//! - KO1 "A:1" v "T:B/C/D", KO2 "B:1" v "T:A/C/D", KO3 "C:1" v "D:2", KO4 "D:1" v "C:2" (KO:8)
//! - KO5 "KO1" v "KO2", KO6 "KO3" v "KO4" (KO:2)
//! - KO7 "KO5" v "KO6" (KO:1)

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use football_tournament_web::{
    set_score_periods, GameMatch, Group, Score, Team, Tournament,
};

pub const GROUPS: [&str; 4] = ["A", "B", "C", "D"];

/// Pairings (team indexes) of a four-team round robin, in fixture order.
pub const PAIRINGS: [(usize, usize); 6] = [(0, 1), (2, 3), (0, 2), (3, 1), (3, 0), (1, 2)];

pub fn kickoff(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 6, day)
        .and_then(|d| d.and_hms_opt(21, 0, 0))
        .unwrap()
}

/// Team ids of a group: "A1".."A4".
pub fn team_ids(group: &str) -> Vec<String> {
    (1..=4).map(|i| format!("{group}{i}")).collect()
}

/// Match id of the n-th (0-based) fixture of a group: "A-1".."A-6".
pub fn group_match_id(group: &str, n: usize) -> String {
    format!("{group}-{}", n + 1)
}

pub fn group_matches(group: &str, teams: &[String]) -> Vec<GameMatch> {
    PAIRINGS
        .iter()
        .enumerate()
        .map(|(n, &(h, a))| {
            GameMatch::new(
                group_match_id(group, n),
                format!("venue-{}", n % 3),
                kickoff(10 + n as u32),
                format!("G:{group}"),
                teams[h].clone(),
                teams[a].clone(),
            )
        })
        .collect()
}

fn knockout(id: &str, day: u32, category: &str, home: &str, away: &str) -> GameMatch {
    GameMatch::new(id, "venue-ko", kickoff(day), category, home, away)
}

pub fn tournament() -> Tournament {
    let mut teams = Vec::new();
    let mut groups = Vec::new();
    let mut matches = Vec::new();
    for g in GROUPS {
        let ids = team_ids(g);
        teams.extend(ids.iter().map(|id| Team::new(id.clone(), format!("Team {id}"))));
        matches.extend(group_matches(g, &ids));
        groups.push(Group::new(g, format!("Group {g}"), ids));
    }
    matches.extend([
        knockout("KO1", 25, "KO:8", "A:1", "T:B/C/D"),
        knockout("KO2", 25, "KO:8", "B:1", "T:A/C/D"),
        knockout("KO3", 26, "KO:8", "C:1", "D:2"),
        knockout("KO4", 26, "KO:8", "D:1", "C:2"),
        knockout("KO5", 28, "KO:2", "KO1", "KO2"),
        knockout("KO6", 28, "KO:2", "KO3", "KO4"),
        knockout("KO7", 30, "KO:1", "KO5", "KO6"),
    ]);
    Tournament::new(teams, groups, matches)
}

pub fn play(t: &mut Tournament, match_id: &str, home: u32, away: u32) {
    set_score_periods(t, match_id, vec![Score::new(home, away)]).unwrap();
}

/// Play every fixture of a group so teams finish in configured order (9, 6, 3, 0 points).
/// The lower index wins 1-0, except the third team beats the fourth by `third_margin`, which
/// sets the third-placed team's goal difference to `third_margin - 2`.
pub fn play_group_in_order(t: &mut Tournament, group: &str, third_margin: u32) {
    for (n, &(h, a)) in PAIRINGS.iter().enumerate() {
        let margin = if (h.min(a), h.max(a)) == (2, 3) { third_margin } else { 1 };
        let (home, away) = if h < a { (margin, 0) } else { (0, margin) };
        play(t, &group_match_id(group, n), home, away);
    }
}

/// Play every fixture of a group except the last one.
pub fn play_group_but_last(t: &mut Tournament, group: &str, third_margin: u32) {
    play_group_in_order(t, group, third_margin);
    football_tournament_web::clear_scoreboard(t, &group_match_id(group, 5)).unwrap();
}

pub fn slot(t: &Tournament, match_id: &str) -> (Option<String>, Option<String>) {
    let m = t.get_match(match_id).unwrap();
    (m.teams.home.clone(), m.teams.away.clone())
}
