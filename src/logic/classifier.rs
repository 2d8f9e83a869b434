//! Match selection by a single criterion.

use crate::models::GameMatch;
use chrono::NaiveDate;

/// What to select matches by. Exactly one key per selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Criterion<'a> {
    /// Venue id equality.
    Venue(&'a str),
    /// Either resolved slot holds this team.
    Team(&'a str),
    /// Group match of this group.
    Group(&'a str),
    /// Kickoff on this date.
    Date(NaiveDate),
    /// Category contains this substring (e.g. "KO", "KO:8").
    Category(&'a str),
    /// Played (true) or unplayed (false).
    Played(bool),
}

impl Criterion<'_> {
    pub fn matches(&self, m: &GameMatch) -> bool {
        match *self {
            Criterion::Venue(venue) => m.venue == venue,
            Criterion::Team(team) => m.involves(team),
            Criterion::Group(group) => m.group_id() == Some(group),
            Criterion::Date(date) => m.kickoff.date() == date,
            Criterion::Category(part) => m.category.contains(part),
            Criterion::Played(played) => m.scoreboard.played() == played,
        }
    }
}

/// Matches satisfying `criterion`, in their original order.
pub fn select<'a>(matches: &'a [GameMatch], criterion: Criterion<'_>) -> Vec<&'a GameMatch> {
    matches.iter().filter(|m| criterion.matches(m)).collect()
}

/// A group is complete when none of its matches is unplayed.
pub fn group_complete(matches: &[GameMatch], group: &str) -> bool {
    matches
        .iter()
        .filter(|m| Criterion::Group(group).matches(m))
        .all(|m| m.scoreboard.played())
}
