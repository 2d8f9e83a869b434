//! Match (game), scoreboard, and the home/away pair used for team references and slots.

use crate::models::team::TeamId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match (e.g. "KO5").
pub type MatchId = String;

/// Category prefix of a group match: "G:<group id>".
pub const GROUP_CATEGORY_PREFIX: &str = "G:";
/// Category prefix of a knockout match: "KO:<fixtures in round>".
pub const KNOCKOUT_CATEGORY_PREFIX: &str = "KO";

/// Which side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// A home/away pair of values.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair<T> {
    pub home: T,
    pub away: T,
}

impl<T> Pair<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// Goals in one period (half, extra time, shoot-out).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Goals (scored, conceded) from one side's point of view.
    pub fn for_side(&self, side: Side) -> (u32, u32) {
        match side {
            Side::Home => (self.home, self.away),
            Side::Away => (self.away, self.home),
        }
    }
}

/// Decision of a played match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Home,
    Away,
    Draw,
}

/// Recorded periods of a match. Empty means not yet played.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    #[serde(default)]
    pub periods: Vec<Score>,
}

impl Scoreboard {
    pub fn played(&self) -> bool {
        !self.periods.is_empty()
    }

    /// Sum of all periods.
    pub fn final_score(&self) -> Score {
        self.periods.iter().fold(Score::default(), |acc, p| {
            Score::new(acc.home.saturating_add(p.home), acc.away.saturating_add(p.away))
        })
    }

    /// None if not yet played.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.played() {
            return None;
        }
        let total = self.final_score();
        Some(match total.home.cmp(&total.away) {
            std::cmp::Ordering::Greater => Outcome::Home,
            std::cmp::Ordering::Less => Outcome::Away,
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}

/// A single fixture. `team_references` are the raw strings from the snapshot; `teams` are the
/// resolved slots, filled by the orchestrator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub venue: String,
    pub kickoff: NaiveDateTime,
    /// "G:<group>" for group matches, "KO:<n>" for knockout rounds.
    pub category: String,
    pub team_references: Pair<String>,
    /// None until resolved.
    #[serde(default)]
    pub teams: Pair<Option<TeamId>>,
    #[serde(default)]
    pub scoreboard: Scoreboard,
}

impl GameMatch {
    pub fn new(
        id: impl Into<MatchId>,
        venue: impl Into<String>,
        kickoff: NaiveDateTime,
        category: impl Into<String>,
        home_reference: impl Into<String>,
        away_reference: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            venue: venue.into(),
            kickoff,
            category: category.into(),
            team_references: Pair::new(home_reference.into(), away_reference.into()),
            teams: Pair::default(),
            scoreboard: Scoreboard::default(),
        }
    }

    /// Group id if this is a group match.
    pub fn group_id(&self) -> Option<&str> {
        self.category
            .strip_prefix(GROUP_CATEGORY_PREFIX)
            .filter(|g| !g.is_empty())
    }

    pub fn is_group_match(&self) -> bool {
        self.group_id().is_some()
    }

    pub fn is_knockout(&self) -> bool {
        self.category.starts_with(KNOCKOUT_CATEGORY_PREFIX)
    }

    pub fn involves(&self, team: &str) -> bool {
        Side::BOTH
            .iter()
            .any(|&s| self.teams.get(s).as_deref() == Some(team))
    }
}
