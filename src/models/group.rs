//! Group and TableLine (one team's standings row).

use crate::models::game::{GameMatch, Side};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a group (a single letter in practice).
pub type GroupId = String;

/// Reserved id of the synthetic group that pools the third-placed teams.
pub const THIRD_PLACED_GROUP_ID: &str = "T";

/// Points for a win / draw.
pub const POINTS_PER_WIN: u32 = 3;
pub const POINTS_PER_DRAW: u32 = 1;

/// One team's accumulated group-stage record.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableLine {
    pub team: TeamId,
    /// Group the record was earned in (kept when copied into the third-place pool).
    pub group: GroupId,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TableLine {
    /// Empty line for a team.
    pub fn new(team: impl Into<TeamId>, group: impl Into<GroupId>) -> Self {
        Self {
            team: team.into(),
            group: group.into(),
            ..Default::default()
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn points(&self) -> u32 {
        self.wins * POINTS_PER_WIN + self.draws * POINTS_PER_DRAW
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Fold one match result into this line. Matches this team did not play, or that are
    /// unplayed, contribute nothing.
    pub fn add_match_result(&mut self, m: &GameMatch) {
        if !m.scoreboard.played() {
            return;
        }
        let side = match Side::BOTH
            .into_iter()
            .find(|&s| *m.team_references.get(s) == self.team)
        {
            Some(s) => s,
            None => return,
        };
        let (scored, conceded) = m.scoreboard.final_score().for_side(side);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }
}

/// A group: its teams in configured order and the current ranked table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Teams in configured order (the last-resort tie-break order).
    pub teams: Vec<TeamId>,
    /// Ranked table, rebuilt on every recompute. Ignored on load.
    #[serde(default, skip_deserializing)]
    pub table: Vec<TableLine>,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, teams: Vec<TeamId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            teams,
            table: Vec::new(),
        }
    }

    /// The synthetic group pooling third-placed teams. Never persisted.
    pub fn third_placed() -> Self {
        Self::new(THIRD_PLACED_GROUP_ID, "Third place", Vec::new())
    }

    pub fn is_third_placed(&self) -> bool {
        self.id == THIRD_PLACED_GROUP_ID
    }

    /// Line at a 1-based position.
    pub fn line_at(&self, position: usize) -> Option<&TableLine> {
        position.checked_sub(1).and_then(|i| self.table.get(i))
    }
}
