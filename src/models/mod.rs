//! Data structures for the football tournament: teams, groups, matches, tournament snapshot.

mod game;
mod group;
mod team;
mod tournament;

pub use game::{
    GameMatch, MatchId, Outcome, Pair, Score, Scoreboard, Side, GROUP_CATEGORY_PREFIX,
    KNOCKOUT_CATEGORY_PREFIX,
};
pub use group::{
    Group, GroupId, TableLine, POINTS_PER_DRAW, POINTS_PER_WIN, THIRD_PLACED_GROUP_ID,
};
pub use team::{Settings, Team, TeamId, Venue};
pub use tournament::{Tournament, TournamentError, TournamentId};
