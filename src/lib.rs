//! Football tournament web app: library with models, the standings/bracket engine, and
//! snapshot helpers.

pub mod config;
pub mod io;
pub mod logic;
pub mod models;

pub use logic::{
    add_score_period, aggregate_thirds, build_table, clear_scoreboard, group_complete, rank,
    recompute, resolve, select, set_score_periods, Criterion, Phases, RankMode, RecomputeReport,
    Reference, Slot, SlotError,
};
pub use models::{
    GameMatch, Group, GroupId, MatchId, Outcome, Pair, Score, Scoreboard, Settings, Side,
    TableLine, Team, TeamId, Tournament, TournamentError, TournamentId, Venue,
    THIRD_PLACED_GROUP_ID,
};
