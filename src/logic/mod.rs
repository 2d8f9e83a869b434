//! Tournament engine: match selection, group tables, tie-breaks, third-place pool, knockout
//! reference resolution and the recompute pass that ties them together.

mod classifier;
mod orchestrator;
mod resolver;
mod results;
mod standings;
mod third_place;
mod tiebreak;

pub use classifier::{group_complete, select, Criterion};
pub use orchestrator::{recompute, Phases, RecomputeReport, SlotError};
pub use resolver::{resolve, Reference, Slot};
pub use results::{add_score_period, clear_scoreboard, set_score_periods};
pub use standings::build_table;
pub use third_place::{aggregate_thirds, THIRD_PLACE};
pub use tiebreak::{rank, RankMode};
