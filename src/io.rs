//! Snapshot persistence (JSON) and result import (CSV) for the host.

use crate::logic::set_score_periods;
use crate::models::{Score, Tournament, TournamentError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Errors loading, saving or importing tournament data.
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    /// Snapshot parsed but is inconsistent.
    Invalid(TournamentError),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {}", e),
            SnapshotError::Json(e) => write!(f, "Invalid snapshot JSON: {}", e),
            SnapshotError::Csv(e) => write!(f, "Invalid results CSV: {}", e),
            SnapshotError::Invalid(e) => write!(f, "Inconsistent snapshot: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(e) => Some(e),
            SnapshotError::Json(e) => Some(e),
            SnapshotError::Csv(e) => Some(e),
            SnapshotError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl From<csv::Error> for SnapshotError {
    fn from(e: csv::Error) -> Self {
        SnapshotError::Csv(e)
    }
}

impl From<TournamentError> for SnapshotError {
    fn from(e: TournamentError) -> Self {
        SnapshotError::Invalid(e)
    }
}

/// Parse and validate a JSON snapshot. Tables and the third-place pool are left for
/// `recompute` to rebuild.
pub fn parse_snapshot(json: &str) -> Result<Tournament, SnapshotError> {
    let tournament: Tournament = serde_json::from_str(json)?;
    tournament.validate()?;
    Ok(tournament)
}

/// Load and validate a JSON snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Tournament, SnapshotError> {
    let json = std::fs::read_to_string(path)?;
    parse_snapshot(&json)
}

/// Write the snapshot as pretty JSON. The third-place pool is not written.
pub fn save_snapshot(tournament: &Tournament, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(tournament)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// One scoreboard period in a results file.
#[derive(Debug, Deserialize)]
struct PeriodRecord {
    match_id: String,
    home: u32,
    away: u32,
}

/// Import results from CSV with header `match_id,home,away`, one row per period.
///
/// Every match listed gets its periods replaced by its rows, in file order. Nothing is applied
/// unless the whole file parses and every match exists. Returns the number of matches updated.
pub fn import_results_csv<R: std::io::Read>(
    tournament: &mut Tournament,
    reader: R,
) -> Result<usize, SnapshotError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut order: Vec<String> = Vec::new();
    let mut periods: HashMap<String, Vec<Score>> = HashMap::new();
    for record in rdr.deserialize() {
        let record: PeriodRecord = record?;
        if tournament.get_match(&record.match_id).is_none() {
            return Err(TournamentError::UnknownMatch(record.match_id).into());
        }
        let entry = periods.entry(record.match_id.clone()).or_insert_with(|| {
            order.push(record.match_id.clone());
            Vec::new()
        });
        entry.push(Score::new(record.home, record.away));
    }

    for match_id in &order {
        let scores = periods.remove(match_id).unwrap_or_default();
        set_score_periods(tournament, match_id, scores)?;
    }
    log::info!("imported results for {} match(es)", order.len());
    Ok(order.len())
}
