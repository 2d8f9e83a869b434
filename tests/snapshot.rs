//! Integration tests for snapshot validation, JSON persistence and CSV result import.

mod common;

use common::{slot, tournament};
use football_tournament_web::io::{import_results_csv, load_snapshot, parse_snapshot, save_snapshot, SnapshotError};
use football_tournament_web::{recompute, Group, Phases, Team, TournamentError, THIRD_PLACED_GROUP_ID};

#[test]
fn fixture_is_valid() {
    assert_eq!(tournament().validate(), Ok(()));
}

#[test]
fn validate_rejects_reserved_group_id() {
    let mut t = tournament();
    t.groups.push(Group::new(THIRD_PLACED_GROUP_ID, "Third", Vec::new()));
    assert_eq!(t.validate(), Err(TournamentError::ReservedGroupId));
}

#[test]
fn validate_rejects_duplicates_and_unknown_teams() {
    let mut t = tournament();
    t.teams.push(Team::new("A1", "Again"));
    assert_eq!(t.validate(), Err(TournamentError::DuplicateId("A1".to_string())));

    let mut t = tournament();
    t.matches[0].team_references.away = "ZZZ".to_string();
    assert_eq!(t.validate(), Err(TournamentError::UnknownTeam("ZZZ".to_string())));

    let mut t = tournament();
    t.matches[0].category = "G:Q".to_string();
    assert_eq!(t.validate(), Err(TournamentError::UnknownGroup("Q".to_string())));
}

#[test]
fn saved_snapshot_reloads_without_derived_state() {
    let mut t = tournament();
    common::play_group_in_order(&mut t, "A", 2);
    recompute(&mut t, Phases::ALL);
    assert!(!t.third_placed.table.is_empty());

    let path = std::env::temp_dir().join(format!("football_tournament_web_{}.json", std::process::id()));
    save_snapshot(&t, &path).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"table\""));
    assert!(!json.contains("third_placed"));

    let mut loaded = load_snapshot(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(loaded.groups.iter().all(|g| g.table.is_empty()));
    assert!(loaded.third_placed.table.is_empty());
    assert_eq!(loaded.third_placed.id, THIRD_PLACED_GROUP_ID);
    assert_eq!(loaded.matches[0].scoreboard, t.matches[0].scoreboard);

    recompute(&mut loaded, Phases::ALL);
    assert_eq!(loaded.groups, t.groups);
    assert_eq!(slot(&loaded, "KO1"), slot(&t, "KO1"));
}

#[test]
fn parse_snapshot_rejects_inconsistent_data() {
    let mut t = tournament();
    t.teams.pop();
    let json = serde_json::to_string(&t).unwrap();
    assert!(matches!(
        parse_snapshot(&json),
        Err(SnapshotError::Invalid(TournamentError::UnknownTeam(_)))
    ));
    assert!(matches!(parse_snapshot("{"), Err(SnapshotError::Json(_))));
}

#[test]
fn csv_import_replaces_periods_per_match() {
    let mut t = tournament();
    common::play(&mut t, "A-1", 5, 5);
    let csv = "match_id,home,away\nA-1,1,0\nA-2, 0 ,2\nA-1,0,1\n";

    let updated = import_results_csv(&mut t, csv.as_bytes()).unwrap();
    assert_eq!(updated, 2);
    let a1 = &t.get_match("A-1").unwrap().scoreboard;
    assert_eq!(a1.periods.len(), 2);
    assert_eq!((a1.final_score().home, a1.final_score().away), (1, 1));
    assert!(t.get_match("A-2").unwrap().scoreboard.played());
}

#[test]
fn csv_import_is_all_or_nothing() {
    let mut t = tournament();
    let csv = "match_id,home,away\nA-1,1,0\nNOPE,0,2\n";
    let err = import_results_csv(&mut t, csv.as_bytes()).unwrap_err();
    assert!(matches!(err, SnapshotError::Invalid(TournamentError::UnknownMatch(ref id)) if id == "NOPE"));
    assert!(!t.get_match("A-1").unwrap().scoreboard.played());

    let bad = "match_id,home,away\nA-1,x,0\n";
    assert!(matches!(import_results_csv(&mut t, bad.as_bytes()), Err(SnapshotError::Csv(_))));
}
