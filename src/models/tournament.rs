//! Tournament (the in-memory snapshot) and TournamentError.

use crate::models::game::{GameMatch, MatchId, Side};
use crate::models::group::{Group, GroupId, THIRD_PLACED_GROUP_ID};
use crate::models::team::{Settings, Team, TeamId, Venue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur while validating or resolving a tournament.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A team reference matches no known grammar.
    MalformedReference(String),
    /// A reference or category names a group that does not exist.
    UnknownGroup(GroupId),
    /// A reference or mutation names a match that does not exist.
    UnknownMatch(MatchId),
    /// A winner reference leads back to the match it is being resolved for.
    CircularReference(MatchId),
    /// A group match or group names a team that does not exist.
    UnknownTeam(TeamId),
    /// "<group>:<n>" where the group has fewer than n teams.
    TablePositionOutOfRange { group: GroupId, position: usize },
    /// Two teams, groups, venues or matches share an id.
    DuplicateId(String),
    /// A loaded group uses the id reserved for the third-place pool.
    ReservedGroupId,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::MalformedReference(r) => write!(f, "Malformed team reference '{}'", r),
            TournamentError::UnknownGroup(g) => write!(f, "Unknown group '{}'", g),
            TournamentError::UnknownMatch(m) => write!(f, "Unknown match '{}'", m),
            TournamentError::CircularReference(m) => {
                write!(f, "Winner of match '{}' depends on itself", m)
            }
            TournamentError::UnknownTeam(t) => write!(f, "Unknown team '{}'", t),
            TournamentError::TablePositionOutOfRange { group, position } => {
                write!(f, "Group '{}' has no position {}", group, position)
            }
            TournamentError::DuplicateId(id) => write!(f, "Duplicate id '{}'", id),
            TournamentError::ReservedGroupId => {
                write!(f, "Group id '{}' is reserved for the third-place pool", THIRD_PLACED_GROUP_ID)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a loaded tournament (host side).
pub type TournamentId = Uuid;

/// Full tournament snapshot: teams, groups, matches, and the derived third-place pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(default)]
    pub venues: Vec<Venue>,
    pub teams: Vec<Team>,
    /// Real groups, in order.
    pub groups: Vec<Group>,
    /// Cross-group pool of third-placed teams. Rebuilt on every recompute, never persisted.
    #[serde(skip, default = "Group::third_placed")]
    pub third_placed: Group,
    pub matches: Vec<GameMatch>,
    #[serde(default)]
    pub settings: Settings,
}

impl Tournament {
    /// Create a tournament from loaded collections. Tables and slots start empty.
    pub fn new(teams: Vec<Team>, groups: Vec<Group>, matches: Vec<GameMatch>) -> Self {
        Self {
            venues: Vec::new(),
            teams,
            groups,
            third_placed: Group::third_placed(),
            matches,
            settings: Settings::default(),
        }
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_match(&self, id: &str) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Mutable reference to a match by id.
    pub fn get_match_mut(&mut self, id: &str) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Check ids and cross references. The host calls this before accepting a snapshot.
    pub fn validate(&self) -> Result<(), TournamentError> {
        check_unique(self.teams.iter().map(|t| t.id.as_str()))?;
        check_unique(self.venues.iter().map(|v| v.id.as_str()))?;
        check_unique(self.groups.iter().map(|g| g.id.as_str()))?;
        check_unique(self.matches.iter().map(|m| m.id.as_str()))?;

        if self.groups.iter().any(|g| g.is_third_placed()) {
            return Err(TournamentError::ReservedGroupId);
        }
        for group in &self.groups {
            check_unique(group.teams.iter().map(String::as_str))?;
            if let Some(unknown) = group.teams.iter().find(|t| self.team(t).is_none()) {
                return Err(TournamentError::UnknownTeam(unknown.clone()));
            }
        }
        for m in &self.matches {
            let Some(group_id) = m.group_id() else {
                continue;
            };
            if self.group(group_id).is_none() {
                return Err(TournamentError::UnknownGroup(group_id.to_string()));
            }
            for side in Side::BOTH {
                let reference = m.team_references.get(side);
                if self.team(reference).is_none() {
                    return Err(TournamentError::UnknownTeam(reference.clone()));
                }
            }
        }
        Ok(())
    }
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), TournamentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TournamentError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}
