//! Team, Venue and display Settings.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team: its country code (e.g. "FRA").
pub type TeamId = String;

/// A national team. Immutable once loaded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Country name in its own language, if known.
    #[serde(default)]
    pub native_name: Option<String>,
}

impl Team {
    /// Create a team with the given country code and name.
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            native_name: None,
        }
    }
}

/// Stadium a match is played at. Matches refer to venues by id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city: String,
}

/// Display preferences carried in the snapshot. The engine never reads these.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub favorite_team: Option<TeamId>,
    #[serde(default)]
    pub show_native_names: bool,
    #[serde(default = "default_true")]
    pub show_knockout_on_startup: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            favorite_team: None,
            show_native_names: false,
            show_knockout_on_startup: true,
        }
    }
}
