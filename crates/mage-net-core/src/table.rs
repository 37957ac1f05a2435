//! Table snapshots and match options

use serde::{Deserialize, Serialize};

use crate::ids::{PlayerId, RoomId, TableId};

/// Lifecycle state of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TableState {
    Waiting,
    ReadyToStart,
    Starting,
    Dueling,
    Sideboarding,
    Finished,
}

/// One seat at a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeatView {
    /// Player type the seat was opened for ("Human", "Computer - mad", ...)
    pub player_type: String,
    /// Occupant name, empty while the seat is free
    #[serde(default)]
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
}

impl SeatView {
    pub fn is_free(&self) -> bool {
        self.player_id.is_none()
    }
}

/// Snapshot of a table as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableView {
    pub table_id: TableId,
    pub room_id: RoomId,
    pub table_name: String,
    #[serde(default)]
    pub controller_name: String,
    pub game_type: String,
    pub deck_type: String,
    pub state: TableState,
    #[serde(default)]
    pub seats: Vec<SeatView>,
    #[serde(default)]
    pub is_tournament: bool,
    #[serde(default)]
    pub passworded: bool,
}

impl TableView {
    /// Number of seats that still accept a player
    pub fn free_seats(&self) -> usize {
        self.seats.iter().filter(|s| s.is_free()).count()
    }
}

/// AI skill level requested for computer opponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Casual,
    Serious,
}

/// Options for creating a new table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchOptions {
    pub name: String,
    pub game_type: String,
    pub deck_type: String,
    /// One entry per seat
    #[serde(default)]
    pub player_types: Vec<String>,
    #[serde(default = "default_wins_needed")]
    pub wins_needed: u32,
    #[serde(default)]
    pub free_mulligans: u32,
    #[serde(default)]
    pub limited: bool,
    #[serde(default)]
    pub rated: bool,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

fn default_wins_needed() -> u32 {
    2
}

impl MatchOptions {
    /// Two-player constructed match between humans
    pub fn new(name: impl Into<String>, game_type: impl Into<String>, deck_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game_type: game_type.into(),
            deck_type: deck_type.into(),
            player_types: vec!["Human".into(), "Human".into()],
            wins_needed: default_wins_needed(),
            free_mulligans: 0,
            limited: false,
            rated: false,
            skill_level: SkillLevel::default(),
            password: String::new(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_player_types(mut self, player_types: Vec<String>) -> Self {
        self.player_types = player_types;
        self
    }
}
