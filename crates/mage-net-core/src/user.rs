//! User preferences and feedback

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Preferences stored server-side for the logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserData {
    #[serde(default)]
    pub avatar_id: u32,
    #[serde(default = "default_true")]
    pub show_ability_picker_forced: bool,
    #[serde(default)]
    pub allow_requests_to_show_cards: bool,
    #[serde(default = "default_true")]
    pub confirm_empty_mana_pool: bool,
    #[serde(default)]
    pub ask_move_to_graveyard_order: bool,
    /// Client-specific settings the server stores verbatim
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            avatar_id: 0,
            show_ability_picker_forced: true,
            allow_requests_to_show_cards: false,
            confirm_empty_mana_pool: true,
            ask_move_to_graveyard_order: false,
            extra: HashMap::new(),
        }
    }
}

/// Feedback report sent to the server operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Feedback {
    pub title: String,
    #[serde(rename = "Type")]
    pub feedback_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}
