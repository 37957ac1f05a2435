//! Chat payloads pushed by the server

use serde::{Deserialize, Serialize};

/// Display colour hint for a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum MessageColor {
    #[default]
    Black,
    Blue,
    Green,
    Red,
    Orange,
}

/// Kind of chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum MessageType {
    UserInfo,
    Status,
    Game,
    #[default]
    Talk,
    Whisper,
}

/// A single chat line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub color: MessageColor,
    #[serde(default)]
    pub message_type: MessageType,
}
