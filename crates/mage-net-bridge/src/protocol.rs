//! Wire protocol for client <-> server communication
//!
//! Messages are serialized as JSON with internally-tagged enums.
//! Format: {"Type": "MessageType", ...fields}
//!
//! `rename_all` only renames variants; `rename_all_fields` gives the fields
//! inside each variant the same PascalCase spelling.

use mage_net_core::{
    ChatId, ChatMessage, DeckCardLists, Feedback, GameId, ManaType, MatchOptions, PlayerAction,
    PlayerId, RoomId, RoomView, TableId, TableView, UserData,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Semantic type of reply a blocking call waits for
///
/// Each category owns exactly one correlation slot per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCategory {
    Boolean,
    Id,
    RoomView,
    TableView,
    StringList,
}

impl ResponseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCategory::Boolean => "boolean",
            ResponseCategory::Id => "id",
            ResponseCategory::RoomView => "room_view",
            ResponseCategory::TableView => "table_view",
            ResponseCategory::StringList => "string_list",
        }
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests sent from the client to the server
///
/// None of these carry a reply identifier. A reply is matched to its caller
/// only through its [`ResponseCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all = "PascalCase", rename_all_fields = "PascalCase")]
pub enum ClientMessage {
    // === Blocking requests ===
    /// Message-of-the-day lines
    ServerMessages,

    /// Chat channel attached to a room
    ChatRoomId { room_id: RoomId },

    /// Room snapshot
    GetRoom { room_id: RoomId },

    /// Open a new table
    CreateTable {
        room_id: RoomId,
        options: MatchOptions,
    },

    /// Snapshot of a table while waiting for players
    TableWaiting { room_id: RoomId, table_id: TableId },

    /// Take a seat at a table
    JoinTable {
        room_id: RoomId,
        table_id: TableId,
        name: String,
        player_type: String,
        skill: i32,
        deck_list: DeckCardLists,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        password: String,
    },

    /// Leave a table
    LeaveTable { room_id: RoomId, table_id: TableId },

    /// Start the match at a table the client controls
    StartMatch { room_id: RoomId, table_id: TableId },

    /// Join a running game; the reply carries the game's chat id
    JoinGame { game_id: GameId },

    /// Submit a deck after sideboarding or drafting
    SubmitDeck {
        table_id: TableId,
        deck_list: DeckCardLists,
    },

    // === One-way notifications ===
    /// Save deck changes without submitting
    UpdateDeck {
        table_id: TableId,
        deck_list: DeckCardLists,
    },

    SendFeedback {
        #[serde(flatten)]
        feedback: Feedback,
    },

    JoinChat { chat_id: ChatId },

    LeaveChat { chat_id: ChatId },

    ChatMessage { chat_id: ChatId, message: String },

    RemoveTable { room_id: RoomId, table_id: TableId },

    SwapSeats {
        room_id: RoomId,
        table_id: TableId,
        seat_num1: usize,
        seat_num2: usize,
    },

    /// Answer to a prompt that asked for a target or choice id
    SendPlayerUuid { game_id: GameId, id: Uuid },

    SendPlayerBoolean { game_id: GameId, value: bool },

    SendPlayerInteger { game_id: GameId, value: i32 },

    SendPlayerString { game_id: GameId, value: String },

    SendPlayerManaType {
        game_id: GameId,
        player_id: PlayerId,
        mana_type: ManaType,
    },

    PlayerAction {
        action: PlayerAction,
        game_id: GameId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },

    SetPreferences { user_data: UserData },
}

impl ClientMessage {
    /// Category of the reply this request waits for, `None` for one-way requests
    pub fn response_category(&self) -> Option<ResponseCategory> {
        match self {
            ClientMessage::ServerMessages => Some(ResponseCategory::StringList),
            ClientMessage::ChatRoomId { .. } | ClientMessage::JoinGame { .. } => {
                Some(ResponseCategory::Id)
            }
            ClientMessage::GetRoom { .. } => Some(ResponseCategory::RoomView),
            ClientMessage::CreateTable { .. } | ClientMessage::TableWaiting { .. } => {
                Some(ResponseCategory::TableView)
            }
            ClientMessage::JoinTable { .. }
            | ClientMessage::LeaveTable { .. }
            | ClientMessage::StartMatch { .. }
            | ClientMessage::SubmitDeck { .. } => Some(ResponseCategory::Boolean),
            ClientMessage::UpdateDeck { .. }
            | ClientMessage::SendFeedback { .. }
            | ClientMessage::JoinChat { .. }
            | ClientMessage::LeaveChat { .. }
            | ClientMessage::ChatMessage { .. }
            | ClientMessage::RemoveTable { .. }
            | ClientMessage::SwapSeats { .. }
            | ClientMessage::SendPlayerUuid { .. }
            | ClientMessage::SendPlayerBoolean { .. }
            | ClientMessage::SendPlayerInteger { .. }
            | ClientMessage::SendPlayerString { .. }
            | ClientMessage::SendPlayerManaType { .. }
            | ClientMessage::PlayerAction { .. }
            | ClientMessage::SetPreferences { .. } => None,
        }
    }

    /// Wire tag, used in logs and write-completion reports
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::ServerMessages => "ServerMessages",
            ClientMessage::ChatRoomId { .. } => "ChatRoomId",
            ClientMessage::GetRoom { .. } => "GetRoom",
            ClientMessage::CreateTable { .. } => "CreateTable",
            ClientMessage::TableWaiting { .. } => "TableWaiting",
            ClientMessage::JoinTable { .. } => "JoinTable",
            ClientMessage::LeaveTable { .. } => "LeaveTable",
            ClientMessage::StartMatch { .. } => "StartMatch",
            ClientMessage::JoinGame { .. } => "JoinGame",
            ClientMessage::SubmitDeck { .. } => "SubmitDeck",
            ClientMessage::UpdateDeck { .. } => "UpdateDeck",
            ClientMessage::SendFeedback { .. } => "SendFeedback",
            ClientMessage::JoinChat { .. } => "JoinChat",
            ClientMessage::LeaveChat { .. } => "LeaveChat",
            ClientMessage::ChatMessage { .. } => "ChatMessage",
            ClientMessage::RemoveTable { .. } => "RemoveTable",
            ClientMessage::SwapSeats { .. } => "SwapSeats",
            ClientMessage::SendPlayerUuid { .. } => "SendPlayerUuid",
            ClientMessage::SendPlayerBoolean { .. } => "SendPlayerBoolean",
            ClientMessage::SendPlayerInteger { .. } => "SendPlayerInteger",
            ClientMessage::SendPlayerString { .. } => "SendPlayerString",
            ClientMessage::SendPlayerManaType { .. } => "SendPlayerManaType",
            ClientMessage::PlayerAction { .. } => "PlayerAction",
            ClientMessage::SetPreferences { .. } => "SetPreferences",
        }
    }
}

/// Units received from the server
///
/// Reply variants fill a correlation slot; the rest are pushes that are not
/// tied to any pending call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all = "PascalCase", rename_all_fields = "PascalCase")]
pub enum ServerMessage {
    // === Replies ===
    Boolean { value: bool },

    Id { id: Uuid },

    RoomView { view: RoomView },

    TableView { view: TableView },

    StringList { items: Vec<String> },

    // === Pushes ===
    /// A line was posted to a chat the client joined
    ChatMessage { chat_id: ChatId, message: ChatMessage },

    /// The server seated this client at a table
    JoinedTable {
        room_id: RoomId,
        table_id: TableId,
        #[serde(default)]
        is_tournament: bool,
    },

    /// Seats or state changed at a table the client is watching
    TableUpdate { view: TableView },

    GameStarted { game_id: GameId, player_id: PlayerId },

    /// New game state; contents belong to the rules engine
    GameUpdate {
        game_id: GameId,
        state: serde_json::Value,
    },

    /// The game is waiting on a decision from this player
    GameAsk {
        game_id: GameId,
        message: String,
        #[serde(default)]
        options: serde_json::Value,
    },

    GameOver { game_id: GameId, message: String },

    /// Informational text from the server operators
    Inform { message: String },
}

impl ServerMessage {
    /// Slot this unit is delivered to, `None` for pushes
    pub fn category(&self) -> Option<ResponseCategory> {
        match self {
            ServerMessage::Boolean { .. } => Some(ResponseCategory::Boolean),
            ServerMessage::Id { .. } => Some(ResponseCategory::Id),
            ServerMessage::RoomView { .. } => Some(ResponseCategory::RoomView),
            ServerMessage::TableView { .. } => Some(ResponseCategory::TableView),
            ServerMessage::StringList { .. } => Some(ResponseCategory::StringList),
            ServerMessage::ChatMessage { .. }
            | ServerMessage::JoinedTable { .. }
            | ServerMessage::TableUpdate { .. }
            | ServerMessage::GameStarted { .. }
            | ServerMessage::GameUpdate { .. }
            | ServerMessage::GameAsk { .. }
            | ServerMessage::GameOver { .. }
            | ServerMessage::Inform { .. } => None,
        }
    }
}

/// Serialize a message to JSON bytes
pub fn serialize<T: Serialize>(msg: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(msg)
}

/// Deserialize a message from JSON bytes
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}
