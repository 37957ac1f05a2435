//! Handlers for pushes that are not replies to a pending call

use mage_net_core::{ChatId, ChatMessage, GameId, MageNetError, PlayerId, RoomId, TableId, TableView};
use tracing::info;

/// Receives server pushes
///
/// Every method runs on the connection's I/O thread and must return quickly:
/// while it runs, no reply can reach a blocked call. Hand work off to another
/// thread rather than calling back into [`MageClient`](crate::MageClient)
/// blocking operations from here, which would wait forever.
pub trait NotificationHandler: Send + Sync {
    fn on_chat_message(&self, _chat_id: ChatId, _message: ChatMessage) {}

    fn on_joined_table(&self, _room_id: RoomId, _table_id: TableId, _is_tournament: bool) {}

    fn on_table_update(&self, _view: TableView) {}

    fn on_game_started(&self, _game_id: GameId, _player_id: PlayerId) {}

    fn on_game_update(&self, _game_id: GameId, _state: serde_json::Value) {}

    fn on_game_ask(&self, _game_id: GameId, _message: String, _options: serde_json::Value) {}

    fn on_game_over(&self, _game_id: GameId, _message: String) {}

    fn on_inform(&self, message: String) {
        info!("Server: {}", message);
    }

    /// The connection is gone; pending calls have already been released
    fn on_disconnected(&self, _reason: &MageNetError) {}
}

/// Handler that ignores every push except server informs, which it logs
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnorePushes;

impl NotificationHandler for IgnorePushes {}
