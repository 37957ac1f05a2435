//! Request dispatcher: the synchronous call surface

use crate::handle::{BridgeHandle, BridgeState};
use crate::slot::CorrelationSlot;
use mage_net_bridge::{ClientMessage, ResponseCategory};
use mage_net_core::{
    ChatId, DeckCardLists, Feedback, GameId, ManaType, MatchOptions, PlayerAction, PlayerId,
    Result, RoomId, RoomView, TableId, TableView, UserData,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Who takes a seat at a table, and with what deck
#[derive(Debug, Clone)]
pub struct SeatRequest {
    pub name: String,
    pub player_type: String,
    pub skill: i32,
    pub deck_list: DeckCardLists,
    pub password: String,
}

impl SeatRequest {
    /// A human player with no table password
    pub fn human(name: impl Into<String>, deck_list: DeckCardLists) -> Self {
        Self {
            name: name.into(),
            player_type: "Human".into(),
            skill: 1,
            deck_list,
            password: String::new(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

/// Blocking remote calls against one game-server connection
///
/// Each blocking call clears its category's reply slot, sends the request and
/// waits for the next reply of that category. Replies carry no request id, so:
///
/// **Never run two calls of the same [`ResponseCategory`] at the same time.**
/// Both would wait on one slot and could each receive the other's reply.
/// Calls of different categories may overlap freely. Serialize same-category
/// calls in the application (one thread per concern, or a lock around them).
///
/// Do not call blocking methods from the connection's I/O thread, including
/// from a [`NotificationHandler`](crate::NotificationHandler); the reply could
/// never be read.
///
/// Without a response timeout a call waits until its reply arrives, it is
/// interrupted with [`interrupt`](Self::interrupt), or the connection closes.
#[derive(Clone)]
pub struct MageClient {
    handle: Arc<BridgeHandle>,
    response_timeout: Option<Duration>,
}

impl MageClient {
    pub fn new(handle: Arc<BridgeHandle>, response_timeout: Option<Duration>) -> Self {
        Self {
            handle,
            response_timeout,
        }
    }

    pub fn handle(&self) -> &Arc<BridgeHandle> {
        &self.handle
    }

    pub fn state(&self) -> BridgeState {
        self.handle.state()
    }

    /// Cancel the call currently waiting for a `category` reply
    ///
    /// The cancelled call returns `Interrupted` and its slot is emptied. If no
    /// call is waiting yet, the next `category` call is the one cancelled.
    pub fn interrupt(&self, category: ResponseCategory) {
        debug!("Interrupting pending {} call", category);
        self.handle.slots().interrupt(category);
    }

    // === Blocking calls ===

    /// Message-of-the-day lines
    pub fn server_messages(&self) -> Result<Vec<String>> {
        self.call(&self.handle.slots().string_lists, ClientMessage::ServerMessages)
    }

    /// Chat channel attached to a room
    pub fn chat_room_id(&self, room_id: RoomId) -> Result<ChatId> {
        self.call(&self.handle.slots().ids, ClientMessage::ChatRoomId { room_id })
    }

    pub fn get_room(&self, room_id: RoomId) -> Result<RoomView> {
        self.call(&self.handle.slots().rooms, ClientMessage::GetRoom { room_id })
    }

    pub fn create_table(&self, room_id: RoomId, options: MatchOptions) -> Result<TableView> {
        self.call(
            &self.handle.slots().tables,
            ClientMessage::CreateTable { room_id, options },
        )
    }

    /// Snapshot of a table that is waiting for players
    pub fn get_table(&self, room_id: RoomId, table_id: TableId) -> Result<TableView> {
        self.call(
            &self.handle.slots().tables,
            ClientMessage::TableWaiting { room_id, table_id },
        )
    }

    /// Returns whether the server seated the player
    pub fn join_table(&self, room_id: RoomId, table_id: TableId, seat: SeatRequest) -> Result<bool> {
        self.call(
            &self.handle.slots().booleans,
            ClientMessage::JoinTable {
                room_id,
                table_id,
                name: seat.name,
                player_type: seat.player_type,
                skill: seat.skill,
                deck_list: seat.deck_list,
                password: seat.password,
            },
        )
    }

    pub fn leave_table(&self, room_id: RoomId, table_id: TableId) -> Result<bool> {
        self.call(
            &self.handle.slots().booleans,
            ClientMessage::LeaveTable { room_id, table_id },
        )
    }

    pub fn start_match(&self, room_id: RoomId, table_id: TableId) -> Result<bool> {
        self.call(
            &self.handle.slots().booleans,
            ClientMessage::StartMatch { room_id, table_id },
        )
    }

    /// Join a running game; returns the game's chat id
    pub fn join_game(&self, game_id: GameId) -> Result<Uuid> {
        self.call(&self.handle.slots().ids, ClientMessage::JoinGame { game_id })
    }

    pub fn submit_deck(&self, table_id: TableId, deck_list: DeckCardLists) -> Result<bool> {
        self.call(
            &self.handle.slots().booleans,
            ClientMessage::SubmitDeck {
                table_id,
                deck_list,
            },
        )
    }

    // === One-way calls ===

    pub fn update_deck(&self, table_id: TableId, deck_list: DeckCardLists) -> Result<()> {
        self.notify(ClientMessage::UpdateDeck {
            table_id,
            deck_list,
        })
    }

    pub fn send_feedback(&self, feedback: Feedback) -> Result<()> {
        self.notify(ClientMessage::SendFeedback { feedback })
    }

    pub fn join_chat(&self, chat_id: ChatId) -> Result<()> {
        self.notify(ClientMessage::JoinChat { chat_id })
    }

    pub fn leave_chat(&self, chat_id: ChatId) -> Result<()> {
        self.notify(ClientMessage::LeaveChat { chat_id })
    }

    pub fn send_message(&self, chat_id: ChatId, message: &str) -> Result<()> {
        self.notify(ClientMessage::ChatMessage {
            chat_id,
            message: message.to_string(),
        })
    }

    pub fn remove_table(&self, room_id: RoomId, table_id: TableId) -> Result<()> {
        self.notify(ClientMessage::RemoveTable { room_id, table_id })
    }

    pub fn swap_seats(
        &self,
        room_id: RoomId,
        table_id: TableId,
        seat_num1: usize,
        seat_num2: usize,
    ) -> Result<()> {
        self.notify(ClientMessage::SwapSeats {
            room_id,
            table_id,
            seat_num1,
            seat_num2,
        })
    }

    pub fn send_player_uuid(&self, game_id: GameId, id: Uuid) -> Result<()> {
        self.notify(ClientMessage::SendPlayerUuid { game_id, id })
    }

    pub fn send_player_boolean(&self, game_id: GameId, value: bool) -> Result<()> {
        self.notify(ClientMessage::SendPlayerBoolean { game_id, value })
    }

    pub fn send_player_integer(&self, game_id: GameId, value: i32) -> Result<()> {
        self.notify(ClientMessage::SendPlayerInteger { game_id, value })
    }

    pub fn send_player_string(&self, game_id: GameId, value: &str) -> Result<()> {
        self.notify(ClientMessage::SendPlayerString {
            game_id,
            value: value.to_string(),
        })
    }

    pub fn send_player_mana_type(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        mana_type: ManaType,
    ) -> Result<()> {
        self.notify(ClientMessage::SendPlayerManaType {
            game_id,
            player_id,
            mana_type,
        })
    }

    pub fn send_player_action(
        &self,
        action: PlayerAction,
        game_id: GameId,
        data: Option<serde_json::Value>,
    ) -> Result<()> {
        self.notify(ClientMessage::PlayerAction {
            action,
            game_id,
            data,
        })
    }

    pub fn set_preferences(&self, user_data: UserData) -> Result<()> {
        self.notify(ClientMessage::SetPreferences { user_data })
    }

    /// clear, send, take
    fn call<T: Send>(&self, slot: &CorrelationSlot<T>, request: ClientMessage) -> Result<T> {
        debug_assert_eq!(request.response_category(), Some(slot.category()));

        slot.clear();
        let kind = request.kind();
        self.handle.submit(request)?;

        let result = match self.response_timeout {
            Some(timeout) => slot.take_timeout(timeout),
            None => slot.take(),
        };
        if let Err(e) = &result {
            debug!("{} did not complete: {}", kind, e);
        }
        result
    }

    /// Send only. A write that fails after queuing is reported to the
    /// connection's write listener, not here.
    fn notify(&self, request: ClientMessage) -> Result<()> {
        debug_assert!(request.response_category().is_none());

        let kind = request.kind();
        self.handle
            .submit(request)
            .inspect_err(|e| warn!("Failed to send {}: {}", kind, e))
    }
}
