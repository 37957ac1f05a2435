//! Response demultiplexer
//!
//! Each inbound unit routes itself: reply variants deposit into their
//! category's slot, pushes go to the notification handler. The match below is
//! exhaustive, so a new `ServerMessage` variant does not compile until it has
//! a destination.

use crate::handle::BridgeHandle;
use mage_net_bridge::{InboundSink, ServerMessage};
use mage_net_core::MageNetError;
use tracing::trace;

/// An inbound unit that knows where it belongs
pub trait Deliver {
    /// Route `self` into `handle`; never blocks
    fn deliver(self, handle: &BridgeHandle);
}

impl Deliver for ServerMessage {
    fn deliver(self, handle: &BridgeHandle) {
        let slots = handle.slots();
        let handler = handle.handler();

        match self.category() {
            Some(category) => trace!(%category, "Depositing reply"),
            None => trace!("Dispatching push"),
        }

        match self {
            ServerMessage::Boolean { value } => slots.booleans.deposit(value),
            ServerMessage::Id { id } => slots.ids.deposit(id),
            ServerMessage::RoomView { view } => slots.rooms.deposit(view),
            ServerMessage::TableView { view } => slots.tables.deposit(view),
            ServerMessage::StringList { items } => slots.string_lists.deposit(items),

            ServerMessage::ChatMessage { chat_id, message } => {
                handler.on_chat_message(chat_id, message)
            }
            ServerMessage::JoinedTable {
                room_id,
                table_id,
                is_tournament,
            } => handler.on_joined_table(room_id, table_id, is_tournament),
            ServerMessage::TableUpdate { view } => handler.on_table_update(view),
            ServerMessage::GameStarted { game_id, player_id } => {
                handler.on_game_started(game_id, player_id)
            }
            ServerMessage::GameUpdate { game_id, state } => handler.on_game_update(game_id, state),
            ServerMessage::GameAsk {
                game_id,
                message,
                options,
            } => handler.on_game_ask(game_id, message, options),
            ServerMessage::GameOver { game_id, message } => handler.on_game_over(game_id, message),
            ServerMessage::Inform { message } => handler.on_inform(message),
        }
    }
}

impl BridgeHandle {
    /// Route one inbound unit, as the reader task does
    pub fn deliver(&self, unit: ServerMessage) {
        unit.deliver(self);
    }
}

impl InboundSink for BridgeHandle {
    fn on_unit(&self, unit: ServerMessage) {
        self.deliver(unit);
    }

    fn on_closed(&self, reason: MageNetError) {
        self.close(&reason);
    }
}
