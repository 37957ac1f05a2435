//! # mage-net-core
//!
//! Core types shared by every mage-net crate.
//!
//! This crate provides the payloads that travel between the client and the
//! game server, and the error type every bridge operation reports:
//! - Room, table and seat snapshots
//! - Match options and deck lists
//! - Chat, game and preference payloads
//! - `MageNetError` and the crate-wide `Result` alias

pub mod chat;
pub mod deck;
pub mod error;
pub mod game;
pub mod ids;
pub mod room;
pub mod table;
pub mod user;

pub use chat::{ChatMessage, MessageColor, MessageType};
pub use deck::{DeckCardInfo, DeckCardLists};
pub use error::{MageNetError, Result};
pub use game::{ManaType, PlayerAction};
pub use ids::{ChatId, GameId, PlayerId, RoomId, TableId};
pub use room::{RoomView, UserView};
pub use table::{MatchOptions, SeatView, SkillLevel, TableState, TableView};
pub use user::{Feedback, UserData};
