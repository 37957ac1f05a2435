//! Identifier aliases
//!
//! Every server-side entity is addressed by a UUID. The aliases exist so call
//! signatures say which entity they expect.

use uuid::Uuid;

/// Lobby room identifier
pub type RoomId = Uuid;

/// Table identifier (unique across rooms)
pub type TableId = Uuid;

/// Running game identifier
pub type GameId = Uuid;

/// Chat channel identifier
pub type ChatId = Uuid;

/// Player identifier inside a game
pub type PlayerId = Uuid;
