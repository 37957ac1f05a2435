//! Lobby room snapshots

use serde::{Deserialize, Serialize};

use crate::ids::RoomId;
use crate::table::TableView;

/// Snapshot of a lobby room as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomView {
    /// Room this snapshot describes
    pub room_id: RoomId,
    /// Users currently in the room
    #[serde(default)]
    pub users: Vec<UserView>,
    /// Tables open in the room
    #[serde(default)]
    pub tables: Vec<TableView>,
}

/// A user listed in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserView {
    pub user_name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub in_game: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_room_from_server_json() {
        let json = r#"{"RoomId":"6f1c2f43-93a4-4b4e-9d3b-1f8a3f9f8e01","Users":[{"UserName":"alice","InGame":true}]}"#;
        let room: RoomView = serde_json::from_str(json).unwrap();

        assert_eq!(
            room.room_id,
            Uuid::parse_str("6f1c2f43-93a4-4b4e-9d3b-1f8a3f9f8e01").unwrap()
        );
        assert_eq!(room.users.len(), 1);
        assert_eq!(room.users[0].user_name, "alice");
        assert!(room.users[0].in_game);
        assert!(room.users[0].info.is_empty());
        assert!(room.tables.is_empty());
    }
}
