//! In-game player responses

use serde::{Deserialize, Serialize};

/// Mana type chosen when paying from a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ManaType {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
    Generic,
}

/// Player-initiated game action outside of a direct prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    PassPriorityUntilNextTurn,
    PassPriorityUntilTurnEndStep,
    PassPriorityUntilStackResolved,
    PassPriorityCancelAllActions,
    Concede,
    Undo,
    ManaAutoPaymentOn,
    ManaAutoPaymentOff,
    RollbackTurns,
    AddPermissionToSeeHandCards,
    RevokePermissionsToSeeHandCards,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_action_wire_names() {
        let json = serde_json::to_string(&PlayerAction::PassPriorityUntilNextTurn).unwrap();
        assert_eq!(json, "\"PASS_PRIORITY_UNTIL_NEXT_TURN\"");

        let parsed: PlayerAction = serde_json::from_str("\"CONCEDE\"").unwrap();
        assert_eq!(parsed, PlayerAction::Concede);
    }
}
