//! JSON message surface between clients and the coordinator.
//!
//! Both directions are internally tagged by a `"type"` field:
//!
//! ```text
//! client → server   {"type": "list_rooms"}
//!                   {"type": "join_room", "room_id": "abc"}
//!                   {"type": "submit_turn", "room_id": "abc", "position": [0, 1, 2, 3]}
//!
//! server → client   {"type": "room_list", "rooms": [{"id": "abc", "count": 2}]}
//!                   {"type": "joined", "room_id": "abc", "role": "Player 1", "count": 1, "state": {..}}
//!                   {"type": "turn_applied", "current_player": {..}, "board": [..], "result": {..}}
//!                   {"type": "action_error", "kind": "PositionOverlapError", "message": ".."}
//! ```

use serde::{Deserialize, Serialize};

use super::board::{Board, DIMENSIONS};
use super::game::{Game, GameError, GameResult, GameSnapshot};
use super::player::{Player, Role};
use super::room::{RoomInfo, RoomSnapshot};

/// Requests sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to lobby updates and get the current room list
    ListRooms,
    JoinRoom {
        room_id: String,
    },
    SubmitTurn {
        room_id: String,
        /// Raw coordinates; negative values are out of range, not malformed
        position: [i64; DIMENSIONS],
    },
}

impl ClientMessage {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Messages pushed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    RoomList {
        rooms: Vec<RoomInfo>,
    },
    Joined {
        room_id: String,
        role: Role,
        /// Room occupancy including the joiner
        count: usize,
        state: GameSnapshot,
    },
    TurnApplied {
        current_player: Player,
        board: Board,
        result: GameResult,
    },
    ActionError {
        kind: String,
        message: String,
    },
}

impl ServerMessage {
    pub fn joined(role: Role, room: RoomSnapshot) -> Self {
        Self::Joined {
            room_id: room.room_id,
            role,
            count: room.count,
            state: room.game,
        }
    }

    /// State broadcast after a successful turn.
    pub fn turn_applied(game: &Game) -> Self {
        Self::TurnApplied {
            current_player: game.current_player().clone(),
            board: game.board().clone(),
            result: game.result().clone(),
        }
    }

    pub fn action_error(error: GameError) -> Self {
        Self::ActionError {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RoomList { .. } => "room_list",
            Self::Joined { .. } => "joined",
            Self::TurnApplied { .. } => "turn_applied",
            Self::ActionError { .. } => "action_error",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, kind = self.type_name(), "failed to serialize server message");
            serde_json::Value::Null
        })
    }
}
