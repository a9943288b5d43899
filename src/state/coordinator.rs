//! Room coordinator.
//!
//! Owns the room registry and mediates every client-visible action: listing
//! rooms, joining, submitting turns and disconnecting. All outbound traffic
//! goes through a [`Transport`].
//!
//! Turn submissions in one room are serialized by that room's lock, and the
//! resulting broadcast is emitted while the lock is held, so every member
//! observes turns in the order they were applied. A joiner is added to the
//! room group and sent its snapshot under the same lock, so no turn can
//! reach it ahead of the state it was computed from.
//!
//! Room list broadcasts are serialized by a separate lobby lock. The list is
//! read after the change that triggered it, so the last list a watcher
//! receives is never older than the rooms it describes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::board::{Position, DIMENSIONS};
use super::game::{ConfigError, GameConfig, GameError, GameResult};
use super::player::Role;
use super::protocol::{ClientMessage, ServerMessage};
use super::room::{lock_room, Departure, RoomInfo, RoomRegistry};
use super::transport::{ConnectionId, Transport};

/// Default broadcast group for lobby watchers.
pub const DEFAULT_LOBBY_GROUP: &str = "lobby";

/// Default prefix of per-room broadcast groups.
pub const DEFAULT_ROOM_GROUP_PREFIX: &str = "room:";

/// Coordinator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Configuration for every newly created game
    pub game: GameConfig,

    /// Group receiving room list updates
    pub lobby_group: String,

    /// Prepended to a room ID to name its broadcast group
    pub room_group_prefix: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            lobby_group: DEFAULT_LOBBY_GROUP.to_string(),
            room_group_prefix: DEFAULT_ROOM_GROUP_PREFIX.to_string(),
        }
    }
}

impl CoordinatorConfig {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.game.validate()?;
        Ok(config)
    }
}

/// What happened to a submitted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Stone placed and broadcast to the room
    Applied(GameResult),
    /// Engine refused the move; the error went to the submitter only
    Rejected(GameError),
    /// Submitter does not hold the slot of the player to move
    Unauthorized,
    /// No such room
    UnknownRoom,
}

/// Coordinates rooms over a transport.
#[derive(Debug)]
pub struct Coordinator<T: Transport> {
    config: CoordinatorConfig,
    registry: RoomRegistry,
    transport: T,
    /// Held while a room list is read and sent; never taken under a room lock
    lobby: Mutex<()>,
}

impl<T: Transport> Coordinator<T> {
    pub fn new(transport: T) -> Self {
        Self::build(transport, CoordinatorConfig::default())
    }

    /// Create a coordinator, rejecting a game config that rooms could not use.
    pub fn with_config(transport: T, config: CoordinatorConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        Ok(Self::build(transport, config))
    }

    fn build(transport: T, config: CoordinatorConfig) -> Self {
        Self {
            config,
            registry: RoomRegistry::new(),
            transport,
            lobby: Mutex::new(()),
        }
    }

    fn lock_lobby(&self) -> MutexGuard<'_, ()> {
        self.lobby.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Broadcast group for a room.
    pub fn room_group(&self, room_id: &str) -> String {
        format!("{}{}", self.config.room_group_prefix, room_id)
    }

    /// Every room with its occupancy.
    pub fn room_list(&self) -> Vec<RoomInfo> {
        self.registry.list()
    }

    /// Subscribe a connection to lobby updates and send it the room list.
    pub fn list_rooms(&self, conn: &ConnectionId) -> Vec<RoomInfo> {
        let _lobby = self.lock_lobby();
        self.transport.join_group(conn, &self.config.lobby_group);
        let rooms = self.room_list();
        self.transport.send(
            conn,
            &ServerMessage::RoomList {
                rooms: rooms.clone(),
            },
        );
        rooms
    }

    fn broadcast_room_list(&self) {
        let _lobby = self.lock_lobby();
        let rooms = self.room_list();
        self.transport
            .broadcast(&self.config.lobby_group, &ServerMessage::RoomList { rooms });
    }

    /// Put a connection into a room, creating the room if needed.
    ///
    /// The joiner gets its role and the full game state; lobby watchers get
    /// the updated room list.
    pub fn join_room(&self, conn: &ConnectionId, room_id: &str) -> Role {
        let group = self.room_group(room_id);
        let (role, created) = self
            .registry
            .find_or_create(room_id, self.config.game, |room| {
                let role = room.join(conn.clone());
                self.transport.join_group(conn, &group);
                self.transport
                    .send(conn, &ServerMessage::joined(role, room.snapshot()));
                role
            });

        if created {
            tracing::info!(room = room_id, "room created");
        }
        tracing::info!(room = room_id, conn = %conn, role = %role, "joined room");

        self.broadcast_room_list();
        role
    }

    /// Play a stone for the connection if it is that connection's turn.
    ///
    /// Unauthorized submissions and unknown rooms change nothing and send
    /// nothing. Engine errors go to the submitter only; applied turns are
    /// broadcast to the whole room.
    pub fn submit_turn(
        &self,
        conn: &ConnectionId,
        room_id: &str,
        position: [i64; DIMENSIONS],
    ) -> TurnOutcome {
        let Some(shared) = self.registry.get(room_id) else {
            tracing::debug!(room = room_id, conn = %conn, "turn for unknown room dropped");
            return TurnOutcome::UnknownRoom;
        };
        let mut room = lock_room(&shared);

        if !room.is_current_turn(conn) {
            tracing::debug!(room = room_id, conn = %conn, "ignoring out-of-turn submission");
            return TurnOutcome::Unauthorized;
        }

        let played = match Position::from_signed(position) {
            Some(pos) => room.game.play_turn(pos),
            None if room.game.is_finished() => Err(GameError::FinishedGame),
            None => Err(GameError::BoardRange),
        };

        match played {
            Ok(result) => {
                tracing::debug!(room = room_id, conn = %conn, ?position, "turn applied");
                if let Some(winner) = &result.winner {
                    tracing::info!(room = room_id, winner = %winner, "game won");
                } else if result.finished {
                    tracing::info!(room = room_id, "game drawn");
                }
                self.transport.broadcast(
                    &self.room_group(room_id),
                    &ServerMessage::turn_applied(&room.game),
                );
                TurnOutcome::Applied(result)
            }
            Err(e) => {
                tracing::debug!(room = room_id, conn = %conn, error = %e, "turn rejected");
                self.transport.send(conn, &ServerMessage::action_error(e));
                TurnOutcome::Rejected(e)
            }
        }
    }

    /// Drop a connection from every room, deleting rooms left empty.
    pub fn disconnect(&self, conn: &ConnectionId) -> Vec<Departure> {
        let departures = self.registry.remove_connection(conn);
        self.transport.disconnect(conn);

        for d in &departures {
            tracing::info!(room = %d.room_id, conn = %conn, role = %d.role, "left room");
            if d.room_removed {
                tracing::info!(room = %d.room_id, "room removed");
            }
        }

        departures
    }

    /// Dispatch a parsed client message.
    pub fn handle(&self, conn: &ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::ListRooms => {
                self.list_rooms(conn);
            }
            ClientMessage::JoinRoom { room_id } => {
                self.join_room(conn, &room_id);
            }
            ClientMessage::SubmitTurn { room_id, position } => {
                self.submit_turn(conn, &room_id, position);
            }
        }
    }

    /// Parse and dispatch a raw client message. Malformed input is ignored.
    pub fn handle_text(&self, conn: &ConnectionId, text: &str) {
        match ClientMessage::parse(text) {
            Ok(message) => self.handle(conn, message),
            Err(e) => tracing::debug!(conn = %conn, error = %e, "ignoring malformed message"),
        }
    }
}
