//! Room state management.
//!
//! A room is one live game plus the connections watching it. The first two
//! connections take the player slots; later joiners spectate. A room is
//! created on first join and removed once nobody is left in it.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use super::game::{Game, GameConfig, GameSnapshot};
use super::player::Role;
use super::transport::ConnectionId;

/// Lobby listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: String,
    /// Bound player slots plus spectators
    pub count: usize,
}

/// Room view sent to a joiner. Identical for every role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub room_id: String,
    pub count: usize,
    pub game: GameSnapshot,
}

/// A room and its participants.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room ID chosen by the first joiner
    pub id: String,

    /// The match played in this room
    pub game: Game,

    /// Connection holding the Player 1 slot
    player_1: Option<ConnectionId>,

    /// Connection holding the Player 2 slot
    player_2: Option<ConnectionId>,

    spectators: HashSet<ConnectionId>,

    /// When room was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Room {
    pub fn new(id: impl Into<String>, config: GameConfig) -> Self {
        Self {
            id: id.into(),
            game: Game::new(config),
            player_1: None,
            player_2: None,
            spectators: HashSet::new(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Seat a connection and return its role.
    ///
    /// Vacant player slots fill in order; a connection already in the room
    /// keeps the role it has.
    pub fn join(&mut self, conn: ConnectionId) -> Role {
        if let Some(role) = self.role_of(&conn) {
            return role;
        }

        if self.player_1.is_none() {
            self.player_1 = Some(conn);
            Role::Player1
        } else if self.player_2.is_none() {
            self.player_2 = Some(conn);
            Role::Player2
        } else {
            self.spectators.insert(conn);
            Role::Spectator
        }
    }

    /// Remove a connection, freeing its slot. Returns the role it held.
    pub fn leave(&mut self, conn: &ConnectionId) -> Option<Role> {
        if self.player_1.as_ref() == Some(conn) {
            self.player_1 = None;
            Some(Role::Player1)
        } else if self.player_2.as_ref() == Some(conn) {
            self.player_2 = None;
            Some(Role::Player2)
        } else if self.spectators.remove(conn) {
            Some(Role::Spectator)
        } else {
            None
        }
    }

    /// Role currently held by a connection.
    pub fn role_of(&self, conn: &ConnectionId) -> Option<Role> {
        if self.player_1.as_ref() == Some(conn) {
            Some(Role::Player1)
        } else if self.player_2.as_ref() == Some(conn) {
            Some(Role::Player2)
        } else if self.spectators.contains(conn) {
            Some(Role::Spectator)
        } else {
            None
        }
    }

    /// Connection bound to a player slot.
    pub fn player_slot(&self, role: Role) -> Option<&ConnectionId> {
        match role {
            Role::Player1 => self.player_1.as_ref(),
            Role::Player2 => self.player_2.as_ref(),
            Role::Spectator => None,
        }
    }

    /// Check if the connection holds the slot of the player to move.
    pub fn is_current_turn(&self, conn: &ConnectionId) -> bool {
        let current = Role::for_player_index(self.game.current_player().index);
        self.player_slot(current) == Some(conn)
    }

    pub fn spectators(&self) -> impl Iterator<Item = &ConnectionId> {
        self.spectators.iter()
    }

    pub fn spectator_count(&self) -> usize {
        self.spectators.len()
    }

    /// Bound player slots plus spectators.
    pub fn occupancy(&self) -> usize {
        usize::from(self.player_1.is_some())
            + usize::from(self.player_2.is_some())
            + self.spectators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            id: self.id.clone(),
            count: self.occupancy(),
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            count: self.occupancy(),
            game: self.game.snapshot(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut spectators: Vec<&str> = self.spectators().map(ConnectionId::as_str).collect();
        spectators.sort_unstable();

        serde_json::json!({
            "room_id": self.id,
            "player_1": self.player_1,
            "player_2": self.player_2,
            "spectators": spectators,
            "count": self.occupancy(),
            "created_at": self.created_at,
            "game": self.game.to_json()
        })
    }
}

/// Handle to a room shared between the registry and in-flight requests.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Lock a room, recovering the guard if a previous holder panicked.
pub fn lock_room(room: &Mutex<Room>) -> MutexGuard<'_, Room> {
    room.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A connection removed from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: String,
    pub role: Role,
    /// The room was deleted because it became empty
    pub room_removed: bool,
}

/// Registry of active rooms.
///
/// The map lock only guards lookup, insertion and removal. Each room has its
/// own mutex, so work in one room never waits on another.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, SharedRoom>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SharedRoom>> {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SharedRoom>> {
        self.rooms.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a room by ID.
    pub fn get(&self, room_id: &str) -> Option<SharedRoom> {
        self.read().get(room_id).cloned()
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.read().contains_key(room_id)
    }

    /// Run `f` on a room, creating it with `config` if the ID is unknown.
    ///
    /// Returns `f`'s output and whether the room was created. The registry
    /// stays locked while `f` runs so the room cannot be removed underneath
    /// it; `f` must not call back into the registry.
    pub fn find_or_create<R>(
        &self,
        room_id: &str,
        config: GameConfig,
        f: impl FnOnce(&mut Room) -> R,
    ) -> (R, bool) {
        {
            let rooms = self.read();
            if let Some(room) = rooms.get(room_id) {
                return (f(&mut *lock_room(room)), false);
            }
        }

        let mut rooms = self.write();
        let mut created = false;
        let room = rooms.entry(room_id.to_string()).or_insert_with(|| {
            created = true;
            Arc::new(Mutex::new(Room::new(room_id, config)))
        });
        let out = f(&mut *lock_room(room));
        (out, created)
    }

    /// Remove a connection from every room it is in, deleting rooms that
    /// end up empty.
    pub fn remove_connection(&self, conn: &ConnectionId) -> Vec<Departure> {
        let mut departures = Vec::new();
        self.write().retain(|room_id, room| {
            let mut room = lock_room(room);
            let Some(role) = room.leave(conn) else {
                return true;
            };
            let keep = !room.is_empty();
            departures.push(Departure {
                room_id: room_id.clone(),
                role,
                room_removed: !keep,
            });
            keep
        });
        departures.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        departures
    }

    /// Lobby listing, sorted by room ID.
    pub fn list(&self) -> Vec<RoomInfo> {
        let mut rooms: Vec<RoomInfo> = self
            .read()
            .values()
            .map(|room| lock_room(room).info())
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    /// Count rooms.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Get all room IDs, sorted.
    pub fn room_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}
