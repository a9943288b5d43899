//! State management module for four-dimensional connect-k.
//!
//! This module provides the core state types and managers:
//!
//! - `board` - Positions, stones and the flat 4D board
//! - `player` - The two players and connection roles
//! - `game` - Turn sequencing and win/draw judgement
//! - `room` - Rooms, their participants and the room registry
//! - `transport` - Outbound messaging contract and an in-process implementation
//! - `protocol` - JSON client/server messages
//! - `coordinator` - Join/turn/disconnect handling over a transport
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Coordinator<T>                            │
//! │                                                                  │
//! │  ┌────────────────────────────┐      ┌────────────────────────┐  │
//! │  │        RoomRegistry        │      │     T: Transport       │  │
//! │  │                            │      │                        │  │
//! │  │ room_id → Mutex<Room>      │      │ send(conn, msg)        │  │
//! │  │                            │      │ broadcast(group, msg)  │  │
//! │  │  Room                      │      │ join/leave_group       │  │
//! │  │   player_1, player_2       │      │                        │  │
//! │  │   spectators               │      └────────────────────────┘  │
//! │  │   Game ── Board            │                                  │
//! │  └────────────────────────────┘                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Game State
//!
//! ```text
//!               play_turn (no result)
//!                  ┌──────┐
//!                  ▼      │
//!            ┌────────────┴┐  k in a row  ┌─────┐
//!            │ InProgress  │─────────────▶│ Won │
//!            └──────┬──────┘              └─────┘
//!                   │ board full
//!                   ▼
//!               ┌──────┐
//!               │ Draw │
//!               └──────┘
//! ```

pub mod board;
pub mod coordinator;
pub mod game;
pub mod player;
pub mod protocol;
pub mod room;
pub mod transport;

// Re-export commonly used types
pub use board::{shape_cells, Board, BoardShape, Direction, Position, Stone, DIMENSIONS};
pub use coordinator::{Coordinator, CoordinatorConfig, TurnOutcome};
pub use game::{
    ConfigError, Game, GameConfig, GameError, GameResult, GameSnapshot, GameStatus,
    DEFAULT_BOARD_SHAPE, DEFAULT_K_COUNT, DIRECTIONS, MAX_BOARD_CELLS,
};
pub use player::{Player, Role};
pub use protocol::{ClientMessage, ServerMessage};
pub use room::{Departure, Room, RoomInfo, RoomRegistry, RoomSnapshot};
pub use transport::{ConnectionId, LocalTransport, Transport};
