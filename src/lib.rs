//! Tesseract State Library
//!
//! Game engine and room coordination for connect-k played on a
//! four-dimensional board by two players, with any number of spectators.
//!
//! # Overview
//!
//! - **Game Engine** - A fixed-shape 4D board, alternating turns, and
//!   k-in-a-row detection along all 80 directions of the 4D grid.
//!
//! - **Rooms** - One game per room. The first two joiners play, everyone
//!   else spectates. Empty rooms are removed.
//!
//! - **Coordinator** - Authorizes turns against the player to move, routes
//!   engine errors to the submitter and broadcasts applied turns to the room.
//!
//! # Design Principles
//!
//! 1. **Engine errors are values** - Placement failures come back as
//!    `GameError`, never as panics.
//!
//! 2. **One lock per room** - Turns in a room are serialized; unrelated rooms
//!    never wait on each other.
//!
//! 3. **No networking** - Sockets live behind the `Transport` trait.
//!
//! 4. **Serialization-ready** - Every client-visible value converts to JSON.
//!
//! # Example
//!
//! ```rust
//! use tesseract_state::{Coordinator, LocalTransport, Role, TurnOutcome};
//!
//! let transport = LocalTransport::new();
//! let alice = transport.connect("alice");
//! let bob = transport.connect("bob");
//! let coordinator = Coordinator::new(transport);
//!
//! assert_eq!(coordinator.join_room(&alice, "room-1"), Role::Player1);
//! assert_eq!(coordinator.join_room(&bob, "room-1"), Role::Player2);
//!
//! // Out of turn: silently ignored
//! assert_eq!(
//!     coordinator.submit_turn(&bob, "room-1", [0, 0, 0, 0]),
//!     TurnOutcome::Unauthorized
//! );
//!
//! let outcome = coordinator.submit_turn(&alice, "room-1", [0, 0, 0, 0]);
//! assert!(matches!(outcome, TurnOutcome::Applied(ref r) if !r.finished));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
