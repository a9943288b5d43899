//! Players and room roles.
//!
//! A game always has exactly two [`Player`]s, indexed 0 and 1. Connections
//! that join a room are given a [`Role`]: the first two occupy the player
//! slots, everyone after that watches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of players in every game.
pub const PLAYER_COUNT: usize = 2;

/// One of the two participants of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// 0 for the first player, 1 for the second
    pub index: u8,

    /// Display name
    pub name: String,
}

impl Player {
    pub fn new(index: u8, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// The two players of a fresh game, in turn order.
    pub fn pair() -> [Player; PLAYER_COUNT] {
        [Player::new(0, "Player 1"), Player::new(1, "Player 2")]
    }

    /// Index of the opponent.
    pub fn other_index(&self) -> u8 {
        self.index ^ 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Role assigned to a connection when it joins a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Player 1")]
    Player1,
    #[serde(rename = "Player 2")]
    Player2,
    #[serde(rename = "Spectator")]
    Spectator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player1 => "Player 1",
            Self::Player2 => "Player 2",
            Self::Spectator => "Spectator",
        }
    }

    /// Player index this role moves for, if any.
    pub fn player_index(&self) -> Option<u8> {
        match self {
            Self::Player1 => Some(0),
            Self::Player2 => Some(1),
            Self::Spectator => None,
        }
    }

    /// Role owning the given player index.
    pub fn for_player_index(index: u8) -> Self {
        if index == 0 {
            Self::Player1
        } else {
            Self::Player2
        }
    }

    pub fn is_spectator(&self) -> bool {
        matches!(self, Self::Spectator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
