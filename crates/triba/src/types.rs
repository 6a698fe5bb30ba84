//! Core domain types for Triba.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Player {
    /// Player A (starts the first game).
    A,
    /// Player B (starts every other game).
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

/// Board variant selected at game creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Variant {
    /// Fixed point set for the whole game.
    Standard,
    /// Random points are withdrawn from play at scheduled move counts.
    Dynamic,
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended; the last player to commit a triangle wins.
    Won(Player),
}
