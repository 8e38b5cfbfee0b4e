//! Session state.
//!
//! The gallery has a single playing state; every gameplay entity carries
//! `DespawnOnExit(GameState::InGame)` so leaving it tears the session down.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
