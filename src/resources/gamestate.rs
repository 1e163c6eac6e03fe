//! High-level game state resource.
//!
//! Gameplay systems only run while the state is [`GameStates::Playing`];
//! see `crate::systems::gamestate::state_is_playing`.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GameStates {
    #[default]
    None,
    Playing,
    Quitting,
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }
    /// Update the current state immediately.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}
