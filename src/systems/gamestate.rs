use bevy_ecs::prelude::*;
use log::info;

use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::input::InputState;

/// Escape leaves the game.
pub fn handle_escape(input: Res<InputState>, mut state: ResMut<GameState>) {
    if input.escape.just_pressed && state.get() != GameStates::Quitting {
        info!("Escape pressed, quitting");
        state.set(GameStates::Quitting);
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
