//! Ability cooldown countdowns.
use bevy_ecs::prelude::*;

use crate::components::entity::TIME_EPSILON;
use crate::resources::arena::Arena;
use crate::resources::worldtime::WorldTime;

/// Count `left` down by `dt`, snapping to zero once within [`TIME_EPSILON`].
pub fn count_down(left: f32, dt: f32) -> f32 {
    let next = left - dt;
    if next <= TIME_EPSILON { 0.0 } else { next }
}

/// Run the fire and dash cooldowns down.
pub fn tick_cooldowns(time: Res<WorldTime>, mut arena: ResMut<Arena>) {
    let dt = time.delta;
    arena.lmb_cooldown_left = count_down(arena.lmb_cooldown_left, dt);
    arena.dash_cooldown_left = count_down(arena.dash_cooldown_left, dt);
}
