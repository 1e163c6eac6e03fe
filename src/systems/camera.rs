//! Camera follow.
use bevy_ecs::prelude::*;

use crate::resources::arena::Arena;
use crate::resources::entitypool::EntityPool;
use crate::resources::worldtime::WorldTime;

/// Ease the camera towards the player, frame-rate independently.
pub fn camera_follow(time: Res<WorldTime>, pool: Res<EntityPool>, mut arena: ResMut<Arena>) {
    let Some(target) = arena
        .player
        .and_then(|handle| pool.get(handle))
        .map(|player| player.common.position)
    else {
        return;
    };
    let blend = 1.0 - (-arena.camera_follow_rate * time.delta).exp2();
    let camera = arena.camera_position;
    arena.camera_position = camera + (target - camera) * blend;
}
