//! Enemy spawning and the shared spawn helper.
//!
//! A single countdown drives spawning: every time it expires it is reset to
//! the configured interval, and a slug is placed near the player if the
//! budget allows. The spawn counter only ever grows; destroyed slugs do not
//! return to the budget.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error, warn};

use crate::components::entity::Entity;
use crate::components::sprite::SpriteId;
use crate::events::combat::CombatMessage;
use crate::resources::arena::Arena;
use crate::resources::entitypool::{EntityHandle, EntityPool};
use crate::resources::gameconfig::{GameConfig, PoolExhaustion};
use crate::resources::spawnrng::SpawnRng;
use crate::resources::spritestore::SpriteStore;
use crate::resources::worldtime::WorldTime;

/// Store `entity` in the pool, applying the configured exhaustion policy
/// when no slot is free.
///
/// # Panics
/// Under [`PoolExhaustion::Abort`] when the pool is full.
pub fn spawn_entity(
    pool: &mut EntityPool,
    policy: PoolExhaustion,
    messages: &mut MessageWriter<CombatMessage>,
    entity: Entity,
) -> Option<EntityHandle> {
    let archetype = entity.archetype();
    match pool.create(entity) {
        Ok(handle) => {
            debug!("Spawned {:?} in slot {}", archetype, handle.index);
            Some(handle)
        }
        Err(err) => match policy {
            PoolExhaustion::Skip => {
                warn!("Dropping {:?} spawn: {}", archetype, err);
                messages.write(CombatMessage::SpawnDropped { archetype });
                None
            }
            PoolExhaustion::Abort => {
                error!("Cannot spawn {:?}: {}", archetype, err);
                panic!("{}", err);
            }
        },
    }
}

/// Position for a new slug: random in the square around `center`, pushed
/// out to `min_distance` when it lands too close.
pub fn spawn_position(
    rng: &mut SpawnRng,
    center: Vec2,
    half_extent: f32,
    min_distance: f32,
) -> Vec2 {
    let candidate = rng.point_around(center, half_extent);
    let offset = candidate - center;
    let distance = offset.length();
    if distance >= min_distance {
        return candidate;
    }
    let direction = if distance > f32::EPSILON {
        offset / distance
    } else {
        Vec2::X
    };
    center + direction * min_distance
}

pub fn enemy_spawner(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    sprites: Res<SpriteStore>,
    mut arena: ResMut<Arena>,
    mut pool: ResMut<EntityPool>,
    mut rng: ResMut<SpawnRng>,
    mut messages: MessageWriter<CombatMessage>,
) {
    arena.spawn_cooldown_left -= time.delta;
    if arena.spawn_cooldown_left > 0.0 {
        return;
    }
    arena.spawn_cooldown_left = arena.spawn_cooldown;

    if arena.spawn_budget_left() == 0 {
        return;
    }

    let center = arena
        .player
        .and_then(|handle| pool.get(handle))
        .map(|player| player.common.position)
        .unwrap_or(Vec2::ZERO);
    let position = spawn_position(
        &mut rng,
        center,
        config.spawner.half_extent,
        config.spawner.min_distance,
    );
    let slug = Entity::slug(
        position,
        sprites.size_of(SpriteId::Slug),
        config.slug.max_health,
        config.slug.damage_cooldown,
    );

    if let Some(handle) = spawn_entity(
        &mut pool,
        config.world.pool_exhaustion,
        &mut messages,
        slug,
    ) {
        arena.enemies_spawned += 1;
        debug!(
            "Slug {}/{} at ({:.1}, {:.1})",
            arena.enemies_spawned, arena.enemies_max, position.x, position.y
        );
        messages.write(CombatMessage::EnemySpawned {
            enemy: handle,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position_respects_min_distance() {
        let mut rng = SpawnRng::new(3);
        let center = Vec2::new(5.0, 5.0);
        for _ in 0..500 {
            let p = spawn_position(&mut rng, center, 50.0, 10.0);
            assert!(p.distance(center) >= 10.0 - 1e-4);
        }
    }

    #[test]
    fn test_spawn_position_zero_extent_is_nudged() {
        let mut rng = SpawnRng::new(3);
        let p = spawn_position(&mut rng, Vec2::ZERO, 0.0, 10.0);
        assert_eq!(p, Vec2::new(10.0, 0.0));
    }
}
