//! Projectile flight and impact.
//!
//! In flight, a projectile first looks for something to hit. A hit damages
//! the target (through its own damage gate), always knocks it back along the
//! projectile's direction and switches the projectile to impact. Otherwise
//! the flight clock advances and the projectile moves at
//! `speed * easing(progress / total)`, expiring when the clock runs out.
//! An impacting projectile only plays out its impact animation and is then
//! destroyed.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::entity::{Entity, ProjectileState};
use crate::events::combat::CombatMessage;
use crate::resources::arena::Arena;
use crate::resources::entitypool::{EntityHandle, EntityPool};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::effects::resolve_hit;

/// Whether `projectile` may hit `other`.
pub fn can_hit(projectile: &Entity, other: &Entity) -> bool {
    other.common.can_collide
        && other.common.team != projectile.common.team
        && projectile
            .common
            .collision_layer
            .intersects(other.common.entity_layer)
        && projectile.hitbox().overlaps(&other.hitbox())
}

/// First entity in slot order that `projectile` (stored at `own`) hits.
pub fn find_target(
    pool: &EntityPool,
    own: EntityHandle,
    projectile: &Entity,
) -> Option<EntityHandle> {
    pool.iter()
        .filter(|(handle, _)| *handle != own)
        .find(|(_, other)| can_hit(projectile, other))
        .map(|(handle, _)| handle)
}

pub fn projectile_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut arena: ResMut<Arena>,
    mut pool: ResMut<EntityPool>,
    mut messages: MessageWriter<CombatMessage>,
) {
    let dt = time.delta;
    let now = time.elapsed;

    for index in 0..pool.capacity() {
        let Some(handle) = pool.handle_at(index) else {
            continue;
        };
        let Some(entity) = pool.get(handle).copied() else {
            continue;
        };
        let Some(data) = entity.as_projectile().copied() else {
            continue;
        };

        match data.state {
            ProjectileState::InFlight => {
                if let Some(target) = find_target(&pool, handle, &entity) {
                    let Some((projectile, struck)) = pool.get_pair_mut(handle, target) else {
                        continue;
                    };
                    let landed = struck.apply_damage(data.damage, now);
                    struck.add_knockback(
                        data.knockback,
                        config.effects.knockback_duration,
                        data.direction,
                    );
                    if landed {
                        struck.set_hit_highlight(config.effects.hit_highlight);
                    }
                    projectile.set_hit_highlight(config.effects.hit_highlight);
                    projectile.common.velocity = glam::Vec2::ZERO;
                    if let Some(p) = projectile.as_projectile_mut() {
                        p.state = ProjectileState::Impact;
                    }
                    trace!("Projectile {} hit slot {}", handle.index, target.index);
                    if landed {
                        resolve_hit(&mut pool, &mut arena, &mut messages, target, data.damage);
                    }
                    continue;
                }

                let Some(projectile) = pool.get_mut(handle) else {
                    continue;
                };
                let Some(p) = projectile.as_projectile_mut() else {
                    continue;
                };
                p.flight.advance(dt);
                let velocity = p.direction * p.easing.apply(p.flight.fraction()) * p.speed;
                let finished = p.flight.is_finished();
                projectile.common.velocity = velocity;
                projectile.common.position += velocity * dt;
                if finished {
                    pool.destroy(handle);
                    trace!("Projectile {} expired", handle.index);
                    messages.write(CombatMessage::ProjectileExpired { projectile: handle });
                }
            }
            ProjectileState::Impact => {
                let Some(p) = pool.get_mut(handle).and_then(Entity::as_projectile_mut) else {
                    continue;
                };
                p.impact.advance(dt);
                if p.impact.is_finished() {
                    pool.destroy(handle);
                }
            }
        }
    }
}
