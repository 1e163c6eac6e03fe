//! Slug behavior: greedy seek towards the player and contact damage.
use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::entity::{Archetype, Entity};
use crate::components::knockback::MIN_KNOCKBACK_COMPONENT;
use crate::events::combat::CombatMessage;
use crate::resources::arena::Arena;
use crate::resources::entitypool::{EntityHandle, EntityPool};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::effects::resolve_hit;

pub fn slug_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut arena: ResMut<Arena>,
    mut pool: ResMut<EntityPool>,
    mut messages: MessageWriter<CombatMessage>,
) {
    let Some(player_handle) = arena.player else {
        return;
    };
    let Some(player) = pool.get(player_handle).copied() else {
        return;
    };
    let dt = time.delta;
    let now = time.elapsed;
    let target = player.common.position;
    let player_box = player.hitbox();

    let mut contacts: SmallVec<[EntityHandle; 8]> = SmallVec::new();
    for index in 0..pool.capacity() {
        let Some(handle) = pool.handle_at(index) else {
            continue;
        };
        let Some(slug) = pool.get_mut(handle) else {
            continue;
        };
        if slug.archetype() != Archetype::Slug {
            continue;
        }

        let to_player = target - slug.common.position;
        let distance = to_player.length();
        if distance <= config.slug.detection_distance && distance > f32::EPSILON {
            slug.common.velocity = to_player / distance * config.slug.speed;
            slug.common.facing_direction = to_player / distance;
        } else {
            slug.common.velocity = Vec2::ZERO;
        }
        slug.common.position += slug.common.velocity * dt;

        if slug.common.can_collide
            && slug.common.collision_layer.intersects(player.common.entity_layer)
            && slug.hitbox().overlaps(&player_box)
        {
            contacts.push(handle);
        }
    }

    if contacts.is_empty() || !player.common.can_collide || player.is_invincible() {
        return;
    }

    for slug_handle in contacts {
        let Some(slug) = pool.get(slug_handle).copied() else {
            continue;
        };
        let Some(player) = pool.get_mut(player_handle) else {
            return;
        };
        // pushed and flashed on every contact; only the damage is gated
        let away = knockback_away_from(&slug, player);
        player.add_knockback(
            config.slug.contact_knockback,
            config.effects.knockback_duration,
            away,
        );
        player.set_hit_highlight(config.effects.hit_highlight);
        if !player.apply_damage(config.slug.contact_damage, now) {
            continue;
        }
        resolve_hit(
            &mut pool,
            &mut arena,
            &mut messages,
            player_handle,
            config.slug.contact_damage,
        );
    }
}

/// Direction pushing `player` away from `slug`.
///
/// A seeking slug ends up standing on the player's feet; once the two
/// positions coincide the push follows the slug's facing direction.
pub fn knockback_away_from(slug: &Entity, player: &Entity) -> Vec2 {
    let away = player.common.position - slug.common.position;
    if away.x.abs() < MIN_KNOCKBACK_COMPONENT && away.y.abs() < MIN_KNOCKBACK_COMPONENT {
        slug.common.facing_direction
    } else {
        away
    }
}
