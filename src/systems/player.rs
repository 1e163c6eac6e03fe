//! Player control: the free-move/dash state machine and primary fire.
//!
//! In free move the player accelerates along the input axis against a drag
//! force. A dash snapshots a straight trajectory, flies it linearly during
//! the flight window, then holds position until the dash duration runs out.
//! The player is invincible and non-collidable for the whole dash.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, trace};

use crate::components::entity::{Entity, PlayerState, ProjectileParams};
use crate::components::sprite::SpriteId;
use crate::components::team::Team;
use crate::events::combat::CombatMessage;
use crate::resources::arena::{Arena, DashRecord};
use crate::resources::entitypool::{EntityHandle, EntityPool};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::spritestore::SpriteStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::spawner::spawn_entity;

/// Squared length under which an input or aim vector counts as zero.
const MIN_DIRECTION_SQ: f32 = 1e-6;

/// Kinematic step with drag, matching the game's tuned feel:
///
/// ```text
/// a  = axis * speed - v * drag
/// p += a * 0.5 * dt^2 + v * dt
/// v += a * dt
/// ```
pub fn integrate_free_move(entity: &mut Entity, axis: Vec2, speed: f32, drag: f32, dt: f32) {
    let common = &mut entity.common;
    let acceleration = axis * speed - common.velocity * drag;
    common.position += acceleration * 0.5 * dt * dt + common.velocity * dt;
    common.velocity += acceleration * dt;
}

/// Dash direction: the input axis, or the facing direction when idle.
pub fn dash_direction(axis: Vec2, facing: Vec2) -> Vec2 {
    if axis.length_squared() > MIN_DIRECTION_SQ {
        axis.normalize()
    } else {
        facing.try_normalize().unwrap_or(Vec2::X)
    }
}

fn start_dash(
    entity: &mut Entity,
    handle: EntityHandle,
    axis: Vec2,
    now: f32,
    arena: &mut Arena,
    messages: &mut MessageWriter<CombatMessage>,
) {
    let from = entity.common.position;
    let to = from + dash_direction(axis, entity.common.facing_direction) * arena.dash.distance;
    entity.enter_dash();
    arena.dash_record = Some(DashRecord {
        initial_position: from,
        target: to,
        started_at: now,
    });
    arena.dash_cooldown_left = arena.dash_cooldown;
    debug!("Dash from ({:.1}, {:.1}) to ({:.1}, {:.1})", from.x, from.y, to.x, to.y);
    messages.write(CombatMessage::DashStarted {
        player: handle,
        from,
        to,
    });
}

fn advance_dash(
    entity: &mut Entity,
    handle: EntityHandle,
    now: f32,
    arena: &mut Arena,
    messages: &mut MessageWriter<CombatMessage>,
) {
    let Some(record) = arena.dash_record else {
        // no trajectory to follow; end the dash where we stand
        entity.leave_dash();
        return;
    };
    let elapsed = now - record.started_at;
    entity.common.position = arena.dash.position_at(&record, elapsed);
    if arena.dash.is_finished(elapsed) {
        entity.leave_dash();
        arena.dash_record = None;
        debug!("Dash ended after {:.3}s", elapsed);
        messages.write(CombatMessage::DashEnded { player: handle });
    }
}

pub fn player_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    sprites: Res<SpriteStore>,
    mut arena: ResMut<Arena>,
    mut pool: ResMut<EntityPool>,
    mut messages: MessageWriter<CombatMessage>,
) {
    let Some(handle) = arena.player else {
        return;
    };
    let now = time.elapsed;
    let dt = time.delta;

    let (state, origin, facing) = {
        let Some(player) = pool.get_mut(handle) else {
            return;
        };
        let Some(state) = player.as_player().map(|p| p.state) else {
            return;
        };
        match state {
            PlayerState::FreeMove => {
                if input.dash.just_pressed && arena.dash_cooldown_left <= 0.0 {
                    start_dash(player, handle, input.axis, now, &mut arena, &mut messages);
                } else {
                    let (speed, drag) = (arena.player_speed, arena.drag_force);
                    integrate_free_move(player, input.axis, speed, drag, dt);
                    if input.axis.length_squared() > MIN_DIRECTION_SQ {
                        player.common.facing_direction = input.axis.normalize();
                    }
                }
            }
            PlayerState::Dash => advance_dash(player, handle, now, &mut arena, &mut messages),
        }
        let state = player.as_player().map(|p| p.state).unwrap_or(state);
        trace!(
            "Player {:?} at ({:.2}, {:.2})",
            state, player.common.position.x, player.common.position.y
        );
        (state, player.body_center(), player.common.facing_direction)
    };

    if state != PlayerState::FreeMove
        || !input.primary_fire.active
        || arena.lmb_cooldown_left > 0.0
    {
        return;
    }

    let aim = input.mouse_world_position - origin;
    let direction = if aim.length_squared() > MIN_DIRECTION_SQ {
        aim
    } else {
        facing
    };
    let projectile = Entity::projectile(ProjectileParams {
        team: Team::Player,
        sprite_id: SpriteId::Projectile0,
        size: sprites.size_of(SpriteId::Projectile0),
        position: origin,
        direction,
        speed: config.fire.projectile_speed,
        knockback: config.fire.projectile_knockback,
        damage: config.fire.projectile_damage,
        easing: config.fire.easing,
        flight_lifetime: config.fire.flight_lifetime,
        impact_lifetime: sprites.sheet_duration(SpriteId::Projectile0Sheet),
    });
    arena.lmb_cooldown_left = arena.lmb_cooldown;
    spawn_entity(
        &mut pool,
        config.world.pool_exhaustion,
        &mut messages,
        projectile,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_move_formula() {
        let mut e = Entity::player(Vec2::ZERO, Vec2::ONE, 100.0, 0.5);
        integrate_free_move(&mut e, Vec2::X, 900.0, 8.3, 0.1);
        // a = 900, p = 900 * 0.5 * 0.01, v = 90
        assert!((e.common.position.x - 4.5).abs() < 1e-4);
        assert!((e.common.velocity.x - 90.0).abs() < 1e-3);

        integrate_free_move(&mut e, Vec2::ZERO, 900.0, 8.3, 0.1);
        // a = -90 * 8.3 = -747
        let expected_x = 4.5 + (-747.0 * 0.5 * 0.01) + 90.0 * 0.1;
        assert!((e.common.position.x - expected_x).abs() < 1e-3);
        assert!((e.common.velocity.x - (90.0 - 74.7)).abs() < 1e-3);
    }

    #[test]
    fn test_dash_direction_falls_back_to_facing() {
        assert_eq!(dash_direction(Vec2::ZERO, Vec2::new(0.0, -1.0)), Vec2::new(0.0, -1.0));
        assert_eq!(dash_direction(Vec2::new(0.0, 2.0), Vec2::X), Vec2::Y);
        assert_eq!(dash_direction(Vec2::ZERO, Vec2::ZERO), Vec2::X);
    }
}
