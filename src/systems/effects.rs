//! Post-hit effects: knockback motion, highlight decay and hit bookkeeping.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::entity::Archetype;
use crate::events::combat::CombatMessage;
use crate::resources::arena::Arena;
use crate::resources::entitypool::{EntityHandle, EntityPool};
use crate::resources::worldtime::WorldTime;

/// Bookkeeping after `amount` damage landed on `target`.
///
/// Reports the hit, destroys the target if it is out of health, and flags
/// the player as defeated the first time their health reaches zero. The
/// player entity itself is never destroyed.
pub fn resolve_hit(
    pool: &mut EntityPool,
    arena: &mut Arena,
    messages: &mut MessageWriter<CombatMessage>,
    target: EntityHandle,
    amount: f32,
) {
    let Some(entity) = pool.get(target) else {
        return;
    };
    let archetype = entity.archetype();
    let health_left = entity.health().map(|h| h.current).unwrap_or(0.0);
    let dead = entity.is_dead();
    debug!(
        "{:?} in slot {} took {} damage, {} left",
        archetype, target.index, amount, health_left
    );
    messages.write(CombatMessage::Damaged {
        target,
        amount,
        health_left,
    });

    if !dead {
        return;
    }
    if archetype == Archetype::Player {
        if !arena.player_defeated {
            arena.player_defeated = true;
            info!("Player defeated");
            messages.write(CombatMessage::PlayerDefeated { player: target });
        }
    } else if pool.destroy(target).is_some() {
        debug!("{:?} in slot {} destroyed", archetype, target.index);
        messages.write(CombatMessage::Killed { target, archetype });
    }
}

/// Apply knockback displacement and run hit highlights down.
pub fn effects_system(time: Res<WorldTime>, mut pool: ResMut<EntityPool>) {
    let dt = time.delta;
    for index in 0..pool.capacity() {
        let Some(handle) = pool.handle_at(index) else {
            continue;
        };
        if let Some(entity) = pool.get_mut(handle) {
            entity.tick_knockback(dt);
            entity.tick_hit_highlight(dt);
        }
    }
}
