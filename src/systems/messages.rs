use bevy_ecs::prelude::*;

use crate::events::combat::CombatMessage;

/// Advance the ECS message queue for [`CombatMessage`].
///
/// Messages survive for two updates, so a host that drains after every step
/// sees each one exactly once.
pub fn update_combat_messages(mut messages: ResMut<Messages<CombatMessage>>) {
    messages.update();
}
