//! Gameplay messages emitted by the simulation systems.
//!
//! Systems write [`CombatMessage`]s through a `MessageWriter`; the host
//! drains them after each step (see `Game::drain_messages`) for logging,
//! sound cues or statistics. `update_combat_messages` advances the buffer
//! once per frame.

use bevy_ecs::message::Message;
use glam::Vec2;
use serde::Serialize;

use crate::components::entity::Archetype;
use crate::resources::entitypool::EntityHandle;

#[derive(Message, Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CombatMessage {
    /// A hit passed the target's damage gate.
    Damaged {
        target: EntityHandle,
        amount: f32,
        health_left: f32,
    },
    /// A non-player entity reached zero health and was destroyed.
    Killed {
        target: EntityHandle,
        archetype: Archetype,
    },
    /// A projectile ran out of flight time without hitting anything.
    ProjectileExpired { projectile: EntityHandle },
    EnemySpawned {
        enemy: EntityHandle,
        position: Vec2,
    },
    /// The pool was full and the spawn request was skipped.
    SpawnDropped { archetype: Archetype },
    PlayerDefeated { player: EntityHandle },
    DashStarted {
        player: EntityHandle,
        from: Vec2,
        to: Vec2,
    },
    DashEnded { player: EntityHandle },
}
