//! Global gameplay state shared by the per-frame systems.
//!
//! [`Arena`] holds everything that is not an entity: camera, ability
//! cooldowns, the in-progress dash record, movement tuning and the enemy
//! spawn budget. It is built from [`GameConfig`] at setup and mutated every
//! frame.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use serde::Serialize;

use crate::components::entity::TIME_EPSILON;
use crate::resources::entitypool::EntityHandle;
use crate::resources::gameconfig::GameConfig;

/// Trajectory of the dash currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashRecord {
    pub initial_position: Vec2,
    pub target: Vec2,
    pub started_at: f32,
}

/// Dash timing and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashTuning {
    pub distance: f32,
    pub flight_duration: f32,
    pub highlight1_start: f32,
    pub highlight2_start: f32,
    pub highlight_duration: f32,
    /// Flight plus recovery tail.
    pub duration: f32,
}

impl DashTuning {
    /// Position along `record` after `elapsed` seconds of dashing.
    ///
    /// Linear from the initial position to the target during the flight
    /// window, then pinned to the target.
    pub fn position_at(&self, record: &DashRecord, elapsed: f32) -> Vec2 {
        if self.flight_duration <= 0.0 || elapsed >= self.flight_duration - TIME_EPSILON {
            return record.target;
        }
        let t = (elapsed / self.flight_duration).clamp(0.0, 1.0);
        record.initial_position.lerp(record.target, t)
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.duration - TIME_EPSILON
    }

    /// Whether `elapsed` falls inside one of the two highlight windows.
    pub fn is_highlighted(&self, elapsed: f32) -> bool {
        let within = |start: f32| elapsed >= start && elapsed < start + self.highlight_duration;
        within(self.highlight1_start) || within(self.highlight2_start)
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct Arena {
    pub camera_position: Vec2,
    pub camera_zoom: f32,
    pub camera_follow_rate: f32,

    pub lmb_cooldown: f32,
    pub lmb_cooldown_left: f32,
    pub dash_cooldown: f32,
    pub dash_cooldown_left: f32,

    pub dash: DashTuning,
    pub dash_record: Option<DashRecord>,

    pub player_speed: f32,
    pub drag_force: f32,

    pub enemies_max: u32,
    pub enemies_spawned: u32,
    pub spawn_cooldown: f32,
    pub spawn_cooldown_left: f32,

    pub player: Option<EntityHandle>,
    /// Set once the player's health has reached zero.
    pub player_defeated: bool,
}

impl Arena {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            camera_position: Vec2::ZERO,
            camera_zoom: config.world.camera_zoom,
            camera_follow_rate: config.world.camera_follow_rate,
            lmb_cooldown: config.fire.cooldown,
            lmb_cooldown_left: 0.0,
            dash_cooldown: config.dash.cooldown,
            dash_cooldown_left: 0.0,
            dash: DashTuning {
                distance: config.dash.distance,
                flight_duration: config.dash.flight_duration,
                highlight1_start: config.dash.highlight1_start,
                highlight2_start: config.dash.highlight2_start,
                highlight_duration: config.dash.highlight_duration,
                duration: config.dash.duration(),
            },
            dash_record: None,
            player_speed: config.player.speed,
            drag_force: config.player.drag,
            enemies_max: config.spawner.max_enemies,
            enemies_spawned: 0,
            spawn_cooldown: config.spawner.interval,
            spawn_cooldown_left: config.spawner.interval,
            player: None,
            player_defeated: false,
        }
    }

    /// Dash readiness in `[0, 1]` for the HUD.
    pub fn dash_readiness(&self) -> f32 {
        readiness(self.dash_cooldown_left, self.dash_cooldown)
    }

    /// Primary-fire readiness in `[0, 1]` for the HUD.
    pub fn fire_readiness(&self) -> f32 {
        readiness(self.lmb_cooldown_left, self.lmb_cooldown)
    }

    pub fn spawn_budget_left(&self) -> u32 {
        self.enemies_max.saturating_sub(self.enemies_spawned)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

fn readiness(left: f32, total: f32) -> f32 {
    if total <= 0.0 {
        1.0
    } else {
        (1.0 - left / total).clamp(0.0, 1.0)
    }
}
