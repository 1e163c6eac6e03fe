//! Simulation context.
//!
//! [`Game`] owns the `bevy_ecs` [`World`] holding every simulation resource
//! and the per-frame [`Schedule`]. The host creates it once, then calls
//! [`Game::step`] with the measured frame delta and that frame's input, and
//! reads back a [`RenderFrame`] and the emitted [`CombatMessage`]s.
//!
//! Frame order:
//! 1. clamp and scale the delta into `WorldTime`
//! 2. fold the input frame into `InputState`
//! 3. advance message buffers, handle escape
//! 4. while playing: cooldowns, player, spawner, slugs, projectiles,
//!    knockback/highlight effects, camera

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use glam::Vec2;
use log::info;
use thiserror::Error;

use crate::components::entity::Entity;
use crate::components::sprite::{SheetError, SpriteId};
use crate::events::combat::CombatMessage;
use crate::resources::arena::Arena;
use crate::resources::entitypool::{EntityHandle, EntityPool, PoolError};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::input::{InputFrame, InputState};
use crate::resources::spawnrng::SpawnRng;
use crate::resources::spritestore::SpriteStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::camera_follow;
use crate::systems::cooldown::tick_cooldowns;
use crate::systems::effects::effects_system;
use crate::systems::enemy::slug_system;
use crate::systems::gamestate::{handle_escape, state_is_playing};
use crate::systems::input::apply_input_frame;
use crate::systems::messages::update_combat_messages;
use crate::systems::player::player_system;
use crate::systems::projectile::projectile_system;
use crate::systems::render::{RenderFrame, build_render_frame};
use crate::systems::spawner::enemy_spawner;
use crate::systems::time::update_world_time;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid sprite configuration: {0}")]
    Sprite(#[from] SheetError),
    #[error("could not create the player: {0}")]
    Pool(#[from] PoolError),
}

/// Insert every simulation resource into `world` and create the player.
pub fn setup(world: &mut World, config: GameConfig, seed: u64) -> Result<EntityHandle, SetupError> {
    let sprites = SpriteStore::with_defaults()?;
    let mut pool = EntityPool::default();
    let player = pool.create(Entity::player(
        Vec2::ZERO,
        sprites.size_of(SpriteId::Player),
        config.player.max_health,
        config.player.damage_cooldown,
    ))?;

    let mut arena = Arena::from_config(&config);
    arena.player = Some(player);

    let mut state = GameState::new();
    state.set(GameStates::Playing);

    world.insert_resource(WorldTime::default().with_max_delta(config.world.max_delta));
    world.insert_resource(InputState::default());
    world.insert_resource(SpawnRng::new(seed));
    world.insert_resource(sprites);
    world.insert_resource(pool);
    world.insert_resource(arena);
    world.insert_resource(state);
    world.insert_resource(config);
    world.init_resource::<Messages<CombatMessage>>();

    info!("World ready, player in slot {}, seed {}", player.index, seed);
    Ok(player)
}

/// The per-frame simulation schedule.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            update_combat_messages,
            handle_escape,
            (
                tick_cooldowns,
                player_system,
                enemy_spawner,
                slug_system,
                projectile_system,
                effects_system,
                camera_follow,
            )
                .chain()
                .run_if(state_is_playing),
        )
            .chain(),
    );
    schedule
}

pub struct Game {
    world: World,
    schedule: Schedule,
    player: EntityHandle,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        let mut world = World::new();
        let player = setup(&mut world, config, seed)?;
        Ok(Self {
            world,
            schedule: build_schedule(),
            player,
        })
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self, dt: f32, input: &InputFrame) {
        update_world_time(&mut self.world, dt);
        apply_input_frame(&mut self.world, input);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> EntityHandle {
        self.player
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.world.resource::<EntityPool>().get(self.player)
    }

    pub fn pool(&self) -> &EntityPool {
        self.world.resource::<EntityPool>()
    }

    pub fn arena(&self) -> &Arena {
        self.world.resource::<Arena>()
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    pub fn state(&self) -> GameStates {
        self.world.resource::<GameState>().get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == GameStates::Playing
    }

    /// Take every message emitted since the last drain.
    pub fn drain_messages(&mut self) -> Vec<CombatMessage> {
        self.world
            .resource_mut::<Messages<CombatMessage>>()
            .drain()
            .collect()
    }

    pub fn render_frame(&self) -> RenderFrame {
        build_render_frame(&self.world)
    }
}
