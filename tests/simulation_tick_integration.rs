//! Single-system tick tests for projectiles, spawning, slugs and effects.

use bevy_ecs::prelude::*;
use glam::Vec2;

use researchwizard::components::easing::Easing;
use researchwizard::components::entity::{Archetype, Entity, ProjectileParams, ProjectileState};
use researchwizard::components::sprite::SpriteId;
use researchwizard::components::team::Team;
use researchwizard::events::combat::CombatMessage;
use researchwizard::game::setup;
use researchwizard::resources::arena::Arena;
use researchwizard::resources::entitypool::{EntityHandle, EntityPool};
use researchwizard::resources::gameconfig::{GameConfig, PoolExhaustion};
use researchwizard::resources::worldtime::WorldTime;
use researchwizard::systems::effects::effects_system;
use researchwizard::systems::enemy::slug_system;
use researchwizard::systems::projectile::projectile_system;
use researchwizard::systems::spawner::enemy_spawner;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// World with every simulation resource, the player removed, and a fixed delta.
fn make_world(config: GameConfig, delta: f32) -> World {
    let mut world = World::new();
    let player = setup(&mut world, config, 1).unwrap();
    world.resource_mut::<EntityPool>().destroy(player);
    world.resource_mut::<Arena>().player = None;
    set_delta(&mut world, delta);
    world
}

/// World keeping the player at the origin.
fn make_world_with_player(config: GameConfig, delta: f32) -> (World, EntityHandle) {
    let mut world = World::new();
    let player = setup(&mut world, config, 1).unwrap();
    set_delta(&mut world, delta);
    (world, player)
}

fn set_delta(world: &mut World, delta: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    time.delta = delta;
}

fn advance_clock(world: &mut World) {
    let mut time = world.resource_mut::<WorldTime>();
    time.elapsed += time.delta;
}

fn tick_projectiles(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(projectile_system);
    schedule.run(world);
}

fn tick_spawner(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(enemy_spawner);
    schedule.run(world);
}

fn tick_slugs(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(slug_system);
    schedule.run(world);
}

fn tick_effects(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(effects_system);
    schedule.run(world);
}

fn drain(world: &mut World) -> Vec<CombatMessage> {
    world
        .resource_mut::<Messages<CombatMessage>>()
        .drain()
        .collect()
}

fn projectile_params(team: Team, position: Vec2, direction: Vec2) -> ProjectileParams {
    ProjectileParams {
        team,
        sprite_id: SpriteId::Projectile0,
        size: Vec2::splat(6.0),
        position,
        direction,
        speed: 100.0,
        knockback: 120.0,
        damage: 10.0,
        easing: Easing::EaseOutQuart,
        flight_lifetime: 1.0,
        impact_lifetime: 0.25,
    }
}

fn spawn(world: &mut World, entity: Entity) -> EntityHandle {
    world.resource_mut::<EntityPool>().create(entity).unwrap()
}

fn slug_at(position: Vec2) -> Entity {
    Entity::slug(position, Vec2::new(9.0, 6.0), 20.0, 0.0)
}

fn slug_count(world: &World) -> usize {
    world
        .resource::<EntityPool>()
        .iter()
        .filter(|(_, e)| e.archetype() == Archetype::Slug)
        .count()
}

// ==================== PROJECTILE TESTS ====================

#[test]
fn projectile_expires_after_tenth_step() {
    let mut world = make_world(GameConfig::new(), 0.1);
    let handle = spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Player, Vec2::ZERO, Vec2::new(3.0, 4.0))),
    );

    let mut last = Vec2::ZERO;
    for step in 1..=9 {
        tick_projectiles(&mut world);
        let pool = world.resource::<EntityPool>();
        let p = pool.get(handle).unwrap_or_else(|| panic!("destroyed early at step {step}"));
        let pos = p.common.position;
        // moves along the fixed direction, always forward
        assert!(pos.length() > last.length());
        assert!((pos.normalize() - Vec2::new(0.6, 0.8)).length() < EPSILON);
        last = pos;
    }

    tick_projectiles(&mut world);
    assert!(world.resource::<EntityPool>().get(handle).is_none());
    let messages = drain(&mut world);
    assert!(messages.contains(&CombatMessage::ProjectileExpired { projectile: handle }));
}

#[test]
fn projectile_hit_damages_knocks_back_and_impacts() {
    let mut world = make_world(GameConfig::new(), 0.1);
    let slug = spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::new(9.0, 6.0), 20.0, 0.0));
    let projectile = spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Player, Vec2::new(0.0, 3.0), Vec2::X)),
    );

    tick_projectiles(&mut world);

    {
        let pool = world.resource::<EntityPool>();
        let s = pool.get(slug).unwrap();
        assert!(approx_eq(s.health().unwrap().current, 10.0));
        assert!(s.common.knockback.is_active());
        assert_eq!(s.common.knockback.direction, Vec2::X);
        assert!(s.is_highlighted());

        let p = pool.get(projectile).unwrap();
        let data = p.as_projectile().unwrap();
        assert_eq!(data.state, ProjectileState::Impact);
        // the impact frame does not also advance the flight clock
        assert_eq!(data.flight.progress, 0.0);
        assert!(p.is_highlighted());
    }
    let messages = drain(&mut world);
    assert!(matches!(
        messages.as_slice(),
        [CombatMessage::Damaged { target, amount, .. }]
            if *target == slug && approx_eq(*amount, 10.0)
    ));

    // impact animation runs 0.25s
    tick_projectiles(&mut world);
    tick_projectiles(&mut world);
    assert!(world.resource::<EntityPool>().get(projectile).is_some());
    tick_projectiles(&mut world);
    assert!(world.resource::<EntityPool>().get(projectile).is_none());
    assert!(world.resource::<EntityPool>().get(slug).is_some());
}

#[test]
fn impact_wins_over_timeout_in_same_frame() {
    let mut world = make_world(GameConfig::new(), 0.1);
    spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::new(9.0, 6.0), 20.0, 0.0));
    let mut params = projectile_params(Team::Player, Vec2::new(0.0, 3.0), Vec2::X);
    params.flight_lifetime = 0.05;
    let projectile = spawn(&mut world, Entity::projectile(params));

    tick_projectiles(&mut world);

    let pool = world.resource::<EntityPool>();
    let p = pool.get(projectile).expect("impacting projectile must survive the frame");
    assert_eq!(p.as_projectile().unwrap().state, ProjectileState::Impact);
}

#[test]
fn lethal_hit_destroys_target() {
    let mut world = make_world(GameConfig::new(), 0.1);
    let slug = spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::new(9.0, 6.0), 10.0, 0.0));
    spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Player, Vec2::new(0.0, 3.0), Vec2::X)),
    );

    tick_projectiles(&mut world);

    assert!(world.resource::<EntityPool>().get(slug).is_none());
    let messages = drain(&mut world);
    assert!(messages.contains(&CombatMessage::Killed {
        target: slug,
        archetype: Archetype::Slug,
    }));
}

#[test]
fn projectile_ignores_same_team() {
    let mut world = make_world(GameConfig::new(), 0.1);
    let slug = spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::new(9.0, 6.0), 20.0, 0.0));
    let projectile = spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Enemy, Vec2::new(0.0, 3.0), Vec2::X)),
    );

    tick_projectiles(&mut world);

    let pool = world.resource::<EntityPool>();
    assert_eq!(pool.get(slug).unwrap().health().unwrap().current, 20.0);
    assert_eq!(
        pool.get(projectile).unwrap().as_projectile().unwrap().state,
        ProjectileState::InFlight
    );
}

#[test]
fn target_damage_cooldown_gates_second_projectile() {
    let mut config = GameConfig::new();
    config.slug.damage_cooldown = 0.5;
    let mut world = make_world(config, 0.1);
    let slug = spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::new(9.0, 6.0), 50.0, 0.5));
    let first = spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Player, Vec2::new(0.0, 3.0), Vec2::X)),
    );
    let second = spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Player, Vec2::new(1.0, 3.0), Vec2::X)),
    );

    advance_clock(&mut world);
    tick_projectiles(&mut world);

    let pool = world.resource::<EntityPool>();
    // both impact, only one lands
    assert_eq!(pool.get(slug).unwrap().health().unwrap().current, 40.0);
    for handle in [first, second] {
        assert_eq!(
            pool.get(handle).unwrap().as_projectile().unwrap().state,
            ProjectileState::Impact
        );
    }
}

#[test]
fn gated_projectile_hit_still_knocks_back() {
    let mut config = GameConfig::new();
    config.slug.damage_cooldown = 5.0;
    let mut world = make_world(config, 0.1);
    let slug = spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::new(9.0, 6.0), 50.0, 5.0));
    assert!(
        world
            .resource_mut::<EntityPool>()
            .get_mut(slug)
            .unwrap()
            .apply_damage(10.0, 0.0)
    );
    let projectile = spawn(
        &mut world,
        Entity::projectile(projectile_params(Team::Player, Vec2::new(0.0, 3.0), Vec2::X)),
    );

    advance_clock(&mut world);
    tick_projectiles(&mut world);

    let pool = world.resource::<EntityPool>();
    let s = pool.get(slug).unwrap();
    assert_eq!(s.health().unwrap().current, 40.0);
    assert!(s.common.knockback.is_active());
    assert_eq!(s.common.knockback.direction, Vec2::X);
    assert!(!s.is_highlighted());
    assert_eq!(
        pool.get(projectile).unwrap().as_projectile().unwrap().state,
        ProjectileState::Impact
    );
    let damaged = drain(&mut world)
        .into_iter()
        .filter(|m| matches!(m, CombatMessage::Damaged { .. }))
        .count();
    assert_eq!(damaged, 0);
}

// ==================== SPAWNER TESTS ====================

fn spawner_config(max_enemies: u32) -> GameConfig {
    let mut config = GameConfig::new();
    config.spawner.max_enemies = max_enemies;
    config.spawner.interval = 1.0;
    config
}

#[test]
fn spawner_respects_budget() {
    let (mut world, player) = make_world_with_player(spawner_config(3), 1.0);

    for expected in 1..=3 {
        tick_spawner(&mut world);
        assert_eq!(slug_count(&world), expected);
    }
    tick_spawner(&mut world);
    assert_eq!(slug_count(&world), 3);
    assert_eq!(world.resource::<Arena>().enemies_spawned, 3);
    assert_eq!(world.resource::<Arena>().spawn_budget_left(), 0);

    let pool = world.resource::<EntityPool>();
    let center = pool.get(player).unwrap().common.position;
    for (_, e) in pool.iter().filter(|(_, e)| e.archetype() == Archetype::Slug) {
        let offset = e.common.position - center;
        assert!(offset.length() >= 10.0 - EPSILON);
        assert!(offset.abs().max_element() <= 50.0 + EPSILON);
    }

    let spawned: Vec<_> = drain(&mut world)
        .into_iter()
        .filter(|m| matches!(m, CombatMessage::EnemySpawned { .. }))
        .collect();
    assert_eq!(spawned.len(), 3);
}

#[test]
fn destroyed_slugs_do_not_return_to_budget() {
    let (mut world, _) = make_world_with_player(spawner_config(1), 1.0);
    tick_spawner(&mut world);
    let slug = world
        .resource::<EntityPool>()
        .iter()
        .find(|(_, e)| e.archetype() == Archetype::Slug)
        .map(|(h, _)| h)
        .unwrap();
    world.resource_mut::<EntityPool>().destroy(slug);

    tick_spawner(&mut world);
    tick_spawner(&mut world);
    assert_eq!(slug_count(&world), 0);
    assert_eq!(world.resource::<Arena>().enemies_spawned, 1);
}

#[test]
fn spawner_waits_for_interval() {
    let (mut world, _) = make_world_with_player(spawner_config(5), 0.25);
    for _ in 0..3 {
        tick_spawner(&mut world);
    }
    assert_eq!(slug_count(&world), 0);
    tick_spawner(&mut world);
    assert_eq!(slug_count(&world), 1);
    assert!(approx_eq(world.resource::<Arena>().spawn_cooldown_left, 1.0));
}

#[test]
fn full_pool_drops_spawn_when_skipping() {
    let (mut world, _) = make_world_with_player(spawner_config(3), 1.0);
    world.insert_resource(EntityPool::with_capacity(0));

    tick_spawner(&mut world);

    assert_eq!(world.resource::<Arena>().enemies_spawned, 0);
    assert_eq!(
        drain(&mut world),
        vec![CombatMessage::SpawnDropped {
            archetype: Archetype::Slug
        }]
    );
}

#[test]
#[should_panic(expected = "entity pool exhausted")]
fn full_pool_aborts_when_configured() {
    let mut config = spawner_config(3);
    config.world.pool_exhaustion = PoolExhaustion::Abort;
    let (mut world, _) = make_world_with_player(config, 1.0);
    world.insert_resource(EntityPool::with_capacity(0));

    tick_spawner(&mut world);
}

// ==================== SLUG TESTS ====================

#[test]
fn slug_seeks_player_within_detection_range() {
    let (mut world, _) = make_world_with_player(GameConfig::new(), 0.1);
    let near = spawn(&mut world, slug_at(Vec2::new(100.0, 0.0)));
    let far = spawn(&mut world, slug_at(Vec2::new(0.0, 600.0)));

    tick_slugs(&mut world);

    let pool = world.resource::<EntityPool>();
    // 15 units/s for 0.1s
    assert!(approx_eq(pool.get(near).unwrap().common.position.x, 98.5));
    assert_eq!(pool.get(far).unwrap().common.position, Vec2::new(0.0, 600.0));
}

#[test]
fn slug_contact_damages_player_with_cooldown() {
    let (mut world, player) = make_world_with_player(GameConfig::new(), 0.1);
    spawn(&mut world, Entity::slug(Vec2::new(3.0, 0.0), Vec2::new(9.0, 6.0), 20.0, 0.0));

    advance_clock(&mut world);
    tick_slugs(&mut world);
    {
        let pool = world.resource::<EntityPool>();
        let p = pool.get(player).unwrap();
        assert_eq!(p.health().unwrap().current, 95.0);
        assert!(p.is_highlighted());
        assert!(p.common.knockback.is_active());
        assert_eq!(p.common.knockback.direction, Vec2::new(-1.0, 0.0));
    }

    // player damage cooldown is 0.5s
    advance_clock(&mut world);
    tick_slugs(&mut world);
    assert_eq!(
        world.resource::<EntityPool>().get(player).unwrap().health().unwrap().current,
        95.0
    );
    for _ in 0..5 {
        advance_clock(&mut world);
    }
    tick_slugs(&mut world);
    assert_eq!(
        world.resource::<EntityPool>().get(player).unwrap().health().unwrap().current,
        90.0
    );
}

#[test]
fn slug_contact_knocks_back_during_damage_cooldown() {
    let (mut world, player) = make_world_with_player(GameConfig::new(), 0.1);
    spawn(&mut world, slug_at(Vec2::new(3.0, 0.0)));

    advance_clock(&mut world);
    tick_slugs(&mut world);
    {
        let mut pool = world.resource_mut::<EntityPool>();
        let p = pool.get_mut(player).unwrap();
        assert_eq!(p.health().unwrap().current, 95.0);
        p.common.knockback.duration_left = 0.0;
        p.common.hit_highlight_left = 0.0;
    }

    // still overlapping, damage is gated but the push and flash are not
    advance_clock(&mut world);
    tick_slugs(&mut world);
    let pool = world.resource::<EntityPool>();
    let p = pool.get(player).unwrap();
    assert_eq!(p.health().unwrap().current, 95.0);
    assert!(p.common.knockback.is_active());
    assert!(p.is_highlighted());
}

#[test]
fn slug_on_player_feet_pushes_along_its_facing() {
    let (mut world, player) = make_world_with_player(GameConfig::new(), 0.1);
    let slug = spawn(&mut world, slug_at(Vec2::ZERO));
    world
        .resource_mut::<EntityPool>()
        .get_mut(slug)
        .unwrap()
        .common
        .facing_direction = Vec2::new(0.0, -1.0);

    advance_clock(&mut world);
    tick_slugs(&mut world);
    {
        let pool = world.resource::<EntityPool>();
        let p = pool.get(player).unwrap();
        assert_eq!(p.health().unwrap().current, 95.0);
        assert!(p.common.knockback.is_active());
        assert_eq!(p.common.knockback.direction, Vec2::new(0.0, -1.0));
    }

    tick_effects(&mut world);
    let position = world.resource::<EntityPool>().get(player).unwrap().common.position;
    assert!(position.y < 0.0);
    assert!(approx_eq(position.x, 0.0));
}

#[test]
fn dashing_player_takes_no_contact_damage() {
    let (mut world, player) = make_world_with_player(GameConfig::new(), 0.1);
    spawn(&mut world, Entity::slug(Vec2::new(3.0, 0.0), Vec2::new(9.0, 6.0), 20.0, 0.0));
    world
        .resource_mut::<EntityPool>()
        .get_mut(player)
        .unwrap()
        .enter_dash();

    advance_clock(&mut world);
    tick_slugs(&mut world);

    let pool = world.resource::<EntityPool>();
    let p = pool.get(player).unwrap();
    assert_eq!(p.health().unwrap().current, 100.0);
    assert!(!p.is_highlighted());
}

#[test]
fn player_defeat_is_reported_once() {
    let mut config = GameConfig::new();
    config.player.max_health = 5.0;
    config.player.damage_cooldown = 0.0;
    let (mut world, player) = make_world_with_player(config, 0.1);
    spawn(&mut world, Entity::slug(Vec2::new(3.0, 0.0), Vec2::new(9.0, 6.0), 20.0, 0.0));

    for _ in 0..3 {
        advance_clock(&mut world);
        tick_slugs(&mut world);
    }

    assert!(world.resource::<EntityPool>().get(player).is_some());
    assert!(world.resource::<Arena>().player_defeated);
    let defeats = drain(&mut world)
        .into_iter()
        .filter(|m| matches!(m, CombatMessage::PlayerDefeated { .. }))
        .count();
    assert_eq!(defeats, 1);
}

// ==================== EFFECTS TESTS ====================

#[test]
fn knockback_moves_then_stops() {
    let mut world = make_world(GameConfig::new(), 0.1);
    let slug = spawn(&mut world, Entity::slug(Vec2::ZERO, Vec2::ONE, 20.0, 0.0));
    {
        let mut pool = world.resource_mut::<EntityPool>();
        let s = pool.get_mut(slug).unwrap();
        s.add_knockback(50.0, 0.15, Vec2::new(0.0, 2.0));
        s.set_hit_highlight(0.1);
    }

    tick_effects(&mut world);
    {
        let pool = world.resource::<EntityPool>();
        let s = pool.get(slug).unwrap();
        assert!(approx_eq(s.common.position.y, 5.0));
        assert!(approx_eq(s.common.knockback.duration_left, 0.05));
        assert_eq!(s.common.hit_highlight_left, 0.0);
    }

    tick_effects(&mut world);
    tick_effects(&mut world);
    let pool = world.resource::<EntityPool>();
    let s = pool.get(slug).unwrap();
    assert!(approx_eq(s.common.position.y, 10.0));
    assert_eq!(s.common.knockback.duration_left, 0.0);
}
