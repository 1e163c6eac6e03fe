//! The game-object record stored in each [`EntityPool`] slot.
//!
//! An [`Entity`] is a shared [`Common`] block (transform, team, collision
//! masks, hit effects, render info) plus an [`EntityKind`] payload carrying
//! only the data its archetype uses. Behavior is selected by matching on the
//! kind; each archetype has a dedicated constructor.
//!
//! Only two archetypes have a state machine:
//! - players switch between [`PlayerState::FreeMove`] and [`PlayerState::Dash`]
//! - projectiles go [`ProjectileState::InFlight`] → [`ProjectileState::Impact`]
//!   and are destroyed after that
//!
//! [`EntityPool`]: crate::resources::entitypool::EntityPool

use glam::Vec2;
use serde::Serialize;

use crate::components::easing::Easing;
use crate::components::health::Health;
use crate::components::knockback::Knockback;
use crate::components::range::Range2f;
use crate::components::sprite::SpriteId;
use crate::components::team::{LayerMask, Team};

/// Slack applied to time thresholds so that many small f32 steps still reach
/// a total they should sum to exactly.
pub const TIME_EPSILON: f32 = 1e-4;

/// Fixed category of a game object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    #[default]
    Nil,
    Slug,
    Player,
    Projectile,
    BrownRock,
}

/// Flat view of the archetype-scoped state, for logging and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    #[default]
    Nil,
    ProjectileInFlight,
    ProjectileImpact,
    PlayerFreeMove,
    PlayerDash,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerState {
    #[default]
    FreeMove,
    Dash,
}

impl PlayerState {
    pub fn can_transition_to(self, next: PlayerState) -> bool {
        matches!(
            (self, next),
            (PlayerState::FreeMove, PlayerState::Dash) | (PlayerState::Dash, PlayerState::FreeMove)
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectileState {
    #[default]
    InFlight,
    Impact,
}

/// A countdown expressed as accumulated progress towards a total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Lifetime {
    pub total: f32,
    pub progress: f32,
}

impl Lifetime {
    pub fn new(total: f32) -> Self {
        Self {
            total,
            progress: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.progress += dt;
    }

    /// Progress over total, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.total <= 0.0 {
            1.0
        } else {
            (self.progress / self.total).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= self.total - TIME_EPSILON
    }
}

/// Data every archetype carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Common {
    pub team: Team,
    /// Layers this entity belongs to.
    pub entity_layer: LayerMask,
    /// Layers this entity can hit.
    pub collision_layer: LayerMask,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Unit vector.
    pub facing_direction: Vec2,
    /// Hitbox and display size in world units.
    pub size: Vec2,
    pub can_collide: bool,
    pub hit_highlight_left: f32,
    pub knockback: Knockback,
    pub render_sprite: bool,
    pub sprite_id: SpriteId,
}

impl Default for Common {
    fn default() -> Self {
        Self {
            team: Team::Neutral,
            entity_layer: LayerMask::NONE,
            collision_layer: LayerMask::NONE,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            facing_direction: Vec2::X,
            size: Vec2::ZERO,
            can_collide: true,
            hit_highlight_left: 0.0,
            knockback: Knockback::default(),
            render_sprite: true,
            sprite_id: SpriteId::Nil,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerData {
    pub state: PlayerState,
    pub health: Health,
    pub is_invincible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlugData {
    pub health: Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileData {
    pub state: ProjectileState,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub knockback: f32,
    pub damage: f32,
    pub flight: Lifetime,
    /// Drives the impact sprite-sheet animation.
    pub impact: Lifetime,
    pub easing: Easing,
}

/// Archetype-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EntityKind {
    Slug(SlugData),
    Player(PlayerData),
    Projectile(ProjectileData),
    BrownRock,
}

/// Construction parameters for [`Entity::projectile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileParams {
    pub team: Team,
    pub sprite_id: SpriteId,
    pub size: Vec2,
    pub position: Vec2,
    /// Normalized on construction.
    pub direction: Vec2,
    pub speed: f32,
    pub knockback: f32,
    pub damage: f32,
    pub easing: Easing,
    pub flight_lifetime: f32,
    pub impact_lifetime: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Entity {
    pub common: Common,
    pub kind: EntityKind,
}

impl Entity {
    pub fn player(position: Vec2, size: Vec2, max_health: f32, damage_cooldown: f32) -> Self {
        Self {
            common: Common {
                team: Team::Player,
                entity_layer: LayerMask::PLAYER,
                collision_layer: LayerMask::ENEMY | LayerMask::TERRAIN,
                position,
                size,
                sprite_id: SpriteId::Player,
                ..Common::default()
            },
            kind: EntityKind::Player(PlayerData {
                state: PlayerState::FreeMove,
                health: Health::new(max_health, damage_cooldown),
                is_invincible: false,
            }),
        }
    }

    pub fn slug(position: Vec2, size: Vec2, max_health: f32, damage_cooldown: f32) -> Self {
        Self {
            common: Common {
                team: Team::Enemy,
                entity_layer: LayerMask::ENEMY,
                collision_layer: LayerMask::PLAYER,
                position,
                size,
                sprite_id: SpriteId::Slug,
                ..Common::default()
            },
            kind: EntityKind::Slug(SlugData {
                health: Health::new(max_health, damage_cooldown),
            }),
        }
    }

    pub fn projectile(params: ProjectileParams) -> Self {
        let direction = params.direction.normalize_or_zero();
        Self {
            common: Common {
                team: params.team,
                entity_layer: LayerMask::PROJECTILE,
                collision_layer: LayerMask::PLAYER | LayerMask::ENEMY | LayerMask::TERRAIN,
                position: params.position,
                facing_direction: direction,
                size: params.size,
                sprite_id: params.sprite_id,
                ..Common::default()
            },
            kind: EntityKind::Projectile(ProjectileData {
                state: ProjectileState::InFlight,
                direction,
                speed: params.speed,
                knockback: params.knockback,
                damage: params.damage,
                flight: Lifetime::new(params.flight_lifetime),
                impact: Lifetime::new(params.impact_lifetime),
                easing: params.easing,
            }),
        }
    }

    pub fn archetype(&self) -> Archetype {
        match self.kind {
            EntityKind::Slug(_) => Archetype::Slug,
            EntityKind::Player(_) => Archetype::Player,
            EntityKind::Projectile(_) => Archetype::Projectile,
            EntityKind::BrownRock => Archetype::BrownRock,
        }
    }

    pub fn state(&self) -> EntityState {
        match &self.kind {
            EntityKind::Player(p) => match p.state {
                PlayerState::FreeMove => EntityState::PlayerFreeMove,
                PlayerState::Dash => EntityState::PlayerDash,
            },
            EntityKind::Projectile(p) => match p.state {
                ProjectileState::InFlight => EntityState::ProjectileInFlight,
                ProjectileState::Impact => EntityState::ProjectileImpact,
            },
            _ => EntityState::Nil,
        }
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile(_))
    }

    pub fn as_player(&self) -> Option<&PlayerData> {
        match &self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&ProjectileData> {
        match &self.kind {
            EntityKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_projectile_mut(&mut self) -> Option<&mut ProjectileData> {
        match &mut self.kind {
            EntityKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn health(&self) -> Option<&Health> {
        match &self.kind {
            EntityKind::Player(p) => Some(&p.health),
            EntityKind::Slug(s) => Some(&s.health),
            _ => None,
        }
    }

    pub fn health_mut(&mut self) -> Option<&mut Health> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(&mut p.health),
            EntityKind::Slug(s) => Some(&mut s.health),
            _ => None,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.as_player().is_some_and(|p| p.is_invincible)
    }

    /// Apply `amount` damage at world time `now`, honoring invincibility and
    /// the entity's own damage cooldown. Returns true when the hit landed.
    pub fn apply_damage(&mut self, amount: f32, now: f32) -> bool {
        if self.is_invincible() {
            return false;
        }
        match self.health_mut() {
            Some(health) => health.apply_damage(amount, now),
            None => false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health().is_some_and(Health::is_depleted)
    }

    pub fn add_knockback(&mut self, strength: f32, duration: f32, direction: Vec2) {
        self.common.knockback.add(strength, duration, direction);
    }

    /// Move by the active knockback and run its timer down.
    pub fn tick_knockback(&mut self, dt: f32) {
        let displacement = self.common.knockback.tick(dt);
        self.common.position += displacement;
    }

    pub fn set_hit_highlight(&mut self, duration: f32) {
        self.common.hit_highlight_left = duration;
    }

    pub fn tick_hit_highlight(&mut self, dt: f32) {
        self.common.hit_highlight_left = (self.common.hit_highlight_left - dt).max(0.0);
    }

    pub fn is_highlighted(&self) -> bool {
        self.common.hit_highlight_left > 0.0
    }

    /// Hitbox relative to the entity position: centered for projectiles,
    /// feet-anchored for everything else.
    pub fn local_hitbox(&self) -> Range2f {
        if self.is_projectile() {
            Range2f::make_center(self.common.size)
        } else {
            Range2f::make_bottom_center(self.common.size)
        }
    }

    /// Hitbox in world space.
    pub fn hitbox(&self) -> Range2f {
        self.local_hitbox().shift(self.common.position)
    }

    /// Point at the middle of the hitbox.
    pub fn body_center(&self) -> Vec2 {
        self.hitbox().center()
    }

    /// FreeMove → Dash: invincible and non-collidable for the duration.
    ///
    /// # Panics
    /// If the entity is not a player in [`PlayerState::FreeMove`].
    pub fn enter_dash(&mut self) {
        self.set_player_state(PlayerState::Dash);
        if let Some(player) = self.as_player_mut() {
            player.is_invincible = true;
        }
        self.common.can_collide = false;
    }

    /// Dash → FreeMove: vulnerable and collidable again.
    ///
    /// # Panics
    /// If the entity is not a player in [`PlayerState::Dash`].
    pub fn leave_dash(&mut self) {
        self.set_player_state(PlayerState::FreeMove);
        if let Some(player) = self.as_player_mut() {
            player.is_invincible = false;
        }
        self.common.can_collide = true;
    }

    fn set_player_state(&mut self, next: PlayerState) {
        let Some(player) = self.as_player_mut() else {
            panic!("player state transition to {:?} requested on a non-player", next);
        };
        assert!(
            player.state.can_transition_to(next),
            "invalid player state transition {:?} -> {:?}",
            player.state,
            next
        );
        player.state = next;
    }
}
