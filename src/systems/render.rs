//! Presentation adapter.
//!
//! [`build_render_frame`] snapshots everything the window layer needs to draw
//! one frame: camera, one [`DrawSprite`] per visible entity and the HUD bars.
//! The snapshot is plain data (and serializable), so drawing never touches
//! the simulation resources. [`submit_render_frame`] replays it into any
//! [`SpriteRenderer`].
use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::Serialize;

use crate::components::entity::{Archetype, Entity, EntityState, PlayerState, ProjectileState};
use crate::components::sprite::{SpriteId, SpriteUv};
use crate::resources::arena::Arena;
use crate::resources::entitypool::{EntityHandle, EntityPool};
use crate::resources::spritestore::SpriteStore;
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraView {
    pub position: Vec2,
    pub zoom: f32,
}

/// HUD fill fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HudBars {
    pub dash_readiness: f32,
    pub fire_readiness: f32,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawSprite {
    pub handle: EntityHandle,
    pub archetype: Archetype,
    pub state: EntityState,
    pub sprite_id: SpriteId,
    pub image_key: String,
    pub position: Vec2,
    pub size: Vec2,
    /// Anchor of `position` inside the quad, as a fraction of `size`.
    pub pivot: Vec2,
    /// Sub-rectangle of the image for sheet sprites; whole image otherwise.
    pub uv: Option<SpriteUv>,
    pub animation_progress: Option<f32>,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub frame: u64,
    pub camera: CameraView,
    /// Back to front.
    pub sprites: Vec<DrawSprite>,
    pub hud: HudBars,
}

/// Drawing backend driven by [`submit_render_frame`].
pub trait SpriteRenderer {
    fn set_camera(&mut self, camera: &CameraView);
    fn draw_sprite(&mut self, sprite: &DrawSprite);
    fn draw_hud(&mut self, hud: &HudBars);
}

/// Sprite and animation progress to show for `entity`.
fn visual(entity: &Entity) -> (SpriteId, Option<f32>) {
    match entity.as_projectile() {
        Some(p) if p.state == ProjectileState::Impact => {
            (SpriteId::Projectile0Sheet, Some(p.impact.progress))
        }
        _ => (entity.common.sprite_id, None),
    }
}

pub fn build_render_frame(world: &World) -> RenderFrame {
    let pool = world.resource::<EntityPool>();
    let arena = world.resource::<Arena>();
    let sprites = world.resource::<SpriteStore>();
    let time = world.resource::<WorldTime>();

    let dash_elapsed = arena.dash_record.map(|r| time.elapsed - r.started_at);

    let mut draws: Vec<DrawSprite> = pool
        .iter()
        .filter(|(_, e)| e.common.render_sprite)
        .filter_map(|(handle, entity)| {
            let (sprite_id, progress) = visual(entity);
            let sprite = sprites.get(sprite_id)?;
            let uv = match (sprite.sheet, progress) {
                (Some(sheet), Some(progress)) => Some(sheet.uv(progress)),
                _ => None,
            };
            let dashing = entity
                .as_player()
                .is_some_and(|p| p.state == PlayerState::Dash);
            let dash_flash = dashing && dash_elapsed.is_some_and(|t| arena.dash.is_highlighted(t));
            let pivot = if entity.is_projectile() {
                Vec2::new(0.5, 0.5)
            } else {
                Vec2::new(0.5, 0.0)
            };
            Some(DrawSprite {
                handle,
                archetype: entity.archetype(),
                state: entity.state(),
                sprite_id,
                image_key: sprite.image_key.clone(),
                position: entity.common.position,
                size: sprite.size,
                pivot,
                uv,
                animation_progress: progress,
                highlight: entity.is_highlighted() || dash_flash,
            })
        })
        .collect();

    // higher on screen is further away
    draws.sort_by(|a, b| b.position.y.total_cmp(&a.position.y));

    let health = arena
        .player
        .and_then(|h| pool.get(h))
        .and_then(|p| p.health())
        .map(|h| h.fraction())
        .unwrap_or(0.0);

    RenderFrame {
        frame: time.frame_count,
        camera: CameraView {
            position: arena.camera_position,
            zoom: arena.camera_zoom,
        },
        sprites: draws,
        hud: HudBars {
            dash_readiness: arena.dash_readiness(),
            fire_readiness: arena.fire_readiness(),
            health,
        },
    }
}

pub fn submit_render_frame(frame: &RenderFrame, renderer: &mut impl SpriteRenderer) {
    renderer.set_camera(&frame.camera);
    for sprite in &frame.sprites {
        renderer.draw_sprite(sprite);
    }
    renderer.draw_hud(&frame.hud);
}
