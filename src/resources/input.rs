//! Per-frame input resource.
//!
//! The window layer polls hardware and hands the simulation an
//! [`InputFrame`]: which buttons are held this frame and where the mouse
//! points in world space. [`apply_input_frame`] folds that into the
//! [`InputState`] resource, deriving pressed/released edges and the
//! normalized movement axis.
//!
//! [`apply_input_frame`]: crate::systems::input::apply_input_frame
use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Boolean button state with edge flags.
pub struct BoolState {
    /// Whether the button is held this frame.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Advance to this frame's raw `down` value, deriving edges from the previous one.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Raw button levels for one frame, as polled by the window layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub primary_fire: bool,
    pub dash: bool,
    pub escape: bool,
    /// Cursor position already unprojected into world space.
    pub mouse_world_position: Vec2,
}

impl InputFrame {
    pub fn with_axis(mut self, axis: Vec2) -> Self {
        self.left = axis.x < 0.0;
        self.right = axis.x > 0.0;
        self.down = axis.y < 0.0;
        self.up = axis.y > 0.0;
        self
    }

    pub fn with_dash(mut self) -> Self {
        self.dash = true;
        self
    }

    pub fn with_fire_at(mut self, target: Vec2) -> Self {
        self.primary_fire = true;
        self.mouse_world_position = target;
        self
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub move_up: BoolState,
    pub move_down: BoolState,
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub primary_fire: BoolState,
    pub dash: BoolState,
    pub escape: BoolState,
    /// Unit-length (or zero) movement direction. +Y is up.
    pub axis: Vec2,
    pub mouse_world_position: Vec2,
}
