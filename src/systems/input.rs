//! Input folding system.
//!
//! The host polls its devices and passes an [`InputFrame`] to
//! [`apply_input_frame`] before the schedule runs; this updates the
//! [`InputState`] resource with edge flags and the normalized movement axis.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::resources::input::{InputFrame, InputState};

/// Fold this frame's raw button levels into [`InputState`].
pub fn apply_input_frame(world: &mut World, frame: &InputFrame) {
    let mut input = world.resource_mut::<InputState>();
    input.move_up.update(frame.up);
    input.move_down.update(frame.down);
    input.move_left.update(frame.left);
    input.move_right.update(frame.right);
    input.primary_fire.update(frame.primary_fire);
    input.dash.update(frame.dash);
    input.escape.update(frame.escape);
    input.mouse_world_position = frame.mouse_world_position;
    input.axis = movement_axis(&input);
}

/// Unit direction from the held movement keys; opposite keys cancel.
pub fn movement_axis(input: &InputState) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if input.move_right.active {
        axis.x += 1.0;
    }
    if input.move_left.active {
        axis.x -= 1.0;
    }
    if input.move_up.active {
        axis.y += 1.0;
    }
    if input.move_down.active {
        axis.y -= 1.0;
    }
    axis.normalize_or_zero()
}
