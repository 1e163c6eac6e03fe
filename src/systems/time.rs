//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, clamping and scaling the provided delta.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the unscaled frame delta in seconds. Negative values count as
/// zero and anything above `max_delta` is clamped before `time_scale` is
/// applied.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let clamped = dt.clamp(0.0, wt.max_delta);
    if clamped < dt {
        trace!("Clamped frame delta {} to {}", dt, clamped);
    }
    let scaled_dt = clamped * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}
