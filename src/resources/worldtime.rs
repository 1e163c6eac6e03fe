use bevy_ecs::prelude::Resource;

/// Delta-time ceiling used when none is configured. A debugger pause or a
/// long hitch must not turn into one huge integration step.
pub const DEFAULT_MAX_DELTA: f32 = 1.0;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
    pub max_delta: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl WorldTime {
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }
}
