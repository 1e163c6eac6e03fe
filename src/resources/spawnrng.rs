use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Seeded random source for enemy placement.
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng {
    rng: fastrand::Rng,
}

impl SpawnRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform value in `[-half_extent, half_extent]`.
    pub fn symmetric(&mut self, half_extent: f32) -> f32 {
        (self.rng.f32() * 2.0 - 1.0) * half_extent
    }

    /// Uniform point in the square of half size `half_extent` around `center`.
    pub fn point_around(&mut self, center: Vec2, half_extent: f32) -> Vec2 {
        let x = self.symmetric(half_extent);
        let y = self.symmetric(half_extent);
        center + Vec2::new(x, y)
    }
}
