//! Forced displacement applied after an entity is hit.
//!
//! A new knockback always overwrites the one in progress; there is no
//! stacking. The effect moves the entity at a constant `strength` along
//! `direction` until `duration_left` runs out.

use glam::Vec2;
use serde::Serialize;

/// Directions with both components under this magnitude are treated as zero.
pub const MIN_KNOCKBACK_COMPONENT: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Knockback {
    pub strength: f32,
    pub duration_left: f32,
    /// Unit vector.
    pub direction: Vec2,
}

impl Knockback {
    /// Start a knockback. No-op when `direction` is near zero.
    pub fn add(&mut self, strength: f32, duration: f32, direction: Vec2) {
        if direction.x.abs() < MIN_KNOCKBACK_COMPONENT
            && direction.y.abs() < MIN_KNOCKBACK_COMPONENT
        {
            return;
        }
        self.strength = strength;
        self.duration_left = duration;
        self.direction = direction.normalize_or_zero();
    }

    pub fn is_active(&self) -> bool {
        self.duration_left > 0.0
    }

    /// Advance by `dt`, returning the displacement to apply this frame.
    pub fn tick(&mut self, dt: f32) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let displacement = self.direction * self.strength * dt;
        self.duration_left = (self.duration_left - dt).max(0.0);
        displacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiny_direction_is_ignored() {
        let mut k = Knockback::default();
        k.add(100.0, 0.2, Vec2::new(0.001, 0.001));
        assert_eq!(k.duration_left, 0.0);
        assert!(!k.is_active());
    }

    #[test]
    fn test_tiny_direction_keeps_running_knockback() {
        let mut k = Knockback::default();
        k.add(100.0, 0.2, Vec2::X);
        k.add(50.0, 0.9, Vec2::new(0.001, -0.001));
        assert_eq!(k.duration_left, 0.2);
        assert_eq!(k.strength, 100.0);
    }

    #[test]
    fn test_direction_is_normalized() {
        let mut k = Knockback::default();
        k.add(10.0, 1.0, Vec2::new(3.0, 4.0));
        assert!((k.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_new_hit_overwrites() {
        let mut k = Knockback::default();
        k.add(10.0, 1.0, Vec2::X);
        k.add(30.0, 0.1, Vec2::Y);
        assert_eq!(k.strength, 30.0);
        assert_eq!(k.duration_left, 0.1);
        assert_eq!(k.direction, Vec2::Y);
    }

    #[test]
    fn test_tick_moves_and_clamps() {
        let mut k = Knockback::default();
        k.add(100.0, 0.15, Vec2::X);
        let d = k.tick(0.1);
        assert!((d.x - 10.0).abs() < 1e-5);
        k.tick(0.1);
        assert_eq!(k.duration_left, 0.0);
        assert_eq!(k.tick(0.1), Vec2::ZERO);
    }
}
