//! Hit points with a per-entity damage cooldown.
//!
//! Every entity that can be hurt owns its own [`Health`], so the cooldown gate
//! is tracked per entity rather than globally.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Minimum seconds between two accepted hits.
    pub damage_cooldown: f32,
    /// World time of the last accepted hit. `None` until the first one.
    pub last_time_took_damage: Option<f32>,
}

impl Health {
    pub fn new(max: f32, damage_cooldown: f32) -> Self {
        Self {
            current: max,
            max,
            damage_cooldown,
            last_time_took_damage: None,
        }
    }

    /// Whether a hit at `now` would pass the cooldown gate.
    pub fn can_take_damage(&self, now: f32) -> bool {
        match self.last_time_took_damage {
            Some(last) => now - last > self.damage_cooldown,
            None => true,
        }
    }

    /// Subtract `amount` if the cooldown gate allows it. Returns true when the
    /// hit landed. Health never drops below zero.
    pub fn apply_damage(&mut self, amount: f32, now: f32) -> bool {
        if !self.can_take_damage(now) {
            return false;
        }
        self.last_time_took_damage = Some(now);
        self.current = (self.current - amount).max(0.0);
        true
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining health in `[0, 1]`, for HUD bars.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hit_always_lands() {
        let mut h = Health::new(100.0, 0.5);
        assert!(h.apply_damage(10.0, 0.0));
        assert_eq!(h.current, 90.0);
    }

    #[test]
    fn test_cooldown_blocks_second_hit() {
        let mut h = Health::new(100.0, 0.5);
        assert!(h.apply_damage(10.0, 1.0));
        assert!(!h.apply_damage(10.0, 1.3));
        assert_eq!(h.current, 90.0);
        assert_eq!(h.last_time_took_damage, Some(1.0));
    }

    #[test]
    fn test_gate_is_strict() {
        let mut h = Health::new(100.0, 0.5);
        h.apply_damage(10.0, 1.0);
        assert!(!h.apply_damage(10.0, 1.5));
        assert!(h.apply_damage(10.0, 1.51));
        assert_eq!(h.current, 80.0);
    }

    #[test]
    fn test_health_clamps_at_zero() {
        let mut h = Health::new(7.0, 0.0);
        assert!(h.apply_damage(10.0, 0.0));
        assert_eq!(h.current, 0.0);
        assert!(h.is_depleted());
        assert_eq!(h.fraction(), 0.0);
    }
}
