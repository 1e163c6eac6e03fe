//! Team allegiance and collision layer masks.
//!
//! An entity declares what it *is* through its entity layer and what it can
//! *hit* through its collision layer. Two entities interact only when the
//! hitter's collision layer shares a bit with the target's entity layer and
//! they are on different teams.

use serde::{Deserialize, Serialize};

/// Allegiance of an entity. Projectiles never damage their own team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    /// Team 1: the player and the player's projectiles.
    #[default]
    Player = 1,
    /// Team 2: slugs.
    Enemy = 2,
    /// Team 3: world props.
    Neutral = 3,
}

/// Bitmask of collision layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const PLAYER: LayerMask = LayerMask(1 << 0);
    pub const ENEMY: LayerMask = LayerMask(1 << 1);
    pub const PROJECTILE: LayerMask = LayerMask(1 << 2);
    pub const TERRAIN: LayerMask = LayerMask(1 << 3);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}
