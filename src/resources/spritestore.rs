//! Sprite table resource.
//!
//! Populated once at setup with [`SpriteStore::with_defaults`] and read-only
//! afterwards. Entities refer to entries by [`SpriteId`].

use bevy_ecs::prelude::Resource;
use glam::{UVec2, Vec2};
use rustc_hash::FxHashMap;

use crate::components::sprite::{SheetError, Sprite, SpriteId};

#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteStore {
    pub map: FxHashMap<SpriteId, Sprite>,
}

impl SpriteStore {
    pub fn new() -> Self {
        SpriteStore {
            map: FxHashMap::default(),
        }
    }

    /// The built-in sprite set. Fails if a sheet layout is invalid.
    pub fn with_defaults() -> Result<Self, SheetError> {
        let mut store = Self::new();
        store.insert(SpriteId::Player, Sprite::new("player", UVec2::new(7, 11)));
        store.insert(SpriteId::Slug, Sprite::new("slug", UVec2::new(9, 6)));
        store.insert(
            SpriteId::Projectile0,
            Sprite::new("projectile0", UVec2::new(6, 6)),
        );
        store.insert(
            SpriteId::Projectile0Sheet,
            Sprite::new("projectile0_sheet", UVec2::new(48, 8)).with_sheet(
                1,
                6,
                (0, 0),
                (0, 5),
                24.0,
            )?,
        );
        Ok(store)
    }

    pub fn insert(&mut self, id: SpriteId, sprite: Sprite) {
        self.map.insert(id, sprite);
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.map.get(&id)
    }

    /// Display size of `id`, zero if it is not in the table.
    pub fn size_of(&self, id: SpriteId) -> Vec2 {
        self.get(id).map(|s| s.size).unwrap_or(Vec2::ZERO)
    }

    /// Animation length of a sheet sprite, zero for still sprites.
    pub fn sheet_duration(&self, id: SpriteId) -> f32 {
        self.get(id)
            .and_then(|s| s.sheet)
            .map(|sheet| sheet.duration())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = SpriteStore::with_defaults().unwrap();
        assert_eq!(store.size_of(SpriteId::Player), Vec2::new(7.0, 11.0));
        assert_eq!(store.size_of(SpriteId::Slug), Vec2::new(9.0, 6.0));
        assert_eq!(store.size_of(SpriteId::Projectile0Sheet), Vec2::new(8.0, 8.0));
        assert!((store.sheet_duration(SpriteId::Projectile0Sheet) - 0.25).abs() < 1e-6);
        assert_eq!(store.sheet_duration(SpriteId::Player), 0.0);
        assert_eq!(store.size_of(SpriteId::Nil), Vec2::ZERO);
    }
}
