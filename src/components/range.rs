//! Axis-aligned boxes for hit detection.
//!
//! A [`Range2f`] is built relative to an entity pivot (feet or center) and
//! then shifted to the entity position before testing overlap.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range2f {
    pub min: Vec2,
    pub max: Vec2,
}

impl Range2f {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box spanning `[-w/2, 0]..[w/2, h]`, for entities whose position is their feet.
    pub fn make_bottom_center(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size).shift(Vec2::new(size.x * -0.5, 0.0))
    }

    /// Box centered on the origin, for entities whose position is their center.
    pub fn make_center(size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(-half, half)
    }

    /// Translate both corners by `offset`.
    pub fn shift(self, offset: Vec2) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    pub fn size(&self) -> Vec2 {
        (self.max - self.min).abs()
    }

    pub fn center(&self) -> Vec2 {
        (self.max - self.min) * 0.5 + self.min
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Strict AABB overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Range2f) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
