//! Fixed-capacity entity storage.
//!
//! The pool owns every live [`Entity`] in a slot array sized once at startup.
//! Entities are addressed through [`EntityHandle`]s, which pair a slot index
//! with the slot's generation: destroying an entity bumps the generation, so
//! handles taken before the destroy stop resolving instead of silently
//! pointing at whatever reuses the slot.
//!
//! Allocation is first-fit: `create` always hands out the lowest free index.

use bevy_ecs::prelude::Resource;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use thiserror::Error;

use crate::components::entity::Entity;

/// Number of entity slots in a world.
pub const ENTITY_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("entity pool exhausted: all {capacity} slots are in use")]
    Exhausted { capacity: usize },
}

/// Generation-checked reference to a pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityHandle {
    pub index: usize,
    pub generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

#[derive(Resource, Debug, Clone)]
pub struct EntityPool {
    slots: Vec<Slot>,
    /// Free slot indices; popping yields the smallest.
    free: BinaryHeap<Reverse<usize>>,
    live: usize,
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::with_capacity(ENTITY_CAPACITY)
    }
}

impl EntityPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![
                Slot {
                    generation: 0,
                    entity: None,
                };
                capacity
            ],
            free: (0..capacity).map(Reverse).collect(),
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store `entity` in the lowest free slot.
    pub fn create(&mut self, entity: Entity) -> Result<EntityHandle, PoolError> {
        let Some(Reverse(index)) = self.free.pop() else {
            return Err(PoolError::Exhausted {
                capacity: self.capacity(),
            });
        };
        let slot = &mut self.slots[index];
        slot.entity = Some(entity);
        self.live += 1;
        Ok(EntityHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Free the slot `handle` points at. Returns the removed entity, or `None`
    /// if the handle is stale.
    pub fn destroy(&mut self, handle: EntityHandle) -> Option<Entity> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(Reverse(handle.index));
        self.live -= 1;
        Some(entity)
    }

    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    /// Mutable access to two distinct live entities at once.
    pub fn get_pair_mut(
        &mut self,
        a: EntityHandle,
        b: EntityHandle,
    ) -> Option<(&mut Entity, &mut Entity)> {
        if a.index == b.index || !self.is_alive(a) || !self.is_alive(b) {
            return None;
        }
        let (low, high, swapped) = if a.index < b.index {
            (a.index, b.index, false)
        } else {
            (b.index, a.index, true)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        let first = head[low].entity.as_mut()?;
        let second = tail[0].entity.as_mut()?;
        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    /// Handle of the live entity in slot `index`, if any.
    ///
    /// Systems walk `0..capacity()` through this so they can destroy while
    /// walking without collecting handles first.
    pub fn handle_at(&self, index: usize) -> Option<EntityHandle> {
        let slot = self.slots.get(index)?;
        slot.entity.as_ref().map(|_| EntityHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity.as_ref().map(|entity| {
                (
                    EntityHandle {
                        index,
                        generation: slot.generation,
                    },
                    entity,
                )
            })
        })
    }
}
