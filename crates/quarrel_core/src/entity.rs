//! Entity handles and the arena that issues them
//!
//! A scene hands out an [`Entity`] per spawned game object. The handle names a
//! slot in the scene's arena plus the generation the slot had when the object
//! was spawned. Freeing the slot bumps its generation, so handles held by weak
//! references stop resolving even after the slot is reused.

use std::fmt;

/// Handle to a game object in a scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    slot: u32,
    generation: u32,
}

impl Entity {
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Arena slot; shared with every earlier and later occupant
    pub const fn slot(self) -> u32 {
        self.slot
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.slot, self.generation)
    }
}

/// Anything that can answer "is this handle still live?"
///
/// Weak references resolve against this instead of holding a world pointer.
pub trait EntityLookup {
    /// Whether `entity` refers to a live entity
    fn is_alive(&self, entity: Entity) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    occupied: bool,
}

/// Slot arena issuing generational [`Entity`] handles
#[derive(Debug, Clone, Default)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    /// Freed slots, reused last-freed first
    vacant: Vec<u32>,
    alive: usize,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupy a slot, reusing a freed one if there is any
    pub fn allocate(&mut self) -> Entity {
        self.alive += 1;

        if let Some(index) = self.vacant.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.occupied = true;
                return Entity::new(index, slot.generation);
            }
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            occupied: true,
        });
        Entity::new(index, 0)
    }

    /// Free `entity`'s slot. Returns false for stale handles.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        let Some(slot) = self.slots.get_mut(entity.slot as usize) else {
            return false;
        };
        if !slot.occupied || slot.generation != entity.generation {
            return false;
        }

        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(entity.slot);
        self.alive -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.slot as usize)
            .is_some_and(|slot| slot.occupied && slot.generation == entity.generation)
    }

    /// Number of occupied slots
    pub fn alive_count(&self) -> usize {
        self.alive
    }
}

impl EntityLookup for EntityAllocator {
    fn is_alive(&self, entity: Entity) -> bool {
        EntityAllocator::is_alive(self, entity)
    }
}
