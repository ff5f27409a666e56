//! Weak, self-clearing entity references

use crate::entity::{Entity, EntityLookup};

/// A non-owning handle to another entity.
///
/// Resolution is lazy: every [`get`](Self::get) checks the handle against the
/// lookup. The first failed check clears the reference, and it stays empty
/// until something explicitly [`set`](Self::set)s it again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeakEntityRef {
    target: Option<Entity>,
}

impl WeakEntityRef {
    /// An empty reference
    pub const fn empty() -> Self {
        Self { target: None }
    }

    /// Reference `entity`
    pub const fn new(entity: Entity) -> Self {
        Self { target: Some(entity) }
    }

    /// Point at a different entity
    pub fn set(&mut self, entity: Entity) {
        *self = Self::new(entity);
    }

    /// Drop the referent
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Resolve against `world`, clearing permanently on failure
    pub fn get(&mut self, world: &dyn EntityLookup) -> Option<Entity> {
        let entity = self.target?;
        if world.is_alive(entity) {
            Some(entity)
        } else {
            self.target = None;
            None
        }
    }

    /// Whether the reference currently points at `entity`.
    ///
    /// Does not check liveness.
    pub fn is(&self, entity: Entity) -> bool {
        self.target == Some(entity)
    }

    /// Whether nothing is referenced (without resolving)
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityAllocator;

    #[test]
    fn test_resolves_while_alive() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        let mut r = WeakEntityRef::new(e);

        assert_eq!(r.get(&alloc), Some(e));
        assert_eq!(r.get(&alloc), Some(e));
    }

    #[test]
    fn test_clears_after_destruction_and_stays_empty() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        let mut r = WeakEntityRef::new(e);

        alloc.deallocate(e);
        // Index reuse must not revive the reference
        let reused = alloc.allocate();
        assert_eq!(reused.slot(), e.slot());

        assert_eq!(r.get(&alloc), None);
        assert!(r.is_empty());
        assert_eq!(r.get(&alloc), None);
    }

    #[test]
    fn test_empty_never_resolves() {
        let mut alloc = EntityAllocator::new();
        alloc.allocate();
        let mut r = WeakEntityRef::empty();
        assert!(r.is_empty());
        assert_eq!(r.get(&alloc), None);
    }

    #[test]
    fn test_clear_then_set() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        let mut r = WeakEntityRef::new(e);
        r.clear();
        assert_eq!(r.get(&alloc), None);
        r.set(e);
        assert_eq!(r.get(&alloc), Some(e));
    }

    #[test]
    fn test_is_compares_without_resolving() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let r = WeakEntityRef::new(a);
        assert!(r.is(a));
        assert!(!r.is(b));
    }
}
