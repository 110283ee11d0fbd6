//! Utilities for *entities* in ECS.

use std::fmt;

/// Unique identifier of the *entity* of ECS.
///
/// Entity carries no data by itself: it is just a key into the component store.
/// Identifiers are issued in increasing order and are never recycled.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns raw identifier of the entity.
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocator of entity identifiers.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    last: u64,
}

impl EntityAllocator {
    /// Creates new allocator which have not issued any entity yet.
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Issues next unique entity.
    pub fn allocate(&mut self) -> Entity {
        self.last += 1;
        Entity::new(self.last)
    }
}
