//! Deferred deletion of *entities* in ECS.

use std::collections::BTreeSet;

use crate::component::ComponentStore;
use crate::Entity;

/// Entities marked for deletion which are not purged from the store yet.
///
/// Marked entity stays fully visible to queries until the next purge.
///
#[derive(Debug, Default)]
pub struct DeletionQueue {
    pending: BTreeSet<Entity>,
}

impl DeletionQueue {
    /// Creates an empty deletion queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entity for deletion.
    ///
    /// Returns `false` if the entity was already marked.
    ///
    pub fn mark(&mut self, entity: Entity) -> bool {
        self.pending.insert(entity)
    }

    /// Returns `true` if the entity is waiting for the purge.
    pub fn is_marked(&self, entity: Entity) -> bool {
        self.pending.contains(&entity)
    }

    /// Removes the entity from the queue without purging it.
    pub fn unmark(&mut self, entity: Entity) -> bool {
        self.pending.remove(&entity)
    }

    /// Count of entities waiting for the purge.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if there is nothing to purge.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes every marked entity from the store and empties the queue.
    ///
    /// Returns count of entities which were actually removed.
    ///
    pub fn purge(&mut self, store: &mut ComponentStore) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let pending = std::mem::take(&mut self.pending);
        let purged = store.purge(pending);
        log::debug!("purged {} entities", purged);
        purged
    }

    /// Forgets every marked entity.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
