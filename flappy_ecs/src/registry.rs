//! Storage of entities and their components, shared by all systems.

use crate::component::{Bundle, Component, ComponentStore};
use crate::deletion::DeletionQueue;
use crate::entity::EntityAllocator;
use crate::error::{Error, Result};
use crate::query::{Query, QueryIter, QueryIterMut};
use crate::Entity;

/// Registry of entities and their components.
///
/// Every system receives an exclusive reference to the registry
/// each time it is updated.
///
#[derive(Debug)]
pub struct Registry {
    allocator: EntityAllocator,
    store: ComponentStore,
    deletions: DeletionQueue,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            store: ComponentStore::new(),
            deletions: DeletionQueue::new(),
        }
    }

    /// Creates new entity with given components attached.
    ///
    /// Note that entity without components is unknown to the registry
    /// until some component is attached to it.
    ///
    pub fn create_entity<B>(&mut self, components: B) -> Entity
    where
        B: Bundle,
    {
        let entity = self.allocator.allocate();
        components.attach(entity, &mut self.store);
        entity
    }

    /// Attaches component to the entity, replacing the previous one of the same type.
    ///
    /// Returns previously attached component, if any.
    ///
    /// Entity unknown to the registry becomes known once the component is attached.
    ///
    pub fn add_component<T>(&mut self, entity: Entity, component: T) -> Option<T>
    where
        T: Component,
    {
        self.store.insert(entity, component)
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// Entity which has no components left is forgotten by the registry.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist
    /// or if it has no component of type `T`.
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Result<T>
    where
        T: Component,
    {
        self.store.remove(entity)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has_component<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.store.attached::<T>(entity)
    }

    /// Retrieves component of type `T` attached to the entity, if any.
    pub fn try_component<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.store.get(entity)
    }

    /// Retrieves component of type `T` attached to the entity, if any.
    pub fn try_component_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.store.get_mut(entity)
    }

    /// Retrieves component of type `T` attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist
    /// or if it has no component of type `T`.
    ///
    pub fn component<T>(&self, entity: Entity) -> Result<&T>
    where
        T: Component,
    {
        if !self.store.contains(entity) {
            return Err(Error::MissingEntity(entity));
        }
        self.store
            .get(entity)
            .ok_or_else(|| Error::missing_component::<T>(entity))
    }

    /// Retrieves component of type `T` attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist
    /// or if it has no component of type `T`.
    ///
    pub fn component_mut<T>(&mut self, entity: Entity) -> Result<&mut T>
    where
        T: Component,
    {
        if !self.store.contains(entity) {
            return Err(Error::MissingEntity(entity));
        }
        self.store
            .get_mut(entity)
            .ok_or_else(|| Error::missing_component::<T>(entity))
    }

    /// Returns every entity which has component of type `T` together with that component.
    ///
    /// Result is cached until the next structural change of the registry.
    ///
    pub fn get_component<T>(&self) -> impl Iterator<Item = (Entity, &T)> + '_
    where
        T: Component,
    {
        self.store.query_one::<T>()
    }

    /// Same as [`get_component`](Self::get_component), but yields exclusive references.
    pub fn get_component_mut<T>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_
    where
        T: Component,
    {
        self.store.query_one_mut::<T>()
    }

    /// Returns every entity which has all components requested by `Q`
    /// together with these components in requested order.
    ///
    /// Result is cached until the next structural change of the registry.
    /// If some requested type was never attached to any entity, the result is empty.
    ///
    pub fn get_components<Q>(&self) -> QueryIter<'_, Q>
    where
        Q: Query,
    {
        self.store.query::<Q>()
    }

    /// Same as [`get_components`](Self::get_components), but yields exclusive references.
    ///
    /// # Panics
    ///
    /// Panics if `Q` requests the same component type more than once.
    ///
    pub fn get_components_mut<Q>(&mut self) -> QueryIterMut<'_, Q>
    where
        Q: Query,
    {
        self.store.query_mut::<Q>()
    }

    /// Deletes the entity with all of its components.
    ///
    /// If `immediate` is `false`, the entity is only marked for deletion and
    /// stays visible until the next [`purge_pending`](Self::purge_pending).
    /// Use immediate deletion only when no one iterates over results containing the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist.
    ///
    pub fn delete_entity(&mut self, entity: Entity, immediate: bool) -> Result<()> {
        if immediate {
            self.delete_immediately(entity)
        } else {
            self.mark_for_deletion(entity)
        }
    }

    /// Marks the entity for deletion on the next purge.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist.
    ///
    pub fn mark_for_deletion(&mut self, entity: Entity) -> Result<()> {
        if !self.store.contains(entity) {
            return Err(Error::MissingEntity(entity));
        }
        self.deletions.mark(entity);
        Ok(())
    }

    /// Deletes the entity with all of its components right now.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist.
    ///
    pub fn delete_immediately(&mut self, entity: Entity) -> Result<()> {
        self.store.delete(entity)?;
        self.deletions.unmark(entity);
        log::debug!("entity {} deleted immediately", entity);
        Ok(())
    }

    /// Deletes every entity marked for deletion.
    ///
    /// Returns count of entities which were actually removed.
    ///
    pub fn purge_pending(&mut self) -> usize {
        self.deletions.purge(&mut self.store)
    }

    /// Returns `true` if the entity has at least one component.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.store.contains(entity)
    }

    /// Returns `true` if the entity is marked for deletion.
    pub fn is_pending(&self, entity: Entity) -> bool {
        self.deletions.is_marked(entity)
    }

    /// Count of entities which have at least one component.
    pub fn entity_count(&self) -> usize {
        self.store.len()
    }

    /// Count of entities marked for deletion.
    pub fn pending_deletions(&self) -> usize {
        self.deletions.len()
    }

    /// Count of currently cached query results.
    pub fn cached_queries(&self) -> usize {
        self.store.cache().borrow().len()
    }

    /// Drops every cached query result.
    pub fn clear_cache(&mut self) {
        self.store.invalidate();
    }

    /// Removes every entity, component and pending deletion.
    ///
    /// Identifiers of removed entities are never issued again.
    ///
    pub fn clear(&mut self) {
        self.store.clear();
        self.deletions.clear();
    }

    /// Returns underlying component store.
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }
}
