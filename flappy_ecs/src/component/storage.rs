//! Storage of all *components* of ECS.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::query::QueryCache;
use crate::Entity;

use super::{downcast_mut, downcast_ref, Component, ComponentMap};

/// Storage for dynamically typed components of ECS.
///
/// Consists of two coupled indices:
/// - *presence* index: component type → set of entities holding it;
/// - *data* index: entity → components attached to it.
///
/// Entity is present in the set of type `T` if and only if its components contain `T`.
/// Neither index keeps empty entries: the last detached component removes the entity,
/// the last holder of a type removes the set of that type.
///
/// Every mutation drops the whole query cache.
///
#[derive(Default)]
pub struct ComponentStore {
    presence: AHashMap<TypeId, BTreeSet<Entity>>,
    entities: BTreeMap<Entity, ComponentMap>,
    cache: RefCell<QueryCache>,
}

impl ComponentStore {
    /// Creates an empty component storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts component of type `T` and attaches it to the entity.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Option<T>
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        self.presence.entry(type_id).or_default().insert(entity);
        let prev = self
            .entities
            .entry(entity)
            .or_default()
            .insert(type_id, Box::new(component));
        self.invalidate();

        log::trace!(
            "component `{}` attached to entity {}",
            std::any::type_name::<T>(),
            entity,
        );
        prev.and_then(|boxed| boxed.downcast::<T>().ok()).map(|boxed| *boxed)
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist
    /// or if it has no component of type `T`.
    ///
    pub fn remove<T>(&mut self, entity: Entity) -> Result<T>
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        let components = self
            .entities
            .get_mut(&entity)
            .ok_or(Error::MissingEntity(entity))?;
        let boxed = components
            .remove(&type_id)
            .ok_or_else(|| Error::missing_component::<T>(entity))?;
        if components.is_empty() {
            self.entities.remove(&entity);
        }
        self.forget(type_id, entity);
        self.invalidate();

        log::trace!(
            "component `{}` detached from entity {}",
            std::any::type_name::<T>(),
            entity,
        );
        boxed
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| Error::missing_component::<T>(entity))
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn attached<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.entities
            .get(&entity)
            .map(|components| components.contains_key(&TypeId::of::<T>()))
            .unwrap_or(false)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        downcast_ref(self.entities.get(&entity)?)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    ///
    /// Changing the value of a component does not change the structure of the store,
    /// so the query cache is kept.
    ///
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        downcast_mut(self.entities.get_mut(&entity)?)
    }

    /// Returns `true` if there is at least one component attached to the entity.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Returns count of entities with at least one component.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there are no components in the store.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Detaches every component from the entity and drops the query cache.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist.
    ///
    pub fn delete(&mut self, entity: Entity) -> Result<()> {
        if !self.detach_all(entity) {
            return Err(Error::MissingEntity(entity));
        }
        self.invalidate();
        Ok(())
    }

    /// Detaches every component from each of given entities.
    /// Query cache is dropped once for the whole batch.
    ///
    /// Entities which do not exist are skipped.
    /// Returns count of entities which were actually removed.
    ///
    pub fn purge<I>(&mut self, entities: I) -> usize
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut purged = 0;
        for entity in entities {
            if self.detach_all(entity) {
                purged += 1;
            } else {
                log::debug!("entity {} was already removed before purge", entity);
            }
        }
        self.invalidate();
        purged
    }

    /// Removes all entities with their components.
    pub fn clear(&mut self) {
        self.presence.clear();
        self.entities.clear();
        self.invalidate();
    }

    /// Drops every cached query result.
    pub fn invalidate(&mut self) {
        self.cache.get_mut().invalidate();
    }

    pub(crate) fn cache(&self) -> &RefCell<QueryCache> {
        &self.cache
    }

    pub(crate) fn holders(&self, type_id: TypeId) -> Option<&BTreeSet<Entity>> {
        self.presence.get(&type_id)
    }

    pub(crate) fn components(&self, entity: Entity) -> Option<&ComponentMap> {
        self.entities.get(&entity)
    }

    pub(crate) fn components_range_mut(
        &mut self,
        range: RangeInclusive<Entity>,
    ) -> btree_map::RangeMut<'_, Entity, ComponentMap> {
        self.entities.range_mut(range)
    }

    fn detach_all(&mut self, entity: Entity) -> bool {
        let components = match self.entities.remove(&entity) {
            Some(components) => components,
            None => return false,
        };
        for type_id in components.keys() {
            self.forget(*type_id, entity);
        }
        true
    }

    fn forget(&mut self, type_id: TypeId, entity: Entity) {
        if let Some(holders) = self.presence.get_mut(&type_id) {
            holders.remove(&entity);
            if holders.is_empty() {
                self.presence.remove(&type_id);
            }
        }
    }
}

impl std::fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ComponentStore")
            .field("types", &self.presence.len())
            .field("entities", &self.entities.len())
            .field("cached_queries", &self.cache.borrow().len())
            .finish()
    }
}
