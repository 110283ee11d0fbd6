//! Utilities for storage of ECS.

use crate::component::{Bundle, Component};
use crate::error::Result;
use crate::query::{Query, QueryIter, QueryIterMut};
use crate::system::{Scheduler, System};
use crate::{Entity, Registry};

mod tests;

/// Storage for entities, components and systems of ECS.
///
/// Single entry point of the host application:
/// the game loop calls [`update`](World::update) once per tick.
///
#[derive(Debug)]
pub struct World<C = ()>
where
    C: 'static,
{
    registry: Registry,
    scheduler: Scheduler<C>,
}

impl<C> World<C>
where
    C: 'static,
{
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Returns registry of entities and components of this world.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns registry of entities and components of this world.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Creates new entity with given components attached.
    pub fn create_entity<B>(&mut self, components: B) -> Entity
    where
        B: Bundle,
    {
        self.registry.create_entity(components)
    }

    /// Attaches component to the entity, replacing the previous one of the same type.
    pub fn add_component<T>(&mut self, entity: Entity, component: T) -> Option<T>
    where
        T: Component,
    {
        self.registry.add_component(entity, component)
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// # Errors
    ///
    /// See [`Registry::remove_component`].
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Result<T>
    where
        T: Component,
    {
        self.registry.remove_component(entity)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has_component<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.registry.has_component::<T>(entity)
    }

    /// Retrieves component of type `T` attached to the entity, if any.
    pub fn try_component<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.registry.try_component(entity)
    }

    /// Returns every entity which has component of type `T` together with that component.
    pub fn get_component<T>(&self) -> impl Iterator<Item = (Entity, &T)> + '_
    where
        T: Component,
    {
        self.registry.get_component::<T>()
    }

    /// Returns every entity which has component of type `T` together with that component.
    pub fn get_component_mut<T>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_
    where
        T: Component,
    {
        self.registry.get_component_mut::<T>()
    }

    /// Returns every entity which has all components requested by `Q`.
    pub fn get_components<Q>(&self) -> QueryIter<'_, Q>
    where
        Q: Query,
    {
        self.registry.get_components::<Q>()
    }

    /// Returns every entity which has all components requested by `Q`.
    ///
    /// # Panics
    ///
    /// Panics if `Q` requests the same component type more than once.
    ///
    pub fn get_components_mut<Q>(&mut self) -> QueryIterMut<'_, Q>
    where
        Q: Query,
    {
        self.registry.get_components_mut::<Q>()
    }

    /// Deletes the entity now or on the next tick.
    ///
    /// # Errors
    ///
    /// See [`Registry::delete_entity`].
    ///
    pub fn delete_entity(&mut self, entity: Entity, immediate: bool) -> Result<()> {
        self.registry.delete_entity(entity, immediate)
    }

    /// Registers the system with given priority. Systems with higher priority run earlier.
    pub fn register_system<S>(&mut self, system: S, priority: i32)
    where
        S: System<C>,
    {
        self.scheduler.register(system, priority, &mut self.registry)
    }

    /// Removes the first registered system of type `S`.
    ///
    /// Returns [`None`] if there was no system of such type.
    ///
    pub fn unregister_system<S>(&mut self) -> Option<S>
    where
        S: System<C>,
    {
        self.scheduler.unregister(&mut self.registry)
    }

    /// Retrieves the first registered system of type `S`.
    pub fn system<S>(&self) -> Option<&S>
    where
        S: System<C>,
    {
        self.scheduler.get()
    }

    /// Retrieves the first registered system of type `S`.
    pub fn system_mut<S>(&mut self) -> Option<&mut S>
    where
        S: System<C>,
    {
        self.scheduler.get_mut()
    }

    /// Returns scheduler of systems of this world.
    pub fn scheduler(&self) -> &Scheduler<C> {
        &self.scheduler
    }

    /// Count of registered systems.
    pub fn system_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Runs one tick of the world.
    ///
    /// Entities marked for deletion are purged first,
    /// then every system is updated once in order of descending priority.
    ///
    pub fn update(&mut self, context: &C) {
        self.registry.purge_pending();
        self.scheduler.run(&mut self.registry, context);
    }

    /// Removes every entity, component and pending deletion. Systems are kept.
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

impl<C> Default for World<C>
where
    C: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
