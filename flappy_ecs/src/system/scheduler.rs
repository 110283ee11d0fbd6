//! Ordered execution of *systems*.

use std::any::type_name;
use std::cmp::Reverse;
use std::fmt;

use crate::Registry;

use super::System;

struct Entry<C> {
    priority: i32,
    name: &'static str,
    system: Box<dyn System<C>>,
}

/// Registered systems, sorted by descending priority.
///
/// Systems with equal priority run in the order of their registration.
///
pub struct Scheduler<C = ()>
where
    C: 'static,
{
    entries: Vec<Entry<C>>,
}

impl<C> Scheduler<C>
where
    C: 'static,
{
    /// Creates a scheduler without systems.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers the system with given priority. Systems with higher priority run earlier.
    pub fn register<S>(&mut self, mut system: S, priority: i32, registry: &mut Registry)
    where
        S: System<C>,
    {
        let name = type_name::<S>();
        system.initialize(registry);
        self.entries.push(Entry {
            priority,
            name,
            system: Box::new(system),
        });
        self.entries.sort_by_key(|entry| Reverse(entry.priority));
        log::debug!("system `{}` registered with priority {}", name, priority);
    }

    /// Removes the first registered system of type `S`.
    ///
    /// Returns removed system, or [`None`] if there was no system of such type.
    ///
    pub fn unregister<S>(&mut self, registry: &mut Registry) -> Option<S>
    where
        S: System<C>,
    {
        let index = self.entries.iter().position(|entry| entry.system.is::<S>())?;
        let mut entry = self.entries.remove(index);
        entry.system.destroy(registry);
        log::debug!("system `{}` unregistered", entry.name);

        let system = entry.system.into_any().downcast::<S>().ok()?;
        Some(*system)
    }

    /// Retrieves the first registered system of type `S`.
    pub fn get<S>(&self) -> Option<&S>
    where
        S: System<C>,
    {
        self.entries
            .iter()
            .find_map(|entry| entry.system.downcast_ref::<S>())
    }

    /// Retrieves the first registered system of type `S`.
    pub fn get_mut<S>(&mut self) -> Option<&mut S>
    where
        S: System<C>,
    {
        self.entries
            .iter_mut()
            .find_map(|entry| entry.system.downcast_mut::<S>())
    }

    /// Returns priority of the first registered system of type `S`.
    pub fn priority<S>(&self) -> Option<i32>
    where
        S: System<C>,
    {
        self.entries
            .iter()
            .find(|entry| entry.system.is::<S>())
            .map(|entry| entry.priority)
    }

    /// Returns names and priorities of all systems in execution order.
    pub fn order(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.entries.iter().map(|entry| (entry.name, entry.priority))
    }

    /// Count of registered systems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no system is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Updates every system once, in order of descending priority.
    pub fn run(&mut self, registry: &mut Registry, context: &C) {
        for entry in &mut self.entries {
            entry.system.update(registry, context);
        }
    }
}

impl<C> Default for Scheduler<C>
where
    C: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Scheduler<C>
where
    C: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.order()).finish()
    }
}
