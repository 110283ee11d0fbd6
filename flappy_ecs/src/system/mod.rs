//! Utilities for *systems* in ECS.

use std::any::Any;

use crate::Registry;

pub use scheduler::Scheduler;

mod scheduler;

/// Objects of this trait represent *system* of ECS.
///
/// System has no entities or components of its own: everything it works with
/// is reached through the registry passed to each of its methods.
///
/// Type parameter `C` is the per-tick context (elapsed time, input snapshot, etc.)
/// which is forwarded untouched to every system.
///
pub trait System<C = ()>: AsAny
where
    C: 'static,
{
    /// Handles one tick of the world.
    fn update(&mut self, registry: &mut Registry, context: &C);

    /// Called once when the system is registered in the world.
    fn initialize(&mut self, _registry: &mut Registry) {}

    /// Called once when the system is removed from the world.
    fn destroy(&mut self, _registry: &mut Registry) {}
}

/// Conversion of the system into [`Any`] to look it up by its concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> AsAny for T
where
    T: Any,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<C> dyn System<C>
where
    C: 'static,
{
    /// Returns `true` if concrete type of the system is `S`.
    pub fn is<S>(&self) -> bool
    where
        S: System<C>,
    {
        self.as_any().is::<S>()
    }

    pub fn downcast_ref<S>(&self) -> Option<&S>
    where
        S: System<C>,
    {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<S>(&mut self) -> Option<&mut S>
    where
        S: System<C>,
    {
        self.as_any_mut().downcast_mut()
    }
}
