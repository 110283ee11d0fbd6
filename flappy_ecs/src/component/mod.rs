//! Utilities for *components* in ECS.

use std::any::{Any, TypeId};

use ahash::AHashMap;

pub use bundle::Bundle;
pub use storage::ComponentStore;

mod bundle;
mod storage;
mod tests;

/// Objects of this trait represent *component* of ECS.
///
/// Registry keys components purely by their runtime type
/// and never inspects their values.
///
pub trait Component: Any {}

impl<T> Component for T where T: Any {}

/// Components attached to one entity, keyed by their type.
pub type ComponentMap = AHashMap<TypeId, Box<dyn Any>>;

pub(crate) fn downcast_ref<T>(components: &ComponentMap) -> Option<&T>
where
    T: Component,
{
    let boxed = components.get(&TypeId::of::<T>())?;
    boxed.downcast_ref()
}

pub(crate) fn downcast_mut<T>(components: &mut ComponentMap) -> Option<&mut T>
where
    T: Component,
{
    let boxed = components.get_mut(&TypeId::of::<T>())?;
    boxed.downcast_mut()
}
