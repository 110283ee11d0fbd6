//! Sets of components which could be attached to an entity at once.

use crate::Entity;

use super::{Component, ComponentStore};

/// Set of components which is attached to the entity on creation.
///
/// Implemented for unit type (no components) and for tuples up to 8 elements.
///
pub trait Bundle {
    /// Attaches every component of this bundle to the entity.
    fn attach(self, entity: Entity, store: &mut ComponentStore);
}

impl Bundle for () {
    fn attach(self, _entity: Entity, _store: &mut ComponentStore) {}
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name),+> Bundle for ($($name,)+)
        where
            $($name: Component,)+
        {
            #[allow(non_snake_case)]
            fn attach(self, entity: Entity, store: &mut ComponentStore) {
                let ($($name,)+) = self;
                $(store.insert(entity, $name);)+
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
