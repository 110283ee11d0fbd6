//! Signatures of multi-type queries.

use std::any::{Any, TypeId};

use smallvec::SmallVec;

use crate::component::{downcast_ref, Component, ComponentMap};

use super::QueryKey;

/// Signature of the query over several component types.
///
/// Describes which types are requested and in which order
/// they are returned for each matched entity.
///
/// Implemented for tuples up to 8 elements.
///
pub trait Query: 'static {
    /// Shared references to requested components, in requested order.
    type Item<'a>;

    /// Exclusive references to requested components, in requested order.
    type ItemMut<'a>;

    /// List of [`TypeId`]s which represents types of this signature.
    fn type_ids() -> QueryKey;

    /// Resolves every requested component from components of one entity.
    fn fetch<'a>(components: &'a ComponentMap) -> Option<Self::Item<'a>>;

    /// Resolves every requested component from components of one entity.
    ///
    /// Returns [`None`] if some type is requested more than once.
    ///
    fn fetch_mut<'a>(components: &'a mut ComponentMap) -> Option<Self::ItemMut<'a>>;
}

fn cast_mut<'a, T>(slot: Option<&'a mut Box<dyn Any>>) -> Option<&'a mut T>
where
    T: Component,
{
    slot?.downcast_mut()
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name),+> Query for ($($name,)+)
        where
            $($name: Component,)+
        {
            type Item<'a> = ($(&'a $name,)+);
            type ItemMut<'a> = ($(&'a mut $name,)+);

            fn type_ids() -> QueryKey {
                SmallVec::from_slice(&[$(TypeId::of::<$name>()),+])
            }

            fn fetch<'a>(components: &'a ComponentMap) -> Option<Self::Item<'a>> {
                Some(($(downcast_ref::<$name>(components)?,)+))
            }

            fn fetch_mut<'a>(components: &'a mut ComponentMap) -> Option<Self::ItemMut<'a>> {
                let type_ids = Self::type_ids();
                let mut slots: SmallVec<[Option<&'a mut Box<dyn Any>>; 4]> =
                    type_ids.iter().map(|_| None).collect();
                for (type_id, component) in components.iter_mut() {
                    if let Some(index) = type_ids.iter().position(|id| id == type_id) {
                        slots[index] = Some(component);
                    }
                }
                let mut slots = slots.into_iter();
                Some(($(cast_mut::<$name>(slots.next()?)?,)+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
impl_query!(A, B, C, D, E, F, G);
impl_query!(A, B, C, D, E, F, G, H);
