//! Utilities for *queries* over components of ECS.

use std::any::{type_name, TypeId};
use std::collections::BTreeSet;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;
use std::vec;

use smallvec::SmallVec;

use crate::component::{Component, ComponentStore};
use crate::Entity;

pub use cache::{QueryCache, QueryKey};
pub use signature::Query;

mod cache;
mod signature;

/// Iterator over entities which have every component requested by the query `Q`,
/// paired with shared references to these components.
///
/// Entities are yielded in ascending order.
///
pub struct QueryIter<'w, Q>
where
    Q: Query,
{
    store: &'w ComponentStore,
    entities: Rc<[Entity]>,
    index: usize,
    marker: PhantomData<Q>,
}

impl<'w, Q> Iterator for QueryIter<'w, Q>
where
    Q: Query,
{
    type Item = (Entity, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        let entity = *self.entities.get(self.index)?;
        self.index += 1;
        let components = self.store.components(entity)?;
        Some((entity, Q::fetch(components)?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entities.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<Q> ExactSizeIterator for QueryIter<'_, Q> where Q: Query {}

impl<Q> FusedIterator for QueryIter<'_, Q> where Q: Query {}

/// Iterator over entities which have every component requested by the query `Q`,
/// paired with exclusive references to these components.
///
/// Entities are yielded in ascending order.
///
pub struct QueryIterMut<'w, Q>
where
    Q: Query,
{
    items: vec::IntoIter<(Entity, Q::ItemMut<'w>)>,
}

impl<'w, Q> Iterator for QueryIterMut<'w, Q>
where
    Q: Query,
{
    type Item = (Entity, Q::ItemMut<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<Q> ExactSizeIterator for QueryIterMut<'_, Q> where Q: Query {}

impl<Q> FusedIterator for QueryIterMut<'_, Q> where Q: Query {}

impl ComponentStore {
    /// Returns every entity which has component of type `T` together with that component.
    pub fn query_one<T>(&self) -> impl Iterator<Item = (Entity, &T)> + '_
    where
        T: Component,
    {
        self.query::<(T,)>()
            .map(|(entity, (component,))| (entity, component))
    }

    /// Returns every entity which has component of type `T`
    /// together with an exclusive reference to that component.
    pub fn query_one_mut<T>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_
    where
        T: Component,
    {
        self.query_mut::<(T,)>()
            .map(|(entity, (component,))| (entity, component))
    }

    /// Returns every entity which has all components requested by `Q`,
    /// together with these components in requested order.
    ///
    /// If some requested type was never attached to any entity,
    /// the result is empty.
    ///
    pub fn query<Q>(&self) -> QueryIter<'_, Q>
    where
        Q: Query,
    {
        QueryIter {
            store: self,
            entities: self.matching::<Q>(Q::type_ids()),
            index: 0,
            marker: PhantomData,
        }
    }

    /// Returns every entity which has all components requested by `Q`,
    /// together with exclusive references to these components in requested order.
    ///
    /// Changing the values of components does not invalidate the query cache.
    ///
    /// Matched entities are resolved by walking the data index between the smallest
    /// and the largest matched entity, so the cost is proportional to the count of
    /// entities stored in that id range, not to the count of matched entities.
    ///
    /// # Panics
    ///
    /// Panics if `Q` requests the same component type more than once.
    ///
    pub fn query_mut<Q>(&mut self) -> QueryIterMut<'_, Q>
    where
        Q: Query,
    {
        let key = Q::type_ids();
        assert!(
            key.iter()
                .enumerate()
                .all(|(index, type_id)| !key[..index].contains(type_id)),
            "query `{}` requests the same component more than once",
            type_name::<Q>(),
        );
        let entities = self.matching::<Q>(key);

        let mut items = Vec::with_capacity(entities.len());
        if let (Some(&first), Some(&last)) = (entities.first(), entities.last()) {
            let mut wanted = entities.iter().copied().peekable();
            for (&entity, components) in self.components_range_mut(first..=last) {
                while wanted.next_if(|&next| next < entity).is_some() {}
                if wanted.next_if_eq(&entity).is_none() {
                    continue;
                }
                if let Some(item) = Q::fetch_mut(components) {
                    items.push((entity, item));
                }
            }
        }
        QueryIterMut {
            items: items.into_iter(),
        }
    }

    fn matching<Q>(&self, key: QueryKey) -> Rc<[Entity]>
    where
        Q: Query,
    {
        if let Some(entities) = self.cache().borrow_mut().get(&key) {
            return entities;
        }
        log::trace!("query cache miss for `{}`", type_name::<Q>());

        let entities: Rc<[Entity]> = self.intersect(&key).into();
        self.cache()
            .borrow_mut()
            .insert(key, Rc::clone(&entities));
        entities
    }

    /// Intersects presence sets of all requested types,
    /// starting from the set of the first type.
    fn intersect(&self, key: &[TypeId]) -> Vec<Entity> {
        let mut sets: SmallVec<[&BTreeSet<Entity>; 4]> = SmallVec::new();
        for type_id in key {
            match self.holders(*type_id) {
                Some(holders) => sets.push(holders),
                None => return Vec::new(),
            }
        }
        let (first, rest) = match sets.split_first() {
            Some(split) => split,
            None => return Vec::new(),
        };
        first
            .iter()
            .copied()
            .filter(|entity| rest.iter().all(|holders| holders.contains(entity)))
            .collect()
    }
}
