//! Memoized results of queries.

use std::any::TypeId;
use std::rc::Rc;

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::Entity;

/// Ordered list of component types requested by the query.
pub type QueryKey = SmallVec<[TypeId; 4]>;

/// Cache of entities matched by queries, keyed by the exact list of requested types.
///
/// The cache is a derived view of the component store: any write to the store
/// drops every entry, because one write can change many intersections at once.
///
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: AHashMap<QueryKey, Rc<[Entity]>>,
    hits: u64,
    misses: u64,
}

impl QueryCache {
    /// Creates an empty query cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns entities previously matched by the query with given key, if any.
    pub fn get(&mut self, key: &[TypeId]) -> Option<Rc<[Entity]>> {
        match self.entries.get(key) {
            Some(entities) => {
                self.hits += 1;
                Some(Rc::clone(entities))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Remembers entities matched by the query with given key.
    pub fn insert(&mut self, key: QueryKey, entities: Rc<[Entity]>) {
        self.entries.insert(key, entities);
    }

    /// Drops every entry of the cache.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Count of currently cached queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of lookups answered from the cache.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Count of lookups which required computing the query.
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}
