//! Explicit process-wide cache injected into the services.
//!
//! Services read through the cache on lookups by id, put the fresh entity
//! after writes and evict on delete. Listings bypass it.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::cliente::Cliente;
use crate::domain::types::{Dni, VehiculoId};
use crate::domain::vehiculo::Vehiculo;

pub trait Cache<K, V> {
    fn get(&self, key: &K) -> Option<V>;
    fn put(&self, key: K, value: V);
    fn evict(&self, key: &K);
}

/// Concurrent in-memory cache backed by `DashMap`.
///
/// Cloning shares the same entries. Reads clone the value so no map guard
/// escapes the call.
#[derive(Debug)]
pub struct InMemoryCache<K, V>
where
    K: Eq + Hash,
{
    entries: Arc<DashMap<K, V>>,
}

impl<K: Eq + Hash, V> InMemoryCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for InMemoryCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Clone for InMemoryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Cache<K, V> for InMemoryCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    fn evict(&self, key: &K) {
        self.entries.remove(key);
    }
}

pub type ClienteCache = InMemoryCache<Dni, Cliente>;
pub type VehiculoCache = InMemoryCache<VehiculoId, Vehiculo>;
