//! Memoizing call cache.

use std::{
    collections::{HashMap, hash_map::Entry},
    hash::Hash,
};

/// Stores the results of a deterministic computation keyed by its arguments.
///
/// Each distinct key is computed at most once successfully. Entries are never
/// evicted, so the cache lives exactly as long as its owner. Failed
/// computations are not stored and are retried on the next identical call.
///
/// The check-then-insert in [`CallCache::get_or_try_insert_with`] is not
/// atomic; sharing a cache between threads needs an outer lock.
#[derive(Debug)]
pub struct CallCache<K, V> {
    entries: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> CallCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the value stored for `key`, computing it with `compute` on a miss.
    ///
    /// # Errors
    /// Returns the error of `compute` unchanged; nothing is stored in that case.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: K, compute: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                let val = compute()?;
                Ok(entry.insert(val))
            }
        }
    }

    /// Number of calls answered from the store.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of calls that ran the computation.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl<K, V> Default for CallCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
