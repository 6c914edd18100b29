use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rolegate_core::{DomainError, DomainResult};

/// In-memory, lock-guarded map used by the catalog and directory backends.
///
/// Values are cloned out and replaced whole, so a reader never sees a
/// half-written record. A poisoned lock surfaces as `InvariantViolation` from
/// every operation.
#[derive(Debug)]
pub struct KeyedStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> KeyedStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for KeyedStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V>
where
    K: Ord + Clone + core::fmt::Display,
    V: Clone,
{
    pub fn get(&self, key: &K) -> DomainResult<Option<V>> {
        Ok(self.read()?.get(key).cloned())
    }

    pub fn contains(&self, key: &K) -> DomainResult<bool> {
        Ok(self.read()?.contains_key(key))
    }

    /// Insert a value under a key that must not exist yet.
    pub fn insert_new(&self, key: K, value: V, what: &str) -> DomainResult<()> {
        let mut map = self.write()?;
        if map.contains_key(&key) {
            return Err(DomainError::invariant(format!("{what} '{key}' already exists")));
        }
        map.insert(key, value);
        Ok(())
    }

    /// Replace the value under an existing key.
    pub fn replace(&self, key: K, value: V, what: &str) -> DomainResult<()> {
        let mut map = self.write()?;
        match map.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DomainError::not_found(format!("{what} '{key}'"))),
        }
    }

    /// Edit the value under an existing key while holding the write lock,
    /// returning the edited value.
    pub fn update<F>(&self, key: &K, what: &str, edit: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V),
    {
        let mut map = self.write()?;
        let slot = map
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found(format!("{what} '{key}'")))?;
        edit(slot);
        Ok(slot.clone())
    }

    pub fn remove(&self, key: &K, what: &str) -> DomainResult<V> {
        let mut map = self.write()?;
        map.remove(key)
            .ok_or_else(|| DomainError::not_found(format!("{what} '{key}'")))
    }

    /// Snapshot of all values, in key order.
    pub fn list(&self) -> DomainResult<Vec<V>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, BTreeMap<K, V>>> {
        self.inner
            .read()
            .map_err(|_| DomainError::invariant("store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, BTreeMap<K, V>>> {
        self.inner
            .write()
            .map_err(|_| DomainError::invariant("store lock poisoned"))
    }
}
