use crate::{DialectId, EntityType, Result};
use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, PoisonError, RwLock},
};

/// Statement shape stored in the [`QueryCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryCacheType {
    Get,
    GetByMultipleIds,
    GetAll,
    Project,
    ProjectAll,
    Count,
    Any,
    Insert,
    Update,
    UpdateMultiple,
    Delete,
    DeleteMultiple,
    DeleteAll,
}

/// Equal when kind, dialect, entity and the ordered included types are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCacheKey {
    pub kind: QueryCacheType,
    pub dialect: DialectId,
    pub entity: EntityType,
    pub includes: Box<[EntityType]>,
}

impl QueryCacheKey {
    pub fn new(kind: QueryCacheType, dialect: DialectId, entity: EntityType) -> Self {
        Self {
            kind,
            dialect,
            entity,
            includes: Box::new([]),
        }
    }

    pub fn with_includes(mut self, includes: &[EntityType]) -> Self {
        self.includes = includes.into();
        self
    }
}

/// Read under a shared lock, build outside of any lock, insert if still absent.
///
/// Concurrent builders may both run, the first stored value is returned to everyone.
pub(crate) fn get_or_insert_with<K, V, F>(
    map: &RwLock<HashMap<K, Arc<V>>>,
    key: &K,
    build: F,
) -> Result<(Arc<V>, bool)>
where
    K: Eq + Hash + Clone,
    V: ?Sized,
    F: FnOnce() -> Result<Arc<V>>,
{
    if let Some(value) = map
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
    {
        return Ok((value.clone(), true));
    }
    let value = build()?;
    let mut map = map.write().unwrap_or_else(PoisonError::into_inner);
    Ok((map.entry(key.clone()).or_insert(value).clone(), false))
}

/// Process wide memoization of static statement text.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryCacheKey, Arc<str>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Default::default()
    }

    /// Stored text for `key`, computing and storing it first when absent.
    ///
    /// Errors from `compute` are returned and nothing is stored.
    pub fn get_or_compute<F>(&self, key: &QueryCacheKey, compute: F) -> Result<Arc<str>>
    where
        F: FnOnce() -> Result<String>,
    {
        let (value, hit) = get_or_insert_with(&self.entries, key, || compute().map(Into::into))?;
        log::trace!(
            "Query cache {} for {:?} {} on {}",
            if hit { "hit" } else { "miss" },
            key.kind,
            key.entity.name(),
            key.dialect,
        );
        Ok(value)
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
