//! In-memory stub store with built-in stubs.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use bunny_core::{
    application::{ApplicationError, ports::StubStore},
    domain::{Stub, StubName},
    error::BunnyResult,
};
use tracing::debug;

use crate::builtin_stubs;

/// Thread-safe in-memory stub store. Clones share the same contents.
#[derive(Clone, Default)]
pub struct InMemoryStubStore {
    inner: Arc<RwLock<BTreeMap<StubName, Stub>>>,
}

impl InMemoryStubStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in stubs loaded.
    pub fn with_builtin() -> BunnyResult<Self> {
        let store = Self::new();
        store.extend(builtin_stubs::all_stubs())?;
        Ok(store)
    }

    /// Insert or replace a stub.
    pub fn insert(&self, stub: Stub) -> BunnyResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(stub.name().clone(), stub);
        Ok(())
    }

    /// Insert many stubs; later entries replace earlier ones with the same
    /// name. Returns how many names were overridden.
    pub fn extend(&self, stubs: impl IntoIterator<Item = Stub>) -> BunnyResult<usize> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let mut replaced = 0;
        for stub in stubs {
            if inner.insert(stub.name().clone(), stub).is_some() {
                replaced += 1;
            }
        }
        debug!(total = inner.len(), replaced, "Stubs loaded");
        Ok(replaced)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StubStore for InMemoryStubStore {
    fn find(&self, name: &StubName) -> BunnyResult<Option<Stub>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(name).cloned())
    }

    fn list(&self) -> BunnyResult<Vec<StubName>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_serves_every_generator_group() {
        let store = InMemoryStubStore::with_builtin().unwrap();
        for name in [
            "common/model",
            "backend/controllers/default",
            "api/controllers/graphql",
            "frontend/vue/default.vue",
            "cms/controller",
            "type/config",
            "sites/default/home.blade",
        ] {
            assert!(
                store.find(&StubName::new(name)).unwrap().is_some(),
                "missing {name}"
            );
        }
    }

    #[test]
    fn get_reports_missing_stub() {
        let store = InMemoryStubStore::new();
        let err = store.get(&StubName::new("nope/none")).unwrap_err();
        assert!(err.to_string().contains("nope/none"));
    }

    #[test]
    fn extend_overrides_and_counts() {
        let store = InMemoryStubStore::with_builtin().unwrap();
        let before = store.len();
        let replaced = store
            .extend([
                Stub::new(StubName::new("common/model"), "custom".to_owned()),
                Stub::new(StubName::new("extra/thing"), "new".to_owned()),
            ])
            .unwrap();

        assert_eq!(replaced, 1);
        assert_eq!(store.len(), before + 1);
        assert_eq!(
            store.get(&StubName::new("common/model")).unwrap().text(),
            "custom"
        );
    }

    #[test]
    fn list_is_sorted() {
        let store = InMemoryStubStore::with_builtin().unwrap();
        let names = store.list().unwrap();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
