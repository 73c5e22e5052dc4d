//! Pluggable token storage with registry-based backend selection.

pub mod inmemory;
pub mod traits;

pub use inmemory::{CacheTokenStorage, MemoryTokenStorage, SessionTokenStorage};
pub use traits::TokenStorage;

use crate::errors::ResolveError;
use std::collections::HashMap;
use std::sync::Arc;

/// Storage backend name used when configuration does not name one.
pub const DEFAULT_STORAGE: &str = "Session";

type StorageConstructor = Arc<dyn Fn() -> Box<dyn TokenStorage> + Send + Sync>;

/// Maps backend names to no-argument storage constructors.
///
/// Every `create` builds a fresh instance; nothing is cached. Hosting
/// applications can substitute alternative backends through `register` without
/// touching the factory.
pub struct StorageRegistry {
    backends: HashMap<String, StorageConstructor>,
}

impl StorageRegistry {
    /// Registry seeded with the Session, Memory, and Cache backends
    pub fn new() -> Self {
        let mut registry = Self {
            backends: HashMap::new(),
        };
        registry.register("Session", || Box::new(SessionTokenStorage::new()));
        registry.register("Memory", || Box::new(MemoryTokenStorage::new()));
        registry.register("Cache", || Box::new(CacheTokenStorage::new()));
        registry
    }

    /// Add or replace a backend constructor. Names match case-insensitively.
    pub fn register(
        &mut self,
        name: &str,
        constructor: impl Fn() -> Box<dyn TokenStorage> + Send + Sync + 'static,
    ) {
        self.backends
            .insert(name.to_ascii_lowercase(), Arc::new(constructor));
    }

    /// Build a fresh storage instance for `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn TokenStorage>, ResolveError> {
        match self.backends.get(&name.to_ascii_lowercase()) {
            Some(constructor) => Ok(constructor()),
            None => Err(ResolveError::UnknownStorage(name.to_string())),
        }
    }
}

impl Default for StorageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
