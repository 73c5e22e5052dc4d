//! In-memory storage backends seeded into the storage registry.

use crate::errors::StorageError;
use crate::oauth::types::AccessToken;
use crate::storage::traits::{Result, TokenStorage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Request-scoped storage, the default backend.
///
/// A fresh instance is wired into every resolved consumer, so tokens live
/// exactly as long as the consumer that owns them.
#[derive(Default)]
pub struct SessionTokenStorage {
    tokens: tokio::sync::RwLock<HashMap<String, AccessToken>>,
    states: tokio::sync::RwLock<HashMap<String, String>>,
}

impl SessionTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for SessionTokenStorage {
    fn name(&self) -> &'static str {
        "Session"
    }

    async fn store_token(&self, service: &str, token: &AccessToken) -> Result<()> {
        self.tokens
            .write()
            .await
            .insert(service.to_string(), token.clone());
        Ok(())
    }

    async fn load_token(&self, service: &str) -> Result<Option<AccessToken>> {
        Ok(self.tokens.read().await.get(service).cloned())
    }

    async fn clear_token(&self, service: &str) -> Result<()> {
        self.tokens.write().await.remove(service);
        Ok(())
    }

    async fn store_state(&self, service: &str, state: &str) -> Result<()> {
        self.states
            .write()
            .await
            .insert(service.to_string(), state.to_string());
        Ok(())
    }

    async fn load_state(&self, service: &str) -> Result<Option<String>> {
        Ok(self.states.read().await.get(service).cloned())
    }

    async fn clear_state(&self, service: &str) -> Result<()> {
        self.states.write().await.remove(service);
        Ok(())
    }
}

/// Plain in-process map storage.
#[derive(Default)]
pub struct MemoryTokenStorage {
    tokens: Mutex<HashMap<String, AccessToken>>,
    states: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn store_token(&self, service: &str, token: &AccessToken) -> Result<()> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        tokens.insert(service.to_string(), token.clone());
        Ok(())
    }

    async fn load_token(&self, service: &str) -> Result<Option<AccessToken>> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(tokens.get(service).cloned())
    }

    async fn clear_token(&self, service: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        tokens.remove(service);
        Ok(())
    }

    async fn store_state(&self, service: &str, state: &str) -> Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        states.insert(service.to_string(), state.to_string());
        Ok(())
    }

    async fn load_state(&self, service: &str) -> Result<Option<String>> {
        let states = self
            .states
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(states.get(service).cloned())
    }

    async fn clear_state(&self, service: &str) -> Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        states.remove(service);
        Ok(())
    }
}

/// Map storage that drops expired tokens on load.
#[derive(Default)]
pub struct CacheTokenStorage {
    tokens: Mutex<HashMap<String, AccessToken>>,
    states: Mutex<HashMap<String, String>>,
}

impl CacheTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for CacheTokenStorage {
    fn name(&self) -> &'static str {
        "Cache"
    }

    async fn store_token(&self, service: &str, token: &AccessToken) -> Result<()> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        tokens.insert(service.to_string(), token.clone());
        Ok(())
    }

    async fn load_token(&self, service: &str) -> Result<Option<AccessToken>> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        if let Some(token) = tokens.get(service) {
            if token.is_expired() {
                tokens.remove(service);
                return Ok(None);
            }
            return Ok(Some(token.clone()));
        }
        Ok(None)
    }

    async fn clear_token(&self, service: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        tokens.remove(service);
        Ok(())
    }

    async fn store_state(&self, service: &str, state: &str) -> Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        states.insert(service.to_string(), state.to_string());
        Ok(())
    }

    async fn load_state(&self, service: &str) -> Result<Option<String>> {
        let states = self
            .states
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(states.get(service).cloned())
    }

    async fn clear_state(&self, service: &str) -> Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        states.remove(service);
        Ok(())
    }
}
