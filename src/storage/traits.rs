//! Token storage contract for consumer-owned persistence backends.

use crate::errors::StorageError;
use crate::oauth::types::AccessToken;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Trait for persisting access tokens and pending authorization state.
///
/// Backends are constructed by name through the storage registry; a fresh
/// instance is built for every resolution and owned by the consumer it is
/// wired into. Entries are keyed by service name so one backend instance can
/// serve several consumers when an application chooses to share it.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Backend name, for diagnostics
    fn name(&self) -> &'static str;

    /// Store the access token for a service
    async fn store_token(&self, service: &str, token: &AccessToken) -> Result<()>;

    /// Retrieve the stored access token for a service
    async fn load_token(&self, service: &str) -> Result<Option<AccessToken>>;

    /// Remove the stored access token for a service
    async fn clear_token(&self, service: &str) -> Result<()>;

    /// Store the pending authorization state for a service
    async fn store_state(&self, service: &str, state: &str) -> Result<()>;

    /// Retrieve the pending authorization state for a service
    async fn load_state(&self, service: &str) -> Result<Option<String>>;

    /// Remove the pending authorization state for a service
    async fn clear_state(&self, service: &str) -> Result<()>;
}
