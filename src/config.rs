//! Configuration lookup consulted during consumer resolution.

use std::collections::HashMap;

/// Key/value configuration source for consumer settings.
///
/// Keys are dotted paths: `storage` names the token-storage backend, and
/// `consumers.<service>.client_id`, `consumers.<service>.client_secret`, and
/// `consumers.<service>.scope` carry per-service settings. Absent keys return
/// `None`; lookup itself never fails.
pub trait ConfigSource: Send + Sync {
    /// Look up a single string value
    fn get(&self, key: &str) -> Option<String>;

    /// Look up a list value, such as a scope
    fn get_list(&self, key: &str) -> Option<Vec<String>>;
}

/// Environment-backed configuration.
///
/// Dotted keys map to prefixed, uppercased, underscore-separated environment
/// names: with the default `OAUTH` prefix, `consumers.github.client_id` reads
/// `OAUTH_CONSUMERS_GITHUB_CLIENT_ID`. Empty values are treated as absent.
pub struct EnvConfig {
    prefix: String,
}

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn env_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.replace('.', "_")).to_ascii_uppercase()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new("OAUTH")
    }
}

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.env_name(key))
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|value| split_list(&value))
    }
}

/// Split a whitespace- or comma-separated list value into its entries.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ' ', '\t'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fixed in-memory configuration for tests and embedding applications.
#[derive(Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
    lists: HashMap<String, Vec<String>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single string value
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set a list value
    pub fn set_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.lists
            .get(key)
            .cloned()
            .or_else(|| self.values.get(key).map(|value| split_list(value)))
    }
}
