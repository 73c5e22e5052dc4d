//! Service registry: name-to-constructor dispatch and final consumer
//! construction.

use crate::errors::ResolveError;
use crate::http::HttpTransport;
use crate::oauth::consumer::Consumer;
use crate::oauth::providers;
use crate::oauth::types::Credentials;
use crate::storage::TokenStorage;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a service constructor needs to assemble a consumer.
pub struct ServiceContext {
    pub credentials: Credentials,
    pub storage: Box<dyn TokenStorage>,
    pub scope: Vec<String>,
    /// The transport currently installed in the construction layer
    pub transport: Arc<dyn HttpTransport>,
}

/// Constructor capability invoked to build a consumer.
pub type ServiceConstructor =
    Arc<dyn Fn(ServiceContext) -> Result<Box<dyn Consumer>, ResolveError> + Send + Sync>;

/// Maps service names to constructors and performs final consumer
/// construction.
///
/// Registration is deliberately permissive: entries are upserted
/// last-write-wins with no validation, so any caller may shadow a built-in
/// name, and a misbehaving constructor surfaces only when construction runs.
pub struct ServiceRegistry {
    services: HashMap<String, ServiceConstructor>,
    transport: Arc<dyn HttpTransport>,
}

impl ServiceRegistry {
    /// Registry seeded with the built-in providers, constructing through
    /// `transport` until another one is installed.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        let mut registry = Self {
            services: HashMap::new(),
            transport,
        };
        for (name, constructor) in providers::builtin_services() {
            registry.services.insert(name.to_string(), constructor);
        }
        registry
    }

    /// Add or replace a service constructor. Names match case-insensitively.
    pub fn register(
        &mut self,
        name: &str,
        constructor: impl Fn(ServiceContext) -> Result<Box<dyn Consumer>, ResolveError>
        + Send
        + Sync
        + 'static,
    ) {
        self.services
            .insert(name.to_ascii_lowercase(), Arc::new(constructor));
    }

    /// Whether a constructor is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(&name.to_ascii_lowercase())
    }

    /// Install the transport shared by all subsequently constructed consumers.
    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) {
        self.transport = transport;
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Construct the consumer registered under `name`.
    pub fn create(
        &self,
        name: &str,
        credentials: Credentials,
        storage: Box<dyn TokenStorage>,
        scope: Vec<String>,
    ) -> Result<Box<dyn Consumer>, ResolveError> {
        let constructor = self
            .services
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| ResolveError::UnknownService(name.to_string()))?;
        constructor(ServiceContext {
            credentials,
            storage,
            scope,
            transport: self.transport.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;
    use crate::storage::SessionTokenStorage;

    fn context_parts() -> (Credentials, Box<dyn TokenStorage>) {
        (
            Credentials::new("id", "secret", "https://app.example.com/cb"),
            Box::new(SessionTokenStorage::new()),
        )
    }

    #[test]
    fn test_unknown_service_fails() {
        let registry = ServiceRegistry::new(Arc::new(MockTransport::new()));
        let (credentials, storage) = context_parts();
        let result = registry.create("nope", credentials, storage, Vec::new());
        assert!(matches!(
            result,
            Err(ResolveError::UnknownService(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_builtin_providers_are_seeded() {
        let registry = ServiceRegistry::new(Arc::new(MockTransport::new()));
        for name in ["facebook", "github", "google", "linkedin", "microsoft", "spotify"] {
            assert!(registry.contains(name), "missing builtin: {}", name);
        }
        let (credentials, storage) = context_parts();
        let consumer = registry
            .create("GitHub", credentials, storage, Vec::new())
            .unwrap();
        assert_eq!(consumer.provider(), "github");
    }

    #[test]
    fn test_registration_shadows_builtin() {
        let mut registry = ServiceRegistry::new(Arc::new(MockTransport::new()));
        registry.register("github", |context| {
            let endpoints = crate::oauth::types::ProviderEndpoints::parse(
                "https://git.example.com/authorize",
                "https://git.example.com/token",
            )?;
            Ok(Box::new(crate::oauth::consumer::StandardConsumer::new(
                "github-enterprise",
                context.credentials,
                context.storage,
                context.transport,
                context.scope,
                endpoints,
            )))
        });

        let (credentials, storage) = context_parts();
        let consumer = registry
            .create("github", credentials, storage, Vec::new())
            .unwrap();
        assert_eq!(consumer.provider(), "github-enterprise");
    }
}
