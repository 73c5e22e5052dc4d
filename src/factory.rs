//! Consumer resolution: turning a service name into a configured consumer.

use crate::config::ConfigSource;
use crate::context::RequestContext;
use crate::errors::ResolveError;
use crate::http::{HttpTransport, ReqwestTransport, TransportRegistry};
use crate::oauth::consumer::Consumer;
use crate::oauth::registry::{ServiceContext, ServiceRegistry};
use crate::oauth::types::Credentials;
use crate::storage::{DEFAULT_STORAGE, StorageRegistry, TokenStorage};
use std::sync::Arc;

/// Per-resolution configuration snapshot, local to one `resolve` call.
struct ConsumerConfig {
    storage: String,
    client_id: String,
    client_secret: String,
    scope: Vec<String>,
}

/// Produces configured OAuth consumers by name.
///
/// A factory owns three registries (storage backends, transports, service
/// constructors) and a configuration source. `resolve` reads the service's
/// configuration, builds a fresh storage instance, assembles credentials
/// around the effective callback URL, resolves the effective scope, and hands
/// construction to the service registry.
pub struct ConsumerFactory {
    config: Arc<dyn ConfigSource>,
    request_context: Option<Arc<dyn RequestContext>>,
    storages: StorageRegistry,
    transports: TransportRegistry,
    services: ServiceRegistry,
}

impl ConsumerFactory {
    /// Factory over a configuration source, seeded with the built-in storage
    /// backends, transports, and providers. The reqwest transport is
    /// installed until [`set_http_transport`](Self::set_http_transport)
    /// chooses another.
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        Self {
            config,
            request_context: None,
            storages: StorageRegistry::new(),
            transports: TransportRegistry::new(),
            services: ServiceRegistry::new(Arc::new(ReqwestTransport::new())),
        }
    }

    /// Inject the ambient request context used as the callback URL fallback.
    pub fn with_request_context(mut self, context: Arc<dyn RequestContext>) -> Self {
        self.request_context = Some(context);
        self
    }

    /// Install the named transport for every consumer constructed after this
    /// call.
    pub fn set_http_transport(&mut self, name: &str) -> Result<(), ResolveError> {
        let transport = self.transports.create(name)?;
        tracing::debug!(transport = transport.name(), "installed http transport");
        self.services.set_transport(transport);
        Ok(())
    }

    /// Register or shadow a service constructor.
    ///
    /// The constructor is not validated here; a misbehaving one surfaces when
    /// `resolve` attempts construction.
    pub fn register_service(
        &mut self,
        name: &str,
        constructor: impl Fn(ServiceContext) -> Result<Box<dyn Consumer>, ResolveError>
        + Send
        + Sync
        + 'static,
    ) {
        self.services.register(name, constructor);
    }

    /// Register or replace a storage backend constructor.
    pub fn register_storage(
        &mut self,
        name: &str,
        constructor: impl Fn() -> Box<dyn TokenStorage> + Send + Sync + 'static,
    ) {
        self.storages.register(name, constructor);
    }

    /// Register or replace a transport constructor.
    pub fn register_transport(
        &mut self,
        name: &str,
        constructor: impl Fn() -> Arc<dyn HttpTransport> + Send + Sync + 'static,
    ) {
        self.transports.register(name, constructor);
    }

    /// Resolve a service name into a fully constructed consumer.
    ///
    /// `callback_url` overrides the ambient request URL when non-empty. A
    /// `Some` scope, including an explicitly empty one, fully replaces the
    /// configured default; `None` falls back to it.
    pub fn resolve(
        &self,
        service: &str,
        callback_url: Option<&str>,
        scope: Option<&[String]>,
    ) -> Result<Box<dyn Consumer>, ResolveError> {
        let service = service.to_ascii_lowercase();
        if !self.services.contains(&service) {
            return Err(ResolveError::UnknownService(service));
        }

        let config = self.consumer_config(&service)?;

        let storage = self.storages.create(&config.storage)?;
        tracing::debug!(
            service = %service,
            storage = storage.name(),
            "constructed token storage"
        );

        let callback_url = self.callback_url(callback_url)?;
        let credentials = Credentials::new(config.client_id, config.client_secret, callback_url);

        let scope = match scope {
            Some(explicit) => explicit.to_vec(),
            None => config.scope,
        };

        tracing::debug!(service = %service, ?scope, "constructing consumer");
        self.services.create(&service, credentials, storage, scope)
    }

    /// Read the service's configuration into a call-local snapshot.
    fn consumer_config(&self, service: &str) -> Result<ConsumerConfig, ResolveError> {
        let storage = self
            .config
            .get("storage")
            .unwrap_or_else(|| DEFAULT_STORAGE.to_string());
        let client_id = self.config.get(&format!("consumers.{service}.client_id"));
        let client_secret = self
            .config
            .get(&format!("consumers.{service}.client_secret"));
        let scope = self
            .config
            .get_list(&format!("consumers.{service}.scope"))
            .unwrap_or_default();

        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Ok(ConsumerConfig {
                    storage,
                    client_id,
                    client_secret,
                    scope,
                })
            }
            _ => Err(ResolveError::MissingCredentials(service.to_string())),
        }
    }

    fn callback_url(&self, explicit: Option<&str>) -> Result<String, ResolveError> {
        match explicit {
            Some(url) if !url.is_empty() => Ok(url.to_string()),
            _ => self
                .request_context
                .as_ref()
                .and_then(|context| context.current_url())
                .ok_or(ResolveError::MissingCallbackUrl),
        }
    }
}
