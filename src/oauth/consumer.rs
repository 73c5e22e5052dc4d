//! Consumer objects produced by the factory.

use crate::http::HttpTransport;
use crate::oauth::types::{Credentials, ProviderEndpoints};
use crate::storage::TokenStorage;
use std::sync::Arc;

/// A constructed OAuth client bound to one set of credentials, one storage
/// backend, and one scope.
///
/// The factory treats consumers as immutable after construction. Protocol
/// behavior behind the wiring belongs to the implementor.
pub trait Consumer: Send + Sync {
    /// The registered service name this consumer was resolved for
    fn provider(&self) -> &str;

    /// The credentials the consumer was constructed with
    fn credentials(&self) -> &Credentials;

    /// The effective scope the consumer was constructed with
    fn scope(&self) -> &[String];

    /// The token storage owned by this consumer
    fn storage(&self) -> &dyn TokenStorage;
}

/// Generic consumer constructed by the built-in provider entries.
///
/// Carries the provider's endpoint metadata and the installed transport, and
/// renders the authorization URL for its wiring. Token exchange and signing
/// stay with the protocol layer driving the transport.
pub struct StandardConsumer {
    provider: String,
    credentials: Credentials,
    storage: Box<dyn TokenStorage>,
    transport: Arc<dyn HttpTransport>,
    scope: Vec<String>,
    endpoints: ProviderEndpoints,
}

impl StandardConsumer {
    pub fn new(
        provider: impl Into<String>,
        credentials: Credentials,
        storage: Box<dyn TokenStorage>,
        transport: Arc<dyn HttpTransport>,
        scope: Vec<String>,
        endpoints: ProviderEndpoints,
    ) -> Self {
        Self {
            provider: provider.into(),
            credentials,
            storage,
            transport,
            scope,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Render the provider's authorization URL for this consumer's wiring.
    ///
    /// The scope parameter is omitted entirely when the effective scope is
    /// empty.
    pub fn authorization_url(&self, state: &str) -> String {
        let mut url = self.endpoints.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", &self.credentials.callback_url)
            .append_pair("state", state);
        if !self.scope.is_empty() {
            url.query_pairs_mut()
                .append_pair("scope", &self.scope.join(" "));
        }
        url.to_string()
    }
}

impl Consumer for StandardConsumer {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn scope(&self) -> &[String] {
        &self.scope
    }

    fn storage(&self) -> &dyn TokenStorage {
        self.storage.as_ref()
    }
}
