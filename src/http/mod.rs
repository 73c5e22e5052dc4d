//! HTTP transport contract and registry-based transport selection.

pub mod clients;

pub use clients::{MockTransport, ReqwestTransport};

use crate::errors::{ResolveError, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Transport installed into the service-construction layer when a factory is
/// built.
pub const DEFAULT_TRANSPORT: &str = "Reqwest";

/// HTTP request handed to a transport.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: http::Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: http::Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: http::Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP response returned by a transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: http::StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Response with the given status and body and no headers
    pub fn new(status: http::StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Decode the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body).map_err(|e| TransportError::DecodingFailed(e.to_string()))
    }
}

/// Trait for sending HTTP requests during the OAuth handshake.
///
/// The factory core never awaits a transport itself; the installed transport is
/// handed to every constructed consumer, which drives it during protocol work.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Transport name, for diagnostics
    fn name(&self) -> &'static str;

    /// Execute an HTTP request
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

type TransportConstructor = Arc<dyn Fn() -> Arc<dyn HttpTransport> + Send + Sync>;

/// Maps transport names to no-argument transport constructors.
pub struct TransportRegistry {
    transports: HashMap<String, TransportConstructor>,
}

impl TransportRegistry {
    /// Registry seeded with the Reqwest and Mock transports
    pub fn new() -> Self {
        let mut registry = Self {
            transports: HashMap::new(),
        };
        registry.register(DEFAULT_TRANSPORT, || Arc::new(ReqwestTransport::new()));
        registry.register("Mock", || Arc::new(MockTransport::new()));
        registry
    }

    /// Add or replace a transport constructor. Names match case-insensitively.
    pub fn register(
        &mut self,
        name: &str,
        constructor: impl Fn() -> Arc<dyn HttpTransport> + Send + Sync + 'static,
    ) {
        self.transports
            .insert(name.to_ascii_lowercase(), Arc::new(constructor));
    }

    /// Build a fresh transport instance for `name`.
    pub fn create(&self, name: &str) -> Result<Arc<dyn HttpTransport>, ResolveError> {
        match self.transports.get(&name.to_ascii_lowercase()) {
            Some(constructor) => Ok(constructor()),
            None => Err(ResolveError::UnknownTransport(name.to_string())),
        }
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::new()
    }
}
