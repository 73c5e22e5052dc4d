//! Standardized error types following the `error-rig-<domain>-<number>` format.

use thiserror::Error;

/// Errors raised while resolving a consumer or reconfiguring the factory
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Error when a service name is absent from the service registry
    #[error("error-rig-factory-1 Unknown service: {0}")]
    UnknownService(String),

    /// Error when a storage backend name is absent from the storage registry
    #[error("error-rig-factory-2 Unknown storage backend: {0}")]
    UnknownStorage(String),

    /// Error when a transport name is absent from the transport registry
    #[error("error-rig-factory-3 Unknown transport: {0}")]
    UnknownTransport(String),

    /// Error when no explicit callback URL and no ambient request URL is available
    #[error("error-rig-factory-4 No callback URL provided and no request context available")]
    MissingCallbackUrl,

    /// Error when client id or client secret is not configured for a service
    #[error("error-rig-factory-5 Missing client credentials for service: {0}")]
    MissingCredentials(String),

    /// Error raised by a registered service constructor during construction
    #[error("error-rig-factory-6 Consumer construction failed: {0}")]
    ConstructionFailed(String),
}

/// Token storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when a storage lock is poisoned
    #[error("error-rig-storage-1 Storage lock poisoned: {0}")]
    LockPoisoned(String),

    /// Error when token data cannot be serialized or deserialized
    #[error("error-rig-storage-2 Token serialization failed: {0}")]
    SerializationFailed(String),
}

/// HTTP transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error when a request URL cannot be parsed
    #[error("error-rig-transport-1 Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Error when sending a request fails
    #[error("error-rig-transport-2 Request failed: {0}")]
    RequestFailed(String),

    /// Error when a response body cannot be decoded
    #[error("error-rig-transport-3 Response decoding failed: {0}")]
    DecodingFailed(String),
}
