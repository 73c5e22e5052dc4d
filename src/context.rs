//! Ambient request context supplying the default callback URL.

/// Supplies the current request URL used when no explicit callback URL is given.
///
/// The hosting application injects an implementation into the factory; resolution
/// fails with [`MissingCallbackUrl`](crate::errors::ResolveError::MissingCallbackUrl)
/// when neither an explicit URL nor a context URL is available.
pub trait RequestContext: Send + Sync {
    /// The full URL of the current request, if one is in flight
    fn current_url(&self) -> Option<String>;
}

/// Request context pinned to a fixed URL.
///
/// Suitable for hosts with a single external base address that serves as the
/// callback for every consumer.
pub struct StaticRequestContext {
    url: String,
}

impl StaticRequestContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RequestContext for StaticRequestContext {
    fn current_url(&self) -> Option<String> {
        Some(self.url.clone())
    }
}
