//! Core value types for consumer wiring.

use crate::errors::ResolveError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client credentials bound to one consumer.
///
/// Created fresh for every resolution and moved into the consumer; never
/// persisted. The secret is redacted from the `Debug` rendering.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth client identifier
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Callback URL the provider redirects to after authorization
    pub callback_url: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// An issued OAuth access token, the unit the storage contract persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The access token itself
    pub access_token: String,
    /// Token type, normally `Bearer`
    pub token_type: String,
    /// Refresh token, if the provider issued one
    pub refresh_token: Option<String>,
    /// End of life; tokens without one never expire
    pub expires_at: Option<DateTime<Utc>>,
    /// Scope granted by the provider
    pub scope: Option<String>,
}

impl AccessToken {
    /// Bearer token without refresh token or expiry
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            refresh_token: None,
            expires_at: None,
            scope: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the token's end of life has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| expires_at <= Utc::now())
            .unwrap_or(false)
    }
}

/// Authorization and token endpoint locations for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// The provider's authorization endpoint
    pub authorization_endpoint: url::Url,
    /// The provider's token endpoint
    pub token_endpoint: url::Url,
}

impl ProviderEndpoints {
    /// Parse endpoint locations, rejecting malformed URLs before a consumer is
    /// built around them.
    pub fn parse(
        authorization_endpoint: &str,
        token_endpoint: &str,
    ) -> Result<Self, ResolveError> {
        let authorization_endpoint = url::Url::parse(authorization_endpoint).map_err(|e| {
            ResolveError::ConstructionFailed(format!(
                "invalid authorization endpoint '{authorization_endpoint}': {e}"
            ))
        })?;
        let token_endpoint = url::Url::parse(token_endpoint).map_err(|e| {
            ResolveError::ConstructionFailed(format!(
                "invalid token endpoint '{token_endpoint}': {e}"
            ))
        })?;
        Ok(Self {
            authorization_endpoint,
            token_endpoint,
        })
    }
}
